//! Board search and priority filter.

use crate::model::{Priority, Task};

/// Search text plus an optional priority. The default filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub query: String,
    pub priority: Option<Priority>,
}

impl TaskFilter {
    #[must_use]
    pub fn new(query: impl Into<String>, priority: Option<Priority>) -> Self {
        Self { query: query.into(), priority }
    }

    /// Case-insensitive substring match on title, description, or any tag,
    /// combined with an exact priority match when one is set.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if self.priority.is_some_and(|p| p != task.priority) {
            return false;
        }
        let needle = self.query.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        task.title.to_lowercase().contains(&needle)
            || task.description.to_lowercase().contains(&needle)
            || task.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }

    /// Matching tasks, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
