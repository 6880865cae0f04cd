//! Task form — the validation layer in front of `add_task` / `update_task`.
//!
//! The store accepts any draft; this is where a blank title is rejected and
//! tags are normalized before anything reaches it.

use crate::model::{Priority, Task, TaskDraft, TaskPatch, User, UserRef};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("task title is required")]
    EmptyTitle,
    #[error("no team members to assign the task to")]
    NoUsers,
}

/// Raw field values of the create/edit task form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: String,
    pub assignee_id: String,
    pub tags: Vec<String>,
}

impl TaskForm {
    /// Blank form for a new task, pre-assigned to the first team member.
    #[must_use]
    pub fn new(users: &[User]) -> Self {
        Self { assignee_id: users.first().map(|u| u.id.clone()).unwrap_or_default(), ..Self::default() }
    }

    /// Form pre-filled from an existing task, for editing.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            due_date: task.due_date.clone(),
            assignee_id: task.assignee.id.clone(),
            tags: task.tags.clone(),
        }
    }

    /// Add a trimmed tag. Blank and duplicate tags are ignored; returns whether
    /// the tag was added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Validate into a draft for `add_task`.
    ///
    /// # Errors
    ///
    /// `EmptyTitle` when the trimmed title is blank, `NoUsers` when there is no
    /// one to assign. An unknown assignee id falls back to the first user.
    pub fn into_draft(self, users: &[User]) -> Result<TaskDraft, FormError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(FormError::EmptyTitle);
        }
        let assignee = users
            .iter()
            .find(|u| u.id == self.assignee_id)
            .or_else(|| users.first())
            .map(UserRef::from)
            .ok_or(FormError::NoUsers)?;

        Ok(TaskDraft {
            title,
            description: self.description.trim().to_string(),
            tags: self.tags,
            assignee,
            due_date: self.due_date,
            priority: self.priority,
        })
    }

    /// Validate into a full patch for `update_task`.
    ///
    /// # Errors
    ///
    /// Same as [`TaskForm::into_draft`].
    pub fn into_patch(self, users: &[User]) -> Result<TaskPatch, FormError> {
        let draft = self.into_draft(users)?;
        Ok(TaskPatch {
            title: Some(draft.title),
            description: Some(draft.description),
            tags: Some(draft.tags),
            assignee: Some(draft.assignee),
            due_date: Some(draft.due_date),
            priority: Some(draft.priority),
        })
    }
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;
