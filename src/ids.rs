//! Unique-id generation for tasks, activities, and notifications.
//!
//! DESIGN
//! ======
//! Ids are produced by an injected `IdGenerator` so tests can use a
//! deterministic counter while the host uses random UUIDs. Two records
//! created in the same millisecond still receive distinct ids.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of globally unique string ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Monotonic counter ids: `{prefix}{n}` starting at `n = 1`.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), next: AtomicU64::new(1) }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("id-")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{n}", self.prefix)
    }
}

#[cfg(test)]
#[path = "ids_test.rs"]
mod tests;
