//! Simulated collaboration — a cancellable timer chain of canned teammate actions.
//!
//! DESIGN
//! ======
//! One spawned task runs the whole chain: pick an online collaborator and a
//! canned action, sleep the initial delay, apply the action through the
//! store, sleep the repeat delay, start over. When nobody but the current
//! user is online the chain ends instead of rescheduling.
//!
//! CANCELLATION
//! ============
//! `CollaborationHandle` aborts the task on `cancel`, `shutdown`, or drop.
//! Store actions are synchronous, so an abort can only land while the task
//! is sleeping; no action is ever half-applied and nothing runs afterwards.

use std::ops::RangeInclusive;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::model::{ActivityAction, ActivityDraft, ColumnId, User, UserRef};
use crate::store::BoardStore;

// =============================================================================
// CANNED ACTIONS
// =============================================================================

/// One entry of the fixed teammate-action table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CannedAction {
    pub action: ActivityAction,
    pub task_id: Option<&'static str>,
    pub task_title: Option<&'static str>,
    pub columns: Option<(ColumnId, ColumnId)>,
    pub details: Option<&'static str>,
}

pub const CANNED_ACTIONS: [CannedAction; 4] = [
    CannedAction {
        action: ActivityAction::Updated,
        task_id: Some("1"),
        task_title: None,
        columns: None,
        details: Some("Changed priority to high"),
    },
    CannedAction {
        action: ActivityAction::Moved,
        task_id: Some("2"),
        task_title: None,
        columns: Some((ColumnId::Todo, ColumnId::InProgress)),
        details: None,
    },
    CannedAction {
        action: ActivityAction::Created,
        task_id: None,
        task_title: Some("Fix mobile responsiveness"),
        columns: None,
        details: Some("Added new task"),
    },
    CannedAction {
        action: ActivityAction::Commented,
        task_id: Some("3"),
        task_title: None,
        columns: None,
        details: Some("Added progress update"),
    },
];

/// Title shown when a canned action names a task that no longer exists.
const FALLBACK_TASK_TITLE: &str = "Task";

/// Apply `canned` on behalf of `collaborator`. Returns whether the board changed.
///
/// A move only happens while the task still sits in the template's source
/// column; every other template appends one activity.
pub fn apply_canned_action(store: &BoardStore, collaborator: &User, canned: &CannedAction) -> bool {
    let actor = UserRef::from(collaborator);

    if let (ActivityAction::Moved, Some(task_id), Some((from, to))) = (canned.action, canned.task_id, canned.columns) {
        return store.move_task_as(&actor, task_id, from, to).is_some();
    }

    let mut draft = ActivityDraft::new(&actor, canned.action);
    draft.details = canned.details.map(str::to_string);

    match (canned.task_title, canned.task_id) {
        (None, Some(task_id)) => {
            store.add_task_activity(draft, task_id, FALLBACK_TASK_TITLE);
        }
        (title, task_id) => {
            draft.task_id = task_id.map(str::to_string);
            draft.task_title = title.map(str::to_string);
            store.add_activity(draft);
        }
    }
    true
}

// =============================================================================
// TIMER CHAIN
// =============================================================================

/// Owner of one running collaboration chain. Dropping it cancels the chain.
#[derive(Debug)]
pub struct CollaborationHandle {
    task: Option<JoinHandle<()>>,
}

impl CollaborationHandle {
    /// Stop the chain. No further scheduled work runs after this returns
    /// control to the runtime.
    pub fn cancel(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Stop the chain and wait until the task has fully wound down.
    pub async fn shutdown(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            if let Err(e) = task.await {
                if e.is_panic() {
                    warn!(error = %e, "collaboration task panicked");
                }
            }
        }
    }

    /// True once the chain has ended, either by cancellation or because no
    /// collaborator was online.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for CollaborationHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Spawn a chain seeded from the OS random source.
pub fn spawn_collaboration(store: BoardStore) -> CollaborationHandle {
    spawn_collaboration_with_rng(store, StdRng::from_os_rng())
}

/// Spawn a chain driven by `rng`, for reproducible runs.
///
/// Outside a tokio runtime nothing is spawned and the returned handle is
/// already finished.
pub fn spawn_collaboration_with_rng(store: BoardStore, mut rng: StdRng) -> CollaborationHandle {
    let Ok(runtime) = Handle::try_current() else {
        warn!("no tokio runtime; collaboration simulation not started");
        return CollaborationHandle { task: None };
    };

    let config = store.config().simulation.clone();
    info!(
        initial_delay_ms = ?config.initial_delay_ms,
        repeat_delay_ms = ?config.repeat_delay_ms,
        "collaboration simulation started"
    );

    let task = runtime.spawn(async move {
        loop {
            let collaborators = store.active_collaborators();
            let Some(collaborator) = collaborators.choose(&mut rng).cloned() else {
                debug!("no collaborators online; simulation stopped");
                break;
            };
            let canned = CANNED_ACTIONS[rng.random_range(0..CANNED_ACTIONS.len())];

            tokio::time::sleep(random_delay(&mut rng, &config.initial_delay_ms)).await;

            let applied = apply_canned_action(&store, &collaborator, &canned);
            debug!(
                user_id = %collaborator.id,
                action = canned.action.as_str(),
                applied,
                "simulated collaborator action"
            );

            tokio::time::sleep(random_delay(&mut rng, &config.repeat_delay_ms)).await;
        }
    });

    CollaborationHandle { task: Some(task) }
}

fn random_delay<R: Rng>(rng: &mut R, range_ms: &RangeInclusive<u64>) -> Duration {
    let (lo, hi) = (*range_ms.start(), *range_ms.end());
    let ms = if lo >= hi { lo } else { rng.random_range(lo..=hi) };
    Duration::from_millis(ms)
}

#[cfg(test)]
#[path = "simulation_test.rs"]
mod tests;
