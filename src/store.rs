//! Board store — tasks, team presence, activity log, and notifications.
//!
//! DESIGN
//! ======
//! `BoardStore` is a cheap-to-clone handle over one `Arc<Mutex<BoardState>>`.
//! Every action takes the lock exactly once and performs the whole mutation,
//! including the activity and notification it derives, before releasing it.
//! Timestamps and ids are taken under the lock, so log order always matches
//! timestamp order. Readers therefore only ever see complete states. Nothing awaits while the
//! lock is held, so a plain `std::sync::Mutex` is enough even when the
//! collaboration task runs on another worker thread.
//!
//! ERROR HANDLING
//! ==============
//! Actions never fail. An unknown task id, a task missing from the named
//! source column, or an unknown user id leaves the state untouched and
//! produces no activity, notification, or log line.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use crate::config::BoardConfig;
use crate::ids::IdGenerator;
use crate::model::{
    Activity, ActivityAction, ActivityDraft, ColumnId, DraggedTask, Notification, NotificationDraft,
    NotificationKind, Task, TaskDraft, TaskMap, TaskPatch, Timestamp, User, UserRef, UserStatus,
};
use crate::seed::Seed;
use crate::simulation::{self, CollaborationHandle};

// =============================================================================
// STATE
// =============================================================================

/// Complete board state. Also the type returned by `BoardStore::snapshot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    pub tasks: TaskMap,
    pub users: Vec<User>,
    pub dragged_task: Option<DraggedTask>,
    /// Newest first.
    pub activities: VecDeque<Activity>,
    /// Newest first.
    pub notifications: VecDeque<Notification>,
    pub current_user_id: String,
    pub is_connected: bool,
    pub active_users: Vec<String>,
}

impl From<Seed> for BoardState {
    fn from(seed: Seed) -> Self {
        let mut tasks = seed.tasks;
        for column in ColumnId::ALL {
            tasks.entry(column).or_default();
        }
        Self {
            tasks,
            users: seed.users,
            dragged_task: None,
            activities: VecDeque::new(),
            notifications: VecDeque::new(),
            current_user_id: seed.current_user_id,
            is_connected: seed.is_connected,
            active_users: seed.active_users,
        }
    }
}

impl BoardState {
    fn locate(&self, task_id: &str) -> Option<(ColumnId, usize)> {
        self.tasks.iter().find_map(|(column, tasks)| {
            tasks
                .iter()
                .position(|t| t.id == task_id)
                .map(|idx| (*column, idx))
        })
    }

    /// Identity used for locally initiated actions.
    fn current_actor(&self) -> UserRef {
        match self.users.iter().find(|u| u.id == self.current_user_id) {
            Some(user) => UserRef::from(user),
            None => UserRef { id: self.current_user_id.clone(), name: "Unknown".into(), avatar: String::new() },
        }
    }
}

/// A task together with the column that currently owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLocation {
    pub task: Task,
    pub column: ColumnId,
}

// =============================================================================
// STORE
// =============================================================================

/// Shared handle to one board. Clones observe and mutate the same state.
#[derive(Clone)]
pub struct BoardStore {
    inner: Arc<Mutex<BoardState>>,
    ids: Arc<dyn IdGenerator>,
    config: Arc<BoardConfig>,
}

impl BoardStore {
    #[must_use]
    pub fn new(seed: Seed, config: BoardConfig, ids: Arc<dyn IdGenerator>) -> Self {
        Self { inner: Arc::new(Mutex::new(BoardState::from(seed))), ids, config: Arc::new(config) }
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Consistent copy of the whole board.
    #[must_use]
    pub fn snapshot(&self) -> BoardState {
        self.lock().clone()
    }

    #[must_use]
    pub fn tasks(&self) -> TaskMap {
        self.lock().tasks.clone()
    }

    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.lock().users.clone()
    }

    #[must_use]
    pub fn user(&self, user_id: &str) -> Option<User> {
        self.lock().users.iter().find(|u| u.id == user_id).cloned()
    }

    #[must_use]
    pub fn dragged_task(&self) -> Option<DraggedTask> {
        self.lock().dragged_task.clone()
    }

    #[must_use]
    pub fn activities(&self) -> Vec<Activity> {
        self.lock().activities.iter().cloned().collect()
    }

    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().notifications.iter().cloned().collect()
    }

    #[must_use]
    pub fn current_user_id(&self) -> String {
        self.lock().current_user_id.clone()
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.lock().is_connected
    }

    #[must_use]
    pub fn active_users(&self) -> Vec<String> {
        self.lock().active_users.clone()
    }

    /// Number of team members currently online.
    #[must_use]
    pub fn online_user_count(&self) -> usize {
        self.lock()
            .users
            .iter()
            .filter(|u| u.status == UserStatus::Online)
            .count()
    }

    /// Online users other than the current user.
    #[must_use]
    pub fn active_collaborators(&self) -> Vec<User> {
        let state = self.lock();
        state
            .users
            .iter()
            .filter(|u| u.id != state.current_user_id && u.status == UserStatus::Online)
            .cloned()
            .collect()
    }

    /// First task with `task_id`, scanning columns in board order.
    #[must_use]
    pub fn find_task_by_id(&self, task_id: &str) -> Option<TaskLocation> {
        let state = self.lock();
        let (column, idx) = state.locate(task_id)?;
        Some(TaskLocation { task: state.tasks[&column][idx].clone(), column })
    }

    #[must_use]
    pub fn get_tasks_by_column(&self, column: ColumnId) -> Vec<Task> {
        self.lock().tasks.get(&column).cloned().unwrap_or_default()
    }

    /// Like `get_tasks_by_column`, for raw column names. Unknown names yield nothing.
    #[must_use]
    pub fn get_tasks_by_column_name(&self, column: &str) -> Vec<Task> {
        match column.parse::<ColumnId>() {
            Ok(column) => self.get_tasks_by_column(column),
            Err(_) => Vec::new(),
        }
    }

    /// The `limit` newest activities.
    #[must_use]
    pub fn get_recent_activities(&self, limit: usize) -> Vec<Activity> {
        self.lock().activities.iter().take(limit).cloned().collect()
    }

    /// `get_recent_activities` with the configured default limit.
    #[must_use]
    pub fn recent_activities(&self) -> Vec<Activity> {
        self.get_recent_activities(self.config.recent_activity_limit)
    }

    // =========================================================================
    // TASK ACTIONS
    // =========================================================================

    /// Replace every column wholesale. Records no activity.
    pub fn set_tasks(&self, tasks: TaskMap) {
        let mut state = self.lock();
        state.tasks = tasks;
        for column in ColumnId::ALL {
            state.tasks.entry(column).or_default();
        }
    }

    /// Append a new task to the end of `column` and return it.
    pub fn add_task(&self, column: ColumnId, draft: TaskDraft) -> Task {
        let mut state = self.lock();
        let now = Utc::now();
        let task = Task::from_draft(self.ids.next_id(), draft, now);
        state.tasks.entry(column).or_default().push(task.clone());

        let actor = state.current_actor();
        self.push_activity(
            &mut state,
            ActivityDraft::new(&actor, ActivityAction::Created)
                .task(&task.id, &task.title)
                .details(format!("Created task in {column}")),
            now,
        );
        self.push_notification(
            &mut state,
            NotificationDraft::new(NotificationKind::Success, format!("New task \"{}\" created", task.title))
                .task(&task.id),
            now,
        );

        debug!(task_id = %task.id, %column, "task created");
        task
    }

    /// Merge `patch` into the task with `task_id`, in place. Returns the updated task.
    pub fn update_task(&self, task_id: &str, patch: TaskPatch) -> Option<Task> {
        let mut state = self.lock();
        let (column, idx) = state.locate(task_id)?;
        let now = Utc::now();

        let updated = {
            let task = &mut state.tasks.get_mut(&column)?[idx];
            patch.apply_to(task);
            task.updated_at = now;
            task.clone()
        };

        let actor = state.current_actor();
        self.push_activity(
            &mut state,
            ActivityDraft::new(&actor, ActivityAction::Updated)
                .task(task_id, &updated.title)
                .details("Updated task details"),
            now,
        );

        debug!(%task_id, %column, "task updated");
        Some(updated)
    }

    /// Remove the task with `task_id`. Returns the removed task.
    pub fn delete_task(&self, task_id: &str) -> Option<Task> {
        let mut state = self.lock();
        let (column, idx) = state.locate(task_id)?;
        let now = Utc::now();
        let removed = state.tasks.get_mut(&column)?.remove(idx);

        let actor = state.current_actor();
        self.push_activity(
            &mut state,
            ActivityDraft::new(&actor, ActivityAction::Deleted)
                .task(task_id, &removed.title)
                .details("Deleted task"),
            now,
        );
        self.push_notification(
            &mut state,
            NotificationDraft::new(NotificationKind::Info, format!("Task \"{}\" deleted", removed.title)).task(task_id),
            now,
        );

        debug!(%task_id, %column, "task deleted");
        Some(removed)
    }

    /// Move a task from `from` to the end of `to`, as the current user.
    ///
    /// The task is looked up in `from` only. Returns the moved task.
    pub fn move_task(&self, task_id: &str, from: ColumnId, to: ColumnId) -> Option<Task> {
        let mut state = self.lock();
        let actor = state.current_actor();
        self.move_locked(&mut state, &actor, task_id, from, to)
    }

    /// `move_task` attributed to `actor` instead of the current user.
    pub(crate) fn move_task_as(&self, actor: &UserRef, task_id: &str, from: ColumnId, to: ColumnId) -> Option<Task> {
        let mut state = self.lock();
        self.move_locked(&mut state, actor, task_id, from, to)
    }

    fn move_locked(
        &self,
        state: &mut BoardState,
        actor: &UserRef,
        task_id: &str,
        from: ColumnId,
        to: ColumnId,
    ) -> Option<Task> {
        if from == to {
            return None;
        }
        let source = state.tasks.get_mut(&from)?;
        let idx = source.iter().position(|t| t.id == task_id)?;

        let now = Utc::now();
        let mut task = source.remove(idx);
        task.updated_at = now;
        state.tasks.entry(to).or_default().push(task.clone());

        self.push_activity(
            state,
            ActivityDraft::new(actor, ActivityAction::Moved)
                .task(task_id, &task.title)
                .columns(from, to)
                .details(format!("Moved from {from} to {to}")),
            now,
        );
        self.push_notification(
            state,
            NotificationDraft::new(NotificationKind::Info, format!("\"{}\" moved to {to}", task.title)).task(task_id),
            now,
        );

        debug!(%task_id, %from, %to, actor = %actor.id, "task moved");
        Some(task)
    }

    // =========================================================================
    // DRAG LIFECYCLE
    // =========================================================================

    pub fn set_dragged_task(&self, dragged: Option<DraggedTask>) {
        self.lock().dragged_task = dragged;
    }

    /// Record `task` as picked up from `source`.
    pub fn begin_drag(&self, task: Task, source: ColumnId) {
        self.set_dragged_task(Some(DraggedTask { task, source_column: source }));
    }

    pub fn end_drag(&self) {
        self.set_dragged_task(None);
    }

    /// Drop the dragged task onto `target`.
    ///
    /// Without a drag in progress, or when `target` is the source column, nothing
    /// changes. Otherwise the task is moved and the drag state cleared.
    pub fn drop_dragged(&self, target: ColumnId) -> Option<Task> {
        let mut state = self.lock();
        let dragged = state.dragged_task.as_ref()?;
        if dragged.source_column == target {
            return None;
        }
        let task_id = dragged.task.id.clone();
        let source = dragged.source_column;

        let actor = state.current_actor();
        let moved = self.move_locked(&mut state, &actor, &task_id, source, target);
        state.dragged_task = None;
        moved
    }

    // =========================================================================
    // LOGS
    // =========================================================================

    /// Prepend an activity, evicting the oldest past the cap.
    pub fn add_activity(&self, draft: ActivityDraft) -> Activity {
        let mut state = self.lock();
        self.push_activity(&mut state, draft, Utc::now())
    }

    /// Prepend a notification, evicting the oldest past the cap.
    pub fn add_notification(&self, draft: NotificationDraft) -> Notification {
        let mut state = self.lock();
        self.push_notification(&mut state, draft, Utc::now())
    }

    /// Prepend `draft` for `task_id`, titled with the task's current title, or
    /// `fallback_title` when the task no longer exists.
    pub(crate) fn add_task_activity(&self, mut draft: ActivityDraft, task_id: &str, fallback_title: &str) -> Activity {
        let mut state = self.lock();
        let title = state
            .locate(task_id)
            .map_or_else(|| fallback_title.to_string(), |(column, idx)| state.tasks[&column][idx].title.clone());
        draft.task_id = Some(task_id.to_string());
        draft.task_title = Some(title);
        self.push_activity(&mut state, draft, Utc::now())
    }

    pub fn clear_notifications(&self) {
        self.lock().notifications.clear();
    }

    /// Remove and return every pending notification, newest first.
    pub fn take_notifications(&self) -> Vec<Notification> {
        self.lock().notifications.drain(..).collect()
    }

    fn push_activity(&self, state: &mut BoardState, draft: ActivityDraft, now: Timestamp) -> Activity {
        let activity = Activity {
            id: self.ids.next_id(),
            user_id: draft.user_id,
            user_name: draft.user_name,
            user_avatar: draft.user_avatar,
            action: draft.action,
            task_id: draft.task_id,
            task_title: draft.task_title,
            from_column: draft.from_column,
            to_column: draft.to_column,
            timestamp: now,
            details: draft.details,
        };
        state.activities.push_front(activity.clone());
        state.activities.truncate(self.config.activity_cap);
        activity
    }

    fn push_notification(&self, state: &mut BoardState, draft: NotificationDraft, now: Timestamp) -> Notification {
        let notification = Notification {
            id: self.ids.next_id(),
            message: draft.message,
            kind: draft.kind,
            timestamp: now,
            user_id: draft.user_id,
            task_id: draft.task_id,
        };
        state.notifications.push_front(notification.clone());
        state.notifications.truncate(self.config.notification_cap);
        notification
    }

    // =========================================================================
    // PRESENCE
    // =========================================================================

    /// Set a user's status and current-activity text.
    ///
    /// Only a transition to `Offline` stamps `last_seen`; `Away` keeps the
    /// previous value.
    pub fn update_user_status(&self, user_id: &str, status: UserStatus, activity: Option<String>) {
        let mut state = self.lock();
        let Some(user) = state.users.iter_mut().find(|u| u.id == user_id) else {
            return;
        };
        user.status = status;
        user.current_activity = activity;
        if status == UserStatus::Offline {
            user.last_seen = Some(Utc::now());
        }
        debug!(%user_id, ?status, "user status updated");
    }

    /// Switch the acting user. The id is not checked against the team.
    pub fn set_current_user(&self, user_id: impl Into<String>) {
        self.lock().current_user_id = user_id.into();
    }

    pub fn set_connected(&self, connected: bool) {
        self.lock().is_connected = connected;
    }

    // =========================================================================
    // SIMULATION
    // =========================================================================

    /// Start a simulated-collaboration timer chain on the current tokio runtime.
    ///
    /// Each call arms an independent chain. Cancel it (or drop the handle) when
    /// the owning view is torn down. Without a runtime the handle comes back
    /// already finished.
    #[must_use = "dropping the handle cancels the simulation"]
    pub fn simulate_collaboration(&self) -> CollaborationHandle {
        simulation::spawn_collaboration(self.clone())
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
