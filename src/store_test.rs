use super::*;
use crate::model::Priority;
use std::collections::HashSet;
use super::test_helpers::{column_ids, draft, test_store, test_store_with_config};

fn all_task_ids(store: &BoardStore) -> Vec<String> {
    store.tasks().values().flatten().map(|t| t.id.clone()).collect()
}

// =============================================================================
// add_task
// =============================================================================

#[test]
fn add_task_appends_to_end_of_column() {
    let store = test_store();
    let task = store.add_task(ColumnId::Todo, draft("Write release notes"));

    assert_eq!(column_ids(&store, ColumnId::Todo), vec!["1", "2", task.id.as_str()]);
    assert_eq!(task.created_at, task.updated_at);
    assert_eq!(task.title, "Write release notes");
}

#[test]
fn add_task_assigns_unique_ids() {
    let store = test_store();
    for column in ColumnId::ALL {
        store.add_task(column, draft("another"));
        store.add_task(column, draft("another"));
    }
    let ids = all_task_ids(&store);
    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(ids.len(), 10);
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn add_task_records_one_created_activity_and_one_success_notification() {
    let store = test_store();
    let task = store.add_task(ColumnId::Done, draft("Ship it"));

    let activities = store.activities();
    assert_eq!(activities.len(), 1);
    let created = &activities[0];
    assert_eq!(created.action, ActivityAction::Created);
    assert_eq!(created.user_id, "1");
    assert_eq!(created.user_name, "Alice Johnson");
    assert_eq!(created.task_id.as_deref(), Some(task.id.as_str()));
    assert_eq!(created.task_title.as_deref(), Some("Ship it"));
    assert_eq!(created.details.as_deref(), Some("Created task in done"));

    let notifications = store.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Success);
    assert_eq!(notifications[0].message, "New task \"Ship it\" created");
    assert_eq!(notifications[0].task_id.as_deref(), Some(task.id.as_str()));
}

#[test]
fn add_task_accepts_blank_fields() {
    let store = test_store();
    let task = store.add_task(ColumnId::Todo, TaskDraft::default());
    assert_eq!(task.title, "");
    assert!(store.find_task_by_id(&task.id).is_some());
}

#[test]
fn add_task_with_unknown_current_user_attributes_unknown() {
    let store = test_store();
    store.set_current_user("ghost");
    store.add_task(ColumnId::Todo, draft("orphan"));

    let activity = &store.activities()[0];
    assert_eq!(activity.user_id, "ghost");
    assert_eq!(activity.user_name, "Unknown");
    assert_eq!(activity.user_avatar, "");
}

// =============================================================================
// update_task
// =============================================================================

#[test]
fn update_task_merges_in_place_and_refreshes_updated_at() {
    let store = test_store();
    let before = store.find_task_by_id("1").unwrap().task;

    let updated = store
        .update_task("1", TaskPatch { priority: Some(Priority::Low), ..TaskPatch::default() })
        .unwrap();

    assert_eq!(updated.priority, Priority::Low);
    assert_eq!(updated.title, before.title);
    assert_eq!(updated.created_at, before.created_at);
    assert!(updated.updated_at > before.updated_at);
    assert_eq!(column_ids(&store, ColumnId::Todo), vec!["1", "2"]);
}

#[test]
fn update_task_records_updated_activity_without_notification() {
    let store = test_store();
    store.update_task("3", TaskPatch { title: Some("Build nav".into()), ..TaskPatch::default() });

    let activities = store.activities();
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].action, ActivityAction::Updated);
    assert_eq!(activities[0].task_title.as_deref(), Some("Build nav"));
    assert_eq!(activities[0].details.as_deref(), Some("Updated task details"));
    assert!(store.notifications().is_empty());
}

#[test]
fn update_task_never_changes_column() {
    let store = test_store();
    store.update_task("4", TaskPatch { title: Some("still done".into()), ..TaskPatch::default() });
    assert_eq!(store.find_task_by_id("4").unwrap().column, ColumnId::Done);
}

// =============================================================================
// delete_task
// =============================================================================

#[test]
fn delete_task_removes_and_records() {
    let store = test_store();
    let removed = store.delete_task("1").unwrap();

    assert_eq!(removed.title, "Design new landing page");
    assert_eq!(column_ids(&store, ColumnId::Todo), vec!["2"]);
    assert!(store.find_task_by_id("1").is_none());

    let activity = &store.activities()[0];
    assert_eq!(activity.action, ActivityAction::Deleted);
    assert_eq!(activity.task_title.as_deref(), Some("Design new landing page"));

    let notification = &store.notifications()[0];
    assert_eq!(notification.kind, NotificationKind::Info);
    assert_eq!(notification.message, "Task \"Design new landing page\" deleted");
}

// =============================================================================
// Not-found no-ops
// =============================================================================

#[test]
fn missing_task_actions_leave_state_unchanged() {
    let store = test_store();
    store.add_task(ColumnId::Todo, draft("seed a log entry"));
    let before = store.snapshot();

    assert!(store.update_task("999", TaskPatch { title: Some("x".into()), ..TaskPatch::default() }).is_none());
    assert!(store.delete_task("999").is_none());
    assert!(store.move_task("999", ColumnId::Todo, ColumnId::Done).is_none());

    assert_eq!(store.snapshot(), before);
}

#[test]
fn delete_missing_task_scenario() {
    let store = test_store();
    let before = store.snapshot();
    store.delete_task("999");
    let after = store.snapshot();
    assert_eq!(after.tasks, before.tasks);
    assert!(after.activities.is_empty());
    assert!(after.notifications.is_empty());
}

// =============================================================================
// move_task
// =============================================================================

#[test]
fn move_task_scenario_todo_to_in_progress() {
    let store = test_store();
    let before = store.find_task_by_id("2").unwrap().task;

    let moved = store.move_task("2", ColumnId::Todo, ColumnId::InProgress).unwrap();

    assert_eq!(column_ids(&store, ColumnId::Todo), vec!["1"]);
    assert_eq!(column_ids(&store, ColumnId::InProgress), vec!["3", "2"]);
    assert!(moved.updated_at > before.updated_at);
    assert_eq!(store.get_tasks_by_column(ColumnId::InProgress).last().unwrap().updated_at, moved.updated_at);

    let activities = store.activities();
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].action, ActivityAction::Moved);
    assert_eq!(activities[0].task_id.as_deref(), Some("2"));
    assert_eq!(activities[0].from_column, Some(ColumnId::Todo));
    assert_eq!(activities[0].to_column, Some(ColumnId::InProgress));
    assert_eq!(activities[0].details.as_deref(), Some("Moved from todo to in-progress"));

    let notifications = store.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].message, "\"Set up authentication system\" moved to in-progress");
}

#[test]
fn move_task_to_same_column_is_noop() {
    let store = test_store();
    let before = store.snapshot();
    assert!(store.move_task("1", ColumnId::Todo, ColumnId::Todo).is_none());
    assert!(store.move_task("999", ColumnId::Done, ColumnId::Done).is_none());
    assert_eq!(store.snapshot(), before);
}

#[test]
fn move_task_only_looks_in_source_column() {
    let store = test_store();
    let before = store.snapshot();
    // Task 3 lives in in-progress, not todo.
    assert!(store.move_task("3", ColumnId::Todo, ColumnId::Done).is_none());
    assert_eq!(store.snapshot(), before);
}

#[test]
fn move_task_as_attributes_collaborator() {
    let store = test_store();
    let bob = UserRef::from(&store.user("2").unwrap());
    store.move_task_as(&bob, "1", ColumnId::Todo, ColumnId::Done);
    assert_eq!(store.activities()[0].user_name, "Bob Smith");
}

// =============================================================================
// Drag lifecycle
// =============================================================================

#[test]
fn set_dragged_task_round_trips() {
    let store = test_store();
    let task = store.find_task_by_id("3").unwrap().task;
    store.begin_drag(task.clone(), ColumnId::InProgress);

    let dragged = store.dragged_task().unwrap();
    assert_eq!(dragged.task.id, "3");
    assert_eq!(dragged.source_column, ColumnId::InProgress);

    store.end_drag();
    assert!(store.dragged_task().is_none());
}

#[test]
fn drop_dragged_moves_and_clears_drag() {
    let store = test_store();
    let task = store.find_task_by_id("1").unwrap().task;
    store.begin_drag(task, ColumnId::Todo);

    let moved = store.drop_dragged(ColumnId::Done).unwrap();
    assert_eq!(moved.id, "1");
    assert_eq!(column_ids(&store, ColumnId::Done), vec!["4", "1"]);
    assert!(store.dragged_task().is_none());
}

#[test]
fn drop_on_source_column_keeps_drag_state() {
    let store = test_store();
    let task = store.find_task_by_id("1").unwrap().task;
    store.begin_drag(task, ColumnId::Todo);

    assert!(store.drop_dragged(ColumnId::Todo).is_none());
    assert!(store.dragged_task().is_some());
    assert!(store.activities().is_empty());
}

#[test]
fn drop_without_drag_is_noop() {
    let store = test_store();
    let before = store.snapshot();
    assert!(store.drop_dragged(ColumnId::Done).is_none());
    assert_eq!(store.snapshot(), before);
}

// =============================================================================
// Retention
// =============================================================================

#[test]
fn activity_log_is_capped_and_newest_first() {
    let store = test_store();
    for i in 0..60 {
        store.add_task(ColumnId::Todo, draft(&format!("task {i}")));
    }

    let activities = store.activities();
    assert_eq!(activities.len(), 50);
    assert_eq!(activities[0].task_title.as_deref(), Some("task 59"));
    assert_eq!(activities[49].task_title.as_deref(), Some("task 10"));
    assert!(activities.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
}

#[test]
fn notification_queue_is_capped_and_newest_first() {
    let store = test_store();
    for i in 0..15 {
        store.add_task(ColumnId::Todo, draft(&format!("task {i}")));
    }

    let notifications = store.notifications();
    assert_eq!(notifications.len(), 10);
    assert_eq!(notifications[0].message, "New task \"task 14\" created");
    assert_eq!(notifications[9].message, "New task \"task 5\" created");
}

#[test]
fn caps_follow_config() {
    let config = BoardConfig { activity_cap: 3, notification_cap: 1, ..BoardConfig::default() };
    let store = test_store_with_config(config);
    for i in 0..5 {
        store.add_task(ColumnId::Todo, draft(&format!("task {i}")));
    }
    assert_eq!(store.activities().len(), 3);
    assert_eq!(store.notifications().len(), 1);
}

#[test]
fn add_activity_and_notification_assign_id_and_prepend() {
    let store = test_store();
    let actor = UserRef { id: "4".into(), name: "David Wilson".into(), avatar: String::new() };
    let first = store.add_activity(ActivityDraft::new(&actor, ActivityAction::Commented).details("first"));
    let second = store.add_activity(ActivityDraft::new(&actor, ActivityAction::Commented).details("second"));
    assert_ne!(first.id, second.id);
    assert_eq!(store.activities()[0].id, second.id);

    let note = store.add_notification(NotificationDraft::new(NotificationKind::Warning, "heads up"));
    assert_eq!(store.notifications()[0], note);
}

#[test]
fn clear_notifications_empties_queue() {
    let store = test_store();
    store.clear_notifications();
    assert!(store.notifications().is_empty());

    for i in 0..4 {
        store.add_task(ColumnId::Todo, draft(&format!("task {i}")));
    }
    store.clear_notifications();
    assert!(store.notifications().is_empty());
    assert_eq!(store.activities().len(), 4);
}

#[test]
fn take_notifications_drains_newest_first() {
    let store = test_store();
    store.add_task(ColumnId::Todo, draft("a"));
    store.add_task(ColumnId::Todo, draft("b"));

    let taken = store.take_notifications();
    assert_eq!(taken.len(), 2);
    assert_eq!(taken[0].message, "New task \"b\" created");
    assert!(store.notifications().is_empty());
}

#[test]
fn recent_activities_respects_limit() {
    let store = test_store();
    for i in 0..12 {
        store.add_task(ColumnId::Todo, draft(&format!("task {i}")));
    }
    assert_eq!(store.recent_activities().len(), 10);
    let three = store.get_recent_activities(3);
    assert_eq!(three.len(), 3);
    assert_eq!(three[0].task_title.as_deref(), Some("task 11"));
    assert_eq!(store.get_recent_activities(100).len(), 12);
}

// =============================================================================
// Presence
// =============================================================================

#[test]
fn offline_stamps_last_seen() {
    let store = test_store();
    let before_call = Utc::now();
    store.update_user_status("2", UserStatus::Offline, None);

    let bob = store.user("2").unwrap();
    assert_eq!(bob.status, UserStatus::Offline);
    assert!(bob.current_activity.is_none());
    assert!(bob.last_seen.unwrap() >= before_call);
}

#[test]
fn online_and_away_keep_previous_last_seen() {
    let store = test_store();
    let carol_seen = store.user("3").unwrap().last_seen;

    store.update_user_status("3", UserStatus::Online, Some("Reviewing PRs".into()));
    let carol = store.user("3").unwrap();
    assert_eq!(carol.status, UserStatus::Online);
    assert_eq!(carol.current_activity.as_deref(), Some("Reviewing PRs"));
    assert_eq!(carol.last_seen, carol_seen);

    store.update_user_status("1", UserStatus::Away, None);
    assert!(store.user("1").unwrap().last_seen.is_none());
}

#[test]
fn unknown_user_status_update_is_noop() {
    let store = test_store();
    let before = store.snapshot();
    store.update_user_status("999", UserStatus::Offline, None);
    assert_eq!(store.snapshot(), before);
}

#[test]
fn set_current_user_accepts_any_id() {
    let store = test_store();
    store.set_current_user("2");
    assert_eq!(store.current_user_id(), "2");
    store.set_current_user("nobody");
    assert_eq!(store.current_user_id(), "nobody");
}

#[test]
fn collaborators_exclude_current_and_non_online_users() {
    let store = test_store();
    assert_eq!(store.online_user_count(), 3);
    let ids: Vec<String> = store.active_collaborators().into_iter().map(|u| u.id).collect();
    assert_eq!(ids, vec!["2", "4"]);
}

// =============================================================================
// Reads
// =============================================================================

#[test]
fn find_task_by_id_reports_column() {
    let store = test_store();
    let found = store.find_task_by_id("3").unwrap();
    assert_eq!(found.column, ColumnId::InProgress);
    assert_eq!(found.task.title, "Build responsive navigation");
    assert!(store.find_task_by_id("nope").is_none());
}

#[test]
fn get_tasks_by_column_name_handles_unknown_names() {
    let store = test_store();
    assert_eq!(store.get_tasks_by_column_name("done").len(), 1);
    assert!(store.get_tasks_by_column_name("archive").is_empty());
}

#[test]
fn set_tasks_replaces_and_keeps_every_column() {
    let store = test_store();
    let mut tasks = TaskMap::new();
    tasks.insert(ColumnId::Done, store.get_tasks_by_column(ColumnId::Todo));
    store.set_tasks(tasks);

    assert_eq!(column_ids(&store, ColumnId::Done), vec!["1", "2"]);
    assert!(store.get_tasks_by_column(ColumnId::Todo).is_empty());
    assert_eq!(store.tasks().len(), 3);
    assert!(store.activities().is_empty());
}

#[test]
fn snapshot_reflects_seed_flags() {
    let store = test_store();
    let snapshot = store.snapshot();
    assert!(snapshot.is_connected);
    assert_eq!(snapshot.active_users, vec!["1", "2", "4"]);
    assert!(snapshot.dragged_task.is_none());

    store.set_connected(false);
    assert!(!store.is_connected());
}

#[test]
fn snapshot_serializes_column_keys() {
    let store = test_store();
    let value = serde_json::to_value(store.snapshot()).unwrap();
    assert_eq!(value["tasks"]["in-progress"][0]["id"], "3");
    assert_eq!(value["currentUserId"], "1");
}

#[test]
fn clones_share_state() {
    let store = test_store();
    let other = store.clone();
    other.delete_task("4");
    assert!(store.get_tasks_by_column(ColumnId::Done).is_empty());
}

#[test]
fn add_task_activity_resolves_title_under_one_lock() {
    let store = test_store();
    let actor = UserRef { id: "2".into(), name: "Bob Smith".into(), avatar: String::new() };

    let live = store.add_task_activity(ActivityDraft::new(&actor, ActivityAction::Commented), "3", "Task");
    assert_eq!(live.task_id.as_deref(), Some("3"));
    assert_eq!(live.task_title.as_deref(), Some("Build responsive navigation"));

    store.delete_task("3");
    let gone = store.add_task_activity(ActivityDraft::new(&actor, ActivityAction::Commented), "3", "Task");
    assert_eq!(gone.task_title.as_deref(), Some("Task"));
    assert_eq!(store.activities()[0], gone);
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn concurrent_actions_keep_logs_in_timestamp_order() {
    let config = BoardConfig { activity_cap: 1_000_000, notification_cap: 1_000_000, ..BoardConfig::default() };
    let store = test_store_with_config(config);

    let workers: Vec<_> = (0..8)
        .map(|worker| {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 0..500 {
                    let task = store.add_task(ColumnId::Todo, draft(&format!("w{worker} t{i}")));
                    if i % 5 == 0 {
                        store.update_task(&task.id, TaskPatch { priority: Some(Priority::High), ..TaskPatch::default() });
                    }
                    if i % 7 == 0 {
                        store.delete_task(&task.id);
                    }
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let snapshot = store.snapshot();
    assert!(snapshot.activities.len() > 4_000);
    let activity_inversions = snapshot
        .activities
        .iter()
        .zip(snapshot.activities.iter().skip(1))
        .filter(|(newer, older)| newer.timestamp < older.timestamp)
        .count();
    assert_eq!(activity_inversions, 0);

    let notification_inversions = snapshot
        .notifications
        .iter()
        .zip(snapshot.notifications.iter().skip(1))
        .filter(|(newer, older)| newer.timestamp < older.timestamp)
        .count();
    assert_eq!(notification_inversions, 0);

    let todo = &snapshot.tasks[&ColumnId::Todo];
    assert!(todo.windows(2).all(|w| w[0].created_at <= w[1].created_at));
}
