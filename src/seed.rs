//! Fixed starting data for a fresh board.
//!
//! Four tasks spread across the three columns and four team members, one
//! of whom (`"1"`, Alice) is the local user.

use chrono::{Duration, Utc};

use crate::model::{ColumnId, Priority, Task, TaskMap, Timestamp, User, UserRef, UserStatus};

/// Initial board contents handed to `BoardStore::new`.
#[derive(Debug, Clone)]
pub struct Seed {
    pub tasks: TaskMap,
    pub users: Vec<User>,
    pub current_user_id: String,
    pub active_users: Vec<String>,
    pub is_connected: bool,
}

impl Seed {
    /// The demo team board.
    #[must_use]
    pub fn demo() -> Self {
        let users = demo_users(Utc::now());

        let mut tasks = TaskMap::new();
        tasks.insert(
            ColumnId::Todo,
            vec![
                seed_task(
                    "1",
                    "Design new landing page",
                    "Create wireframes and mockups for the new product landing page",
                    &["Design", "UI/UX"],
                    &users[0],
                    "2024-01-15",
                    Priority::High,
                    "2024-01-01T10:00:00Z",
                ),
                seed_task(
                    "2",
                    "Set up authentication system",
                    "Implement user login and registration with JWT tokens",
                    &["Backend", "Security"],
                    &users[1],
                    "2024-01-20",
                    Priority::Medium,
                    "2024-01-01T11:00:00Z",
                ),
            ],
        );
        tasks.insert(
            ColumnId::InProgress,
            vec![seed_task(
                "3",
                "Build responsive navigation",
                "Create mobile-friendly navigation component with hamburger menu",
                &["Frontend", "React"],
                &users[2],
                "2024-01-12",
                Priority::High,
                "2024-01-01T12:00:00Z",
            )],
        );
        tasks.insert(
            ColumnId::Done,
            vec![seed_task(
                "4",
                "Project setup and configuration",
                "Initialize Next.js project with TypeScript and Tailwind CSS",
                &["Setup", "Config"],
                &users[3],
                "2024-01-08",
                Priority::Low,
                "2024-01-01T09:00:00Z",
            )],
        );

        Self {
            tasks,
            users,
            current_user_id: "1".into(),
            active_users: vec!["1".into(), "2".into(), "4".into()],
            is_connected: true,
        }
    }

    /// A board with empty columns and the given team.
    #[must_use]
    pub fn empty(users: Vec<User>, current_user_id: impl Into<String>) -> Self {
        let tasks = ColumnId::ALL.into_iter().map(|column| (column, Vec::new())).collect();
        let active_users = users
            .iter()
            .filter(|u| u.status == UserStatus::Online)
            .map(|u| u.id.clone())
            .collect();
        Self { tasks, users, current_user_id: current_user_id.into(), active_users, is_connected: true }
    }
}

fn demo_users(now: Timestamp) -> Vec<User> {
    vec![
        online("1", "Alice Johnson", "/diverse-woman-portrait.png", "Reviewing designs"),
        online("2", "Bob Smith", "/thoughtful-man.png", "Working on backend"),
        User {
            id: "3".into(),
            name: "Carol Davis".into(),
            avatar: "/woman-developer.png".into(),
            status: UserStatus::Away,
            current_activity: None,
            last_seen: Some(now - Duration::minutes(5)),
        },
        online("4", "David Wilson", "/man-developer.png", "Testing features"),
    ]
}

fn online(id: &str, name: &str, avatar: &str, activity: &str) -> User {
    User {
        id: id.into(),
        name: name.into(),
        avatar: avatar.into(),
        status: UserStatus::Online,
        current_activity: Some(activity.into()),
        last_seen: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_task(
    id: &str,
    title: &str,
    description: &str,
    tags: &[&str],
    assignee: &User,
    due_date: &str,
    priority: Priority,
    created_at: &str,
) -> Task {
    // Seed literals are fixed RFC 3339 strings.
    let created_at: Timestamp = created_at.parse().unwrap_or_default();
    Task {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
        assignee: UserRef::from(assignee),
        due_date: due_date.into(),
        priority,
        created_at,
        updated_at: created_at,
    }
}

#[cfg(test)]
#[path = "seed_test.rs"]
mod tests;
