//! Display text derived from activities and presence.

use crate::model::{Activity, ActivityAction, Timestamp};

/// Relative age for the activity feed: "just now", "5m ago", "3h ago", "2d ago".
#[must_use]
pub fn format_time_ago(timestamp: Timestamp, now: Timestamp) -> String {
    let secs = (now - timestamp).num_seconds();
    if secs < 60 {
        "just now".to_string()
    } else if secs < 3_600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3_600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}

/// Relative last-seen text for the team sidebar. Empty when never seen;
/// tops out at hours.
#[must_use]
pub fn format_last_seen(last_seen: Option<Timestamp>, now: Timestamp) -> String {
    let Some(last_seen) = last_seen else {
        return String::new();
    };
    let minutes = (now - last_seen).num_minutes();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else {
        format!("{}h ago", minutes / 60)
    }
}

/// Avatar fallback: first letter of each name part.
#[must_use]
pub fn initials(name: &str) -> String {
    name.split_whitespace().filter_map(|part| part.chars().next()).collect()
}

/// One-line summary of an activity, e.g. `Bob Smith moved Fix login from todo to done`.
#[must_use]
pub fn describe_activity(activity: &Activity) -> String {
    let title = activity.task_title.as_deref().unwrap_or_default();
    match (activity.action, activity.from_column, activity.to_column) {
        (ActivityAction::Moved, Some(from), Some(to)) => {
            format!("{} moved {title} from {from} to {to}", activity.user_name)
        }
        (action, _, _) if title.is_empty() => format!("{} {}", activity.user_name, action.as_str()),
        (action, _, _) => format!("{} {} {title}", activity.user_name, action.as_str()),
    }
}

#[cfg(test)]
#[path = "feed_test.rs"]
mod tests;
