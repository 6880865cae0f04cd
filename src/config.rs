//! Board tuning knobs, loaded from environment variables.
//!
//! Every key is optional; a missing or unparseable value falls back to its
//! default. Delay ranges given with min > max are swapped.

use std::ops::RangeInclusive;
use std::time::Duration;

pub const DEFAULT_ACTIVITY_CAP: usize = 50;
pub const DEFAULT_NOTIFICATION_CAP: usize = 10;
pub const DEFAULT_RECENT_ACTIVITY_LIMIT: usize = 10;
pub const DEFAULT_SIM_INITIAL_DELAY_MIN_MS: u64 = 1_000;
pub const DEFAULT_SIM_INITIAL_DELAY_MAX_MS: u64 = 4_000;
pub const DEFAULT_SIM_REPEAT_DELAY_MIN_MS: u64 = 5_000;
pub const DEFAULT_SIM_REPEAT_DELAY_MAX_MS: u64 = 15_000;
pub const DEFAULT_RUN_SECS: u64 = 0;

/// Retention caps and default read limits for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Activity log length before the oldest entries are evicted.
    pub activity_cap: usize,
    /// Notification queue length before the oldest entries are evicted.
    pub notification_cap: usize,
    /// Default `limit` for `BoardStore::recent_activities`.
    pub recent_activity_limit: usize,
    pub simulation: SimulationConfig,
}

/// Timer ranges for the collaboration loop, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Delay before a chosen action is applied.
    pub initial_delay_ms: RangeInclusive<u64>,
    /// Delay between an applied action and the next cycle.
    pub repeat_delay_ms: RangeInclusive<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            activity_cap: DEFAULT_ACTIVITY_CAP,
            notification_cap: DEFAULT_NOTIFICATION_CAP,
            recent_activity_limit: DEFAULT_RECENT_ACTIVITY_LIMIT,
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: DEFAULT_SIM_INITIAL_DELAY_MIN_MS..=DEFAULT_SIM_INITIAL_DELAY_MAX_MS,
            repeat_delay_ms: DEFAULT_SIM_REPEAT_DELAY_MIN_MS..=DEFAULT_SIM_REPEAT_DELAY_MAX_MS,
        }
    }
}

impl BoardConfig {
    /// Build config from environment variables.
    ///
    /// - `BOARD_ACTIVITY_CAP`: default 50
    /// - `BOARD_NOTIFICATION_CAP`: default 10
    /// - `BOARD_RECENT_ACTIVITY_LIMIT`: default 10
    /// - `SIM_INITIAL_DELAY_MIN_MS` / `SIM_INITIAL_DELAY_MAX_MS`: default 1000 / 4000
    /// - `SIM_REPEAT_DELAY_MIN_MS` / `SIM_REPEAT_DELAY_MAX_MS`: default 5000 / 15000
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            activity_cap: lookup_parse(&lookup, "BOARD_ACTIVITY_CAP", DEFAULT_ACTIVITY_CAP),
            notification_cap: lookup_parse(&lookup, "BOARD_NOTIFICATION_CAP", DEFAULT_NOTIFICATION_CAP),
            recent_activity_limit: lookup_parse(&lookup, "BOARD_RECENT_ACTIVITY_LIMIT", DEFAULT_RECENT_ACTIVITY_LIMIT),
            simulation: SimulationConfig {
                initial_delay_ms: ordered_range(
                    lookup_parse(&lookup, "SIM_INITIAL_DELAY_MIN_MS", DEFAULT_SIM_INITIAL_DELAY_MIN_MS),
                    lookup_parse(&lookup, "SIM_INITIAL_DELAY_MAX_MS", DEFAULT_SIM_INITIAL_DELAY_MAX_MS),
                ),
                repeat_delay_ms: ordered_range(
                    lookup_parse(&lookup, "SIM_REPEAT_DELAY_MIN_MS", DEFAULT_SIM_REPEAT_DELAY_MIN_MS),
                    lookup_parse(&lookup, "SIM_REPEAT_DELAY_MAX_MS", DEFAULT_SIM_REPEAT_DELAY_MAX_MS),
                ),
            },
        }
    }
}

/// How long the demo host runs before tearing down. `None` runs until Ctrl-C.
#[must_use]
pub fn run_duration_from_env() -> Option<Duration> {
    match env_parse("BOARD_RUN_SECS", DEFAULT_RUN_SECS) {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn lookup_parse<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn ordered_range(a: u64, b: u64) -> RangeInclusive<u64> {
    if a <= b { a..=b } else { b..=a }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
