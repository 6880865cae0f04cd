use std::sync::Arc;
use std::time::Duration;

use taskboard::feed::describe_activity;
use taskboard::{BoardConfig, BoardStore, ColumnId, Seed, UuidIds, config};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// How often new activity and pending notifications are reported.
const REPORT_INTERVAL_MS: u64 = 500;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let board_config = BoardConfig::from_env();
    let run_for = config::run_duration_from_env();
    let store = BoardStore::new(Seed::demo(), board_config, Arc::new(UuidIds));
    info!(
        users = store.users().len(),
        online = store.online_user_count(),
        run_secs = run_for.map(|d| d.as_secs()),
        "task board ready"
    );
    for column in ColumnId::ALL {
        info!(column = column.title(), tasks = store.get_tasks_by_column(column).len(), "column loaded");
    }

    let simulation = store.simulate_collaboration();

    let deadline = async {
        match run_for {
            Some(duration) => tokio::time::sleep(duration).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(deadline);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut ctrl_c_armed = true;

    let mut ticker = tokio::time::interval(Duration::from_millis(REPORT_INTERVAL_MS));
    let mut last_reported: Option<String> = None;

    loop {
        tokio::select! {
            result = &mut ctrl_c, if ctrl_c_armed => {
                match result {
                    Ok(()) => {
                        info!("interrupt received; shutting down");
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "ctrl-c listener unavailable; relying on BOARD_RUN_SECS");
                        ctrl_c_armed = false;
                    }
                }
            }
            () = &mut deadline => {
                info!("run duration elapsed; shutting down");
                break;
            }
            _ = ticker.tick() => {
                report(&store, &mut last_reported);
            }
        }
    }

    // Teardown: the chain must not outlive the board it drives.
    simulation.shutdown().await;
    report(&store, &mut last_reported);

    match serde_json::to_string_pretty(&store.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => error!(error = %e, "failed to serialize board snapshot"),
    }
}

/// Log activities newer than `last_reported`, oldest first, then drain
/// pending notifications the way a toast layer would.
fn report(store: &BoardStore, last_reported: &mut Option<String>) {
    let activities = store.activities();
    let fresh: Vec<_> = activities
        .iter()
        .take_while(|a| Some(&a.id) != last_reported.as_ref())
        .collect();
    for activity in fresh.iter().rev() {
        info!(activity_id = %activity.id, action = activity.action.as_str(), "{}", describe_activity(activity));
    }
    if let Some(newest) = activities.first() {
        *last_reported = Some(newest.id.clone());
    }

    for notification in store.take_notifications() {
        info!(kind = ?notification.kind, "notification: {}", notification.message);
    }
}
