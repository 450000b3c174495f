//! Restriction alarm dispatch.
//!
//! - `dispatch` - one pass over due alarms, turning each into a notification
//! - [`alarm_loop`] - the background task that runs a pass on an interval

mod dispatch;

pub use dispatch::{dispatch_due_alarms, notify_alarm, restriction_return_notification};

use crate::config::AlarmConfig;
use crate::store::ChipStore;
use time::OffsetDateTime;
use tokio::time::{Duration, MissedTickBehavior};

/// Runs [`dispatch_due_alarms`] every `poll_interval_secs` until the task is dropped.
#[tracing::instrument(skip_all)]
pub async fn alarm_loop(store: ChipStore, config: AlarmConfig) {
    let mut interval = tokio::time::interval(Duration::from_secs(config.poll_interval_secs));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(
        name = "alarms.loop.started",
        target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
        message = "Alarm dispatcher started",
        poll_interval_secs = config.poll_interval_secs
    );

    loop {
        interval.tick().await;
        if let Err(e) = dispatch_due_alarms(&store, OffsetDateTime::now_utc()).await {
            tracing::error!(
                name = "alarms.loop.failed",
                target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                error = %e,
                message = "Alarm dispatch pass failed, retrying next tick"
            );
        }
    }
}
