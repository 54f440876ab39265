use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};

use crate::api::{recent_activity, ApiClient};
use crate::models::ActivityItem;

/// Poll recent activity every `every`, handing each batch to `on_batch`.
///
/// The first poll happens immediately. Failed polls are logged and
/// skipped. Stops after `max_polls` polls, or never when `None`.
pub async fn watch_activity<F>(
    client: &ApiClient,
    every: Duration,
    limit: usize,
    max_polls: Option<usize>,
    mut on_batch: F,
) where
    F: FnMut(&[ActivityItem]),
{
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut polls = 0usize;
    loop {
        if max_polls.is_some_and(|max| polls >= max) {
            break;
        }
        ticker.tick().await;
        polls += 1;
        match recent_activity(client, limit).await {
            Ok(items) => on_batch(&items),
            Err(e) => tracing::warn!(error = %e, "Failed to load recent activity"),
        }
    }
}
