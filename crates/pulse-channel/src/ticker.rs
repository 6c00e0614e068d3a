//! Periodic tick broadcasting.
//!
//! Broadcasts a monotonically increasing counter as `tick` events at a
//! fixed interval for the lifetime of the process.

use std::time::Duration;

use tracing::trace;

use crate::channel::{Channel, EVENT_TICK};

/// Run the tick emitter.
///
/// On each firing the current counter value is broadcast, then the
/// counter is incremented, so the first frame carries `0`. Never returns;
/// run it on a spawned task.
pub async fn run_ticker(channel: Channel, interval_ms: u64) {
    let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
    let mut count: u64 = 0;

    loop {
        interval.tick().await;
        channel.broadcast(&count, EVENT_TICK);
        trace!(count, subscribers = channel.session_count(), "Tick broadcast");
        count += 1;
    }
}
