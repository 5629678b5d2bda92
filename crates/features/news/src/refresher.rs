use crate::feed::TrustedFeed;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Refreshes `feed` every `period` until `shutdown` flips to `true` or its sender drops.
///
/// The first refresh runs immediately.
pub fn spawn_refresher(
    feed: TrustedFeed,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(period_secs = period.as_secs(), "Trusted feed refresher started");
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let added = feed.refresh().await;
                    debug!(added = added.len(), cached = feed.len(), "Scheduled feed refresh");
                },
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                },
            }
        }

        info!("Trusted feed refresher stopped");
    })
}
