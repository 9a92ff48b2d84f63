use anyhow::Result;
use log::{error, info};
use memento_core::Config;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::MissedTickBehavior;

use super::pipeline;

/// Drive the render job: once at startup (the interval's first tick is
/// immediate), then on every interval tick or manual refresh signal,
/// whichever comes first.
///
/// A failed pass (after its internal retry) is logged and the loop keeps
/// going; the next tick gets a fresh chance.
pub async fn run(
    config: Arc<RwLock<Config>>,
    mut refresh: UnboundedReceiver<()>,
) -> Result<()> {
    let mut period_days = config.read().schedule.interval_days;
    let mut interval = make_interval(period_days);
    let mut refresh_closed = false;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                info!("Scheduled render tick");
                render_pass(&config);
            }
            signal = refresh.recv(), if !refresh_closed => {
                match signal {
                    Some(()) => {
                        info!("Manual refresh requested");
                        render_pass(&config);

                        // Preferences may have changed the cadence
                        let days = config.read().schedule.interval_days;
                        if days != period_days {
                            info!("Render interval changed: {}d -> {}d", period_days, days);
                            period_days = days;
                            interval = make_interval(days);
                        }
                    }
                    // Watcher gone; the timer alone wakes us from here on
                    None => refresh_closed = true,
                }
            }
        }
    }
}

fn render_pass(config: &Arc<RwLock<Config>>) {
    let snapshot = config.read().clone();
    if let Err(e) = pipeline::run_with_retry(&snapshot) {
        error!("Render job failed after retry: {e:#}");
    }
}

fn make_interval(days: u64) -> tokio::time::Interval {
    let mut interval = tokio::time::interval(Duration::from_secs(days * 24 * 60 * 60));
    // A missed window (machine asleep past the tick) fires once, then
    // realigns instead of bursting
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
