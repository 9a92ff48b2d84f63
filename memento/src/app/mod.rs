mod pipeline;
mod scheduler;
mod watcher;

use anyhow::Result;
use memento_core::Config;
use parking_lot::RwLock;
use std::sync::Arc;

/// The long-running wallpaper job: a scheduler ticking on a multi-day
/// cadence plus a config watcher that triggers immediate refreshes.
pub struct App {
    config: Arc<RwLock<Config>>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    pub async fn run(self) -> Result<()> {
        let (refresh_tx, refresh_rx) = tokio::sync::mpsc::unbounded_channel();

        // Watcher must stay alive for the lifetime of the scheduler loop
        let _watcher = watcher::watch_config(self.config.clone(), refresh_tx)?;

        scheduler::run(self.config, refresh_rx).await
    }
}
