use anyhow::{Context, Result};
use log::{info, warn};
use memento_core::Config;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Watch the config file and turn preference edits into refresh signals.
///
/// On a relevant filesystem event the file is reloaded; a parse failure
/// keeps the previous config and logs, so a half-saved edit never kills
/// the running job. The returned watcher must be kept alive.
pub fn watch_config(
    config: Arc<RwLock<Config>>,
    refresh: UnboundedSender<()>,
) -> Result<RecommendedWatcher> {
    let config_path = Config::default_path();
    let watch_dir = config_path
        .parent()
        .context("config path has no parent directory")?
        .to_path_buf();

    let file_name = config_path.file_name().map(|n| n.to_os_string());
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        match res {
            Ok(event) => {
                let touches_config = event.paths.iter().any(|p| p.file_name() == file_name.as_deref());
                let relevant = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_)
                );
                if !(touches_config && relevant) {
                    return;
                }
                match Config::load(None) {
                    Ok(new_config) => {
                        *config.write() = new_config;
                        let _ = refresh.send(());
                    }
                    Err(e) => warn!("Ignoring unreadable config change: {e:#}"),
                }
            }
            Err(e) => warn!("Config watcher error: {}", e),
        }
    })?;

    // Watch the directory, not the file: editors replace the file on save
    watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;
    info!("Watching {} for preference changes", config_path.display());

    Ok(watcher)
}
