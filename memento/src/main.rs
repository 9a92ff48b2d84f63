mod app;

use anyhow::Result;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting Memento - your life in weeks, on your wallpaper");

    // Load configuration
    let config = memento_core::Config::load(None)?;
    info!("Loaded configuration: {:?}", config);

    // Create and run the application
    let app = app::App::new(config);
    app.run().await
}
