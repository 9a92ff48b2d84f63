use anyhow::Result;
use chrono::Local;
use log::{info, warn};
use memento_core::wallpaper::{FileSink, SetOutcome, WallpaperSink};
use memento_core::{metrics, render, Config};

/// One full pass: metrics → render → wallpaper sink.
pub fn run_once(config: &Config) -> Result<()> {
    let today = Local::now().date_naive();
    let metrics = metrics::calculate(
        config.profile.birth_date,
        config.profile.life_expectancy_years,
        today,
    )?;
    info!(
        "Week {} of year {}: {} weeks lived, {} remaining ({:.1}%)",
        metrics.current_week_of_year,
        metrics.current_year_of_life,
        metrics.weeks_lived,
        metrics.weeks_remaining,
        metrics.percentage_lived
    );

    let image = render::render_grid(&metrics, &config.render_config());

    let sink = FileSink::new(&config.wallpaper.output_dir);
    match sink.set(&image, config.wallpaper.target) {
        SetOutcome::Applied => Ok(()),
        SetOutcome::Rejected(msg) => Err(anyhow::anyhow!("wallpaper sink rejected image: {msg}")),
    }
    // `image` is dropped here; nothing keeps the full-screen buffer alive
    // between runs
}

/// Run the pipeline, retrying the whole thing exactly once on failure.
pub fn run_with_retry(config: &Config) -> Result<()> {
    match run_once(config) {
        Ok(()) => Ok(()),
        Err(e) => {
            warn!("Render pipeline failed, retrying once: {e:#}");
            run_once(config)
        }
    }
}
