pub mod config;
pub mod metrics;
pub mod render;
pub mod wallpaper;

pub use config::Config;
pub use metrics::{CalendarMetrics, MetricsError};
pub use render::{render_grid, DotStyle, RenderConfig};
pub use wallpaper::{FileSink, SetOutcome, WallpaperSink, WallpaperTarget};
