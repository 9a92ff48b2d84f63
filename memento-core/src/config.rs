use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::metrics::{DEFAULT_LIFE_EXPECTANCY, MAX_LIFE_EXPECTANCY, MIN_LIFE_EXPECTANCY};
use crate::render::theme::{Theme, ThemeName};
use crate::render::{DotStyle, RenderConfig};
use crate::wallpaper::WallpaperTarget;

/// Configuration for Memento
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub profile: ProfileConfig,
    pub appearance: AppearanceConfig,
    pub screen: ScreenConfig,
    pub wallpaper: WallpaperConfig,
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Date of birth; must not be in the future at render time
    pub birth_date: NaiveDate,
    /// Assumed lifespan in years, clamped into [50, 120] on load
    pub life_expectancy_years: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppearanceConfig {
    /// Built-in palette
    #[serde(default = "default_theme")]
    pub theme: ThemeName,
    /// Shape drawn for each week cell
    #[serde(default = "default_dot_style")]
    pub dot_style: DotStyle,
    /// Draw the dot-matrix labels around the grid
    #[serde(default = "default_true")]
    pub show_labels: bool,
    /// Margin fractions of the canvas (0.0-1.0)
    #[serde(default = "default_top_margin")]
    pub top_margin: f32,
    #[serde(default = "default_bottom_margin")]
    pub bottom_margin: f32,
    #[serde(default = "default_side_margin")]
    pub side_margin: f32,
    /// Width fraction reserved for the vertical label
    #[serde(default = "default_label_gutter")]
    pub label_gutter: f32,
    /// Label glyph height as a fraction of the canvas height
    #[serde(default = "default_label_text_size")]
    pub label_text_size: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallpaperConfig {
    /// Which wallpaper slot(s) the image is written for
    pub target: WallpaperTarget,
    /// Directory the finished image is written into
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Days between automatic re-renders
    pub interval_days: u64,
}

fn default_theme() -> ThemeName {
    ThemeName::Midnight
}

fn default_dot_style() -> DotStyle {
    DotStyle::Circle
}

fn default_true() -> bool {
    true
}

fn default_top_margin() -> f32 {
    0.07
}

fn default_bottom_margin() -> f32 {
    0.07
}

fn default_side_margin() -> f32 {
    0.06
}

fn default_label_gutter() -> f32 {
    0.05
}

fn default_label_text_size() -> f32 {
    0.012
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: ProfileConfig {
                birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
                life_expectancy_years: DEFAULT_LIFE_EXPECTANCY,
            },
            appearance: AppearanceConfig {
                theme: default_theme(),
                dot_style: default_dot_style(),
                show_labels: true,
                top_margin: default_top_margin(),
                bottom_margin: default_bottom_margin(),
                side_margin: default_side_margin(),
                label_gutter: default_label_gutter(),
                label_text_size: default_label_text_size(),
            },
            screen: ScreenConfig {
                width: 1080,
                height: 2400,
            },
            wallpaper: WallpaperConfig {
                target: WallpaperTarget::Both,
                output_dir: PathBuf::from("~/.local/share/memento"),
            },
            schedule: ScheduleConfig { interval_days: 7 },
        }
    }
}

impl Config {
    /// Load configuration from file, or create default if not exists
    pub fn load(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let config_path = path.unwrap_or_else(Self::default_path);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config.sanitized())
        } else {
            // Create default config
            let config = Config::default();
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = toml::to_string_pretty(&config)?;
            std::fs::write(&config_path, contents)?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<PathBuf>) -> anyhow::Result<()> {
        let config_path = path.unwrap_or_else(Self::default_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Where the config file lives unless overridden
    pub fn default_path() -> PathBuf {
        let mut p = dirs::config_dir().expect("No config directory");
        p.push("memento");
        p.push("config.toml");
        p
    }

    /// Clamp out-of-range values instead of rejecting the file.
    ///
    /// Life expectancy lands in [50, 120]; margin fractions in [0, 1].
    pub fn sanitized(mut self) -> Self {
        self.profile.life_expectancy_years = self
            .profile
            .life_expectancy_years
            .clamp(MIN_LIFE_EXPECTANCY, MAX_LIFE_EXPECTANCY);
        let a = &mut self.appearance;
        a.top_margin = a.top_margin.clamp(0.0, 1.0);
        a.bottom_margin = a.bottom_margin.clamp(0.0, 1.0);
        a.side_margin = a.side_margin.clamp(0.0, 1.0);
        a.label_gutter = a.label_gutter.clamp(0.0, 1.0);
        a.label_text_size = a.label_text_size.clamp(0.0, 1.0);
        self.screen.width = self.screen.width.max(1);
        self.screen.height = self.screen.height.max(1);
        self.schedule.interval_days = self.schedule.interval_days.max(1);
        self
    }

    /// Assemble the per-render value from preferences + screen geometry.
    pub fn render_config(&self) -> RenderConfig {
        let palette = Theme::named(self.appearance.theme);
        RenderConfig {
            width: self.screen.width,
            height: self.screen.height,
            background: palette.background,
            filled: palette.filled,
            empty: palette.empty,
            label: palette.label,
            top_margin: self.appearance.top_margin,
            bottom_margin: self.appearance.bottom_margin,
            side_margin: self.appearance.side_margin,
            label_gutter: self.appearance.label_gutter,
            label_text_size: self.appearance.label_text_size,
            dot_style: self.appearance.dot_style,
            show_labels: self.appearance.show_labels,
            ..RenderConfig::default()
        }
    }
}

mod dirs {
    use std::path::PathBuf;

    pub fn config_dir() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| {
            let mut path = PathBuf::from(home);
            path.push(".config");
            path
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_in_bounds() {
        let config = Config::default();
        assert_eq!(config.profile.life_expectancy_years, 80);
        assert_eq!(config.schedule.interval_days, 7);
        assert!(config.appearance.top_margin > 0.0);
    }

    #[test]
    fn test_sanitize_clamps_life_expectancy() {
        let mut config = Config::default();
        config.profile.life_expectancy_years = 30;
        assert_eq!(config.sanitized().profile.life_expectancy_years, 50);

        let mut config = Config::default();
        config.profile.life_expectancy_years = 200;
        assert_eq!(config.sanitized().profile.life_expectancy_years, 120);
    }

    #[test]
    fn test_sanitize_clamps_margins() {
        let mut config = Config::default();
        config.appearance.top_margin = 1.5;
        config.appearance.side_margin = -0.2;
        let config = config.sanitized();
        assert_eq!(config.appearance.top_margin, 1.0);
        assert_eq!(config.appearance.side_margin, 0.0);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.profile.birth_date, config.profile.birth_date);
        assert_eq!(parsed.appearance.theme, config.appearance.theme);
        assert_eq!(parsed.screen.width, config.screen.width);
    }

    #[test]
    fn test_partial_appearance_section_uses_defaults() {
        let text = r#"
            [profile]
            birth_date = "1985-03-02"
            life_expectancy_years = 90

            [appearance]
            theme = "ember"

            [screen]
            width = 1440
            height = 3200

            [wallpaper]
            target = "home"
            output_dir = "/tmp/memento"

            [schedule]
            interval_days = 7
        "#;
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(config.appearance.theme, ThemeName::Ember);
        assert_eq!(config.appearance.dot_style, DotStyle::Circle);
        assert!(config.appearance.show_labels);
        assert_eq!(config.appearance.top_margin, default_top_margin());
    }

    #[test]
    fn test_render_config_carries_screen_and_palette() {
        let mut config = Config::default();
        config.screen = ScreenConfig {
            width: 720,
            height: 1600,
        };
        config.appearance.theme = ThemeName::Paper;
        let rc = config.render_config();
        assert_eq!(rc.width, 720);
        assert_eq!(rc.height, 1600);
        assert_eq!(rc.background, Theme::paper().background);
    }
}
