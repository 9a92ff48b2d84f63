use serde::{Deserialize, Serialize};

/// Color palette for the wallpaper
///
/// Colors are normalized RGBA (0.0-1.0); the rasterizer converts to
/// 8-bit channels once per render pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Theme {
    /// Canvas background
    pub background: [f32; 4],
    /// Weeks already lived
    pub filled: [f32; 4],
    /// Weeks remaining (outline shapes)
    pub empty: [f32; 4],
    /// Label text
    pub label: [f32; 4],
}

/// Built-in palette selector used by the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    Midnight,
    Paper,
    Ember,
    Forest,
}

impl Default for Theme {
    fn default() -> Self {
        Self::midnight()
    }
}

impl Theme {
    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Midnight => Self::midnight(),
            ThemeName::Paper => Self::paper(),
            ThemeName::Ember => Self::ember(),
            ThemeName::Forest => Self::forest(),
        }
    }

    /// Near-black blue with cool grey dots
    pub fn midnight() -> Self {
        Self {
            background: Self::hex_to_rgba("#0E0E14", 1.0), // deep blue-black
            filled: Self::hex_to_rgba("#C0CAF5", 1.0),     // light blue-white
            empty: Self::hex_to_rgba("#3B4261", 1.0),      // muted slate
            label: Self::hex_to_rgba("#7AA2F7", 1.0),      // accent blue
        }
    }

    /// Light theme: warm paper with ink dots
    pub fn paper() -> Self {
        Self {
            background: Self::hex_to_rgba("#F5F0E6", 1.0),
            filled: Self::hex_to_rgba("#2B2620", 1.0),
            empty: Self::hex_to_rgba("#B8AE9C", 1.0),
            label: Self::hex_to_rgba("#8A6D3B", 1.0),
        }
    }

    /// Dark charcoal with amber accents
    pub fn ember() -> Self {
        Self {
            background: Self::hex_to_rgba("#16130F", 1.0),
            filled: Self::hex_to_rgba("#F2A65A", 1.0),
            empty: Self::hex_to_rgba("#4A3B2A", 1.0),
            label: Self::hex_to_rgba("#D96C2C", 1.0),
        }
    }

    /// Deep green with sage dots
    pub fn forest() -> Self {
        Self {
            background: Self::hex_to_rgba("#0D1410", 1.0),
            filled: Self::hex_to_rgba("#A3C9A8", 1.0),
            empty: Self::hex_to_rgba("#32463A", 1.0),
            label: Self::hex_to_rgba("#69A578", 1.0),
        }
    }

    /// Convert hex color to normalized RGBA
    pub fn hex_to_rgba(hex: &str, alpha: f32) -> [f32; 4] {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return [0.0, 0.0, 0.0, alpha];
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0) as f32 / 255.0;
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0) as f32 / 255.0;
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0) as f32 / 255.0;

        [r, g, b, alpha]
    }
}

/// Normalized RGBA to 8-bit channels for the raster buffer.
pub fn to_rgba8(color: [f32; 4]) -> [u8; 4] {
    [
        (color[0].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[1].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[2].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[3].clamp(0.0, 1.0) * 255.0).round() as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgba() {
        let color = Theme::hex_to_rgba("#FF8800", 1.0);
        assert!((color[0] - 1.0).abs() < 0.01); // Red channel
        assert!((color[1] - 0.533).abs() < 0.01); // Green channel (~136/255)
        assert!((color[2] - 0.0).abs() < 0.01); // Blue channel
        assert_eq!(color[3], 1.0); // Alpha
    }

    #[test]
    fn test_hex_to_rgba_malformed_falls_back_to_black() {
        assert_eq!(Theme::hex_to_rgba("#FFF", 0.5), [0.0, 0.0, 0.0, 0.5]);
        assert_eq!(Theme::hex_to_rgba("garbage", 1.0), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_midnight_is_dark_paper_is_light() {
        let midnight = Theme::midnight();
        assert!(midnight.background[0] < 0.2);
        assert!(midnight.background[1] < 0.2);
        assert!(midnight.background[2] < 0.2);

        let paper = Theme::paper();
        assert!(paper.background[0] > 0.8);
    }

    #[test]
    fn test_named_covers_all_variants() {
        for name in [
            ThemeName::Midnight,
            ThemeName::Paper,
            ThemeName::Ember,
            ThemeName::Forest,
        ] {
            let theme = Theme::named(name);
            assert!(theme.background[3] > 0.99);
        }
    }

    #[test]
    fn test_to_rgba8_rounds_and_clamps() {
        assert_eq!(to_rgba8([1.0, 0.0, 0.5, 1.0]), [255, 0, 128, 255]);
        assert_eq!(to_rgba8([2.0, -1.0, 0.0, 1.0]), [255, 0, 0, 255]);
    }
}
