pub mod font;
pub mod layout;
pub mod surface;
pub mod theme;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::metrics::CalendarMetrics;
use font::DotFont;
use layout::GridLayout;
use surface::Canvas;
use theme::to_rgba8;

pub use layout::GRID_COLUMNS;

/// Shape variant used for every week cell. Independent of lived/remaining
/// state: lived weeks get the solid rendition, remaining weeks the
/// outlined one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DotStyle {
    Circle,
    Ring,
    Square,
    Diamond,
}

/// Everything one render pass needs, assembled per call from the user's
/// preferences plus the device screen size. Immutable while rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,

    pub background: [f32; 4],
    pub filled: [f32; 4],
    pub empty: [f32; 4],
    pub label: [f32; 4],

    /// Margin fractions of the canvas dimensions, each in [0, 1]
    pub top_margin: f32,
    pub bottom_margin: f32,
    pub side_margin: f32,
    /// Fraction of the width reserved left of the grid for the vertical label
    pub label_gutter: f32,

    /// Label glyph height as a fraction of the canvas height
    pub label_text_size: f32,
    /// Gap between adjacent cells, pixels
    pub cell_spacing: f32,
    /// Floor for the computed cell size, pixels
    pub min_cell_size: f32,
    /// Outline width for remaining-week shapes, pixels
    pub stroke_width: f32,

    pub dot_style: DotStyle,
    pub show_labels: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let palette = theme::Theme::default();
        Self {
            width: 1080,
            height: 2400,
            background: palette.background,
            filled: palette.filled,
            empty: palette.empty,
            label: palette.label,
            top_margin: 0.07,
            bottom_margin: 0.07,
            side_margin: 0.06,
            label_gutter: 0.05,
            label_text_size: 0.012,
            cell_spacing: 4.0,
            min_cell_size: 3.0,
            stroke_width: 1.5,
            dot_style: DotStyle::Circle,
            show_labels: true,
        }
    }
}

/// Rasterize a full wallpaper image from a metrics snapshot.
///
/// Total over its inputs: a degenerate config produces a cramped but
/// valid image, never an error. Runs in time proportional to the number
/// of weeks rendered plus label characters.
pub fn render_grid(metrics: &CalendarMetrics, config: &RenderConfig) -> RgbaImage {
    let layout = GridLayout::compute(config, metrics.life_expectancy_years);
    log::debug!(
        "grid layout: {}x{} cells of {:.1}px at ({:.1}, {:.1})",
        layout.columns,
        layout.rows,
        layout.cell_size,
        layout.grid_x,
        layout.grid_y
    );

    let mut canvas = Canvas::new(config.width, config.height);
    canvas.fill_background(to_rgba8(config.background));

    let filled = to_rgba8(config.filled);
    let empty = to_rgba8(config.empty);
    let radius = 0.85 * layout.cell_size / 2.0;

    // Row-major: row = year of life, column = week of that year
    for row in 0..layout.rows {
        for column in 0..layout.columns {
            let week_index = row * layout.columns + column;
            let (cx, cy) = layout.cell_center(column, row);
            if week_index < metrics.weeks_lived {
                draw_lived(&mut canvas, config.dot_style, cx, cy, radius, filled);
            } else {
                draw_remaining(
                    &mut canvas,
                    config.dot_style,
                    cx,
                    cy,
                    radius,
                    config.stroke_width,
                    empty,
                );
            }
        }
    }

    if config.show_labels {
        draw_labels(&mut canvas, metrics, config, &layout);
    }

    canvas.finish()
}

fn draw_lived(canvas: &mut Canvas, style: DotStyle, cx: f32, cy: f32, r: f32, color: [u8; 4]) {
    match style {
        DotStyle::Circle => canvas.fill_circle(cx, cy, r, color),
        // A lived ring is drawn heavy so it reads as "on" next to the
        // thin remaining outline
        DotStyle::Ring => canvas.stroke_circle(cx, cy, r * 0.75, r * 0.5, color),
        DotStyle::Square => canvas.fill_square(cx, cy, r, color),
        DotStyle::Diamond => canvas.fill_diamond(cx, cy, r, color),
    }
}

fn draw_remaining(
    canvas: &mut Canvas,
    style: DotStyle,
    cx: f32,
    cy: f32,
    r: f32,
    stroke: f32,
    color: [u8; 4],
) {
    match style {
        DotStyle::Circle | DotStyle::Ring => canvas.stroke_circle(cx, cy, r, stroke, color),
        DotStyle::Square => canvas.stroke_square(cx, cy, r, stroke, color),
        DotStyle::Diamond => canvas.stroke_diamond(cx, cy, r, stroke, color),
    }
}

/// Dot gap inside label text, as a fraction of the dot size.
const LABEL_DOT_GAP: f32 = 0.4;

fn draw_labels(
    canvas: &mut Canvas,
    metrics: &CalendarMetrics,
    config: &RenderConfig,
    layout: &GridLayout,
) {
    let font = DotFont::new();
    let color = to_rgba8(config.label);

    let text_height = (config.height as f32 * config.label_text_size).max(font::GLYPH_ROWS as f32);
    let dot_size = text_height / font::GLYPH_ROWS as f32;
    let spacing = dot_size * LABEL_DOT_GAP;

    // Horizontal labels sit just above the grid
    let baseline_y = layout.grid_y - text_height - 2.0 * dot_size;

    let left_text = "LIFE IN WEEKS";
    font.draw(
        canvas,
        left_text,
        layout.grid_x,
        baseline_y,
        dot_size,
        spacing,
        color,
    );

    let right_text = format!("{:.1}% LIVED", metrics.percentage_lived);
    let right_width = font.measure(&right_text, dot_size, spacing);
    font.draw(
        canvas,
        &right_text,
        layout.grid_x + layout.grid_width - right_width,
        baseline_y,
        dot_size,
        spacing,
        color,
    );

    // Vertical label: rotated 90° CCW, centered on the grid's vertical
    // extent, centered inside the gutter left of the grid
    let side_text = format!("{} YEARS", metrics.life_expectancy_years);
    let side_width = font.measure(&side_text, dot_size, spacing);
    let pivot_x = layout.grid_x - layout.label_gutter / 2.0;
    let pivot_y = layout.grid_y + layout.grid_height / 2.0;
    canvas.set_rotation_ccw(pivot_x, pivot_y);
    font.draw(
        canvas,
        &side_text,
        pivot_x - side_width / 2.0,
        pivot_y - text_height / 2.0,
        dot_size,
        spacing,
        color,
    );
    canvas.clear_rotation();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics;
    use chrono::NaiveDate;

    fn test_metrics() -> CalendarMetrics {
        metrics::calculate(
            NaiveDate::from_ymd_opt(1990, 5, 15).unwrap(),
            80,
            NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_render_produces_canvas_sized_image() {
        let config = RenderConfig {
            width: 540,
            height: 1200,
            ..RenderConfig::default()
        };
        let img = render_grid(&test_metrics(), &config);
        assert_eq!(img.dimensions(), (540, 1200));
    }

    #[test]
    fn test_corners_are_background() {
        let config = RenderConfig::default();
        let img = render_grid(&test_metrics(), &config);
        let bg = to_rgba8(config.background);
        assert_eq!(img.get_pixel(0, 0).0, bg);
        assert_eq!(img.get_pixel(1079, 2399).0, bg);
    }

    #[test]
    fn test_first_cell_is_filled_last_cell_is_not() {
        let config = RenderConfig {
            show_labels: false,
            ..RenderConfig::default()
        };
        let m = test_metrics();
        let layout = GridLayout::compute(&config, m.life_expectancy_years);
        let img = render_grid(&m, &config);

        // Week 0 was lived: its center carries the filled color
        let (cx, cy) = layout.cell_center(0, 0);
        let first = img.get_pixel(cx as u32, cy as u32).0;
        assert_eq!(first, to_rgba8(config.filled));

        // The very last week is in the future: its center is background
        // (circle outline leaves the middle untouched)
        let (cx, cy) = layout.cell_center(layout.columns - 1, layout.rows - 1);
        let last = img.get_pixel(cx as u32, cy as u32).0;
        assert_eq!(last, to_rgba8(config.background));
    }

    #[test]
    fn test_every_dot_style_renders() {
        let m = test_metrics();
        for style in [
            DotStyle::Circle,
            DotStyle::Ring,
            DotStyle::Square,
            DotStyle::Diamond,
        ] {
            let config = RenderConfig {
                width: 400,
                height: 800,
                dot_style: style,
                ..RenderConfig::default()
            };
            let img = render_grid(&m, &config);
            assert_eq!(img.dimensions(), (400, 800));
        }
    }

    #[test]
    fn test_degenerate_canvas_still_renders() {
        // Forces the min-cell-size floor; must not panic or error
        let config = RenderConfig {
            width: 64,
            height: 64,
            ..RenderConfig::default()
        };
        let m = metrics::calculate(
            NaiveDate::from_ymd_opt(1950, 1, 1).unwrap(),
            120,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .unwrap();
        let img = render_grid(&m, &config);
        assert_eq!(img.dimensions(), (64, 64));
    }

    #[test]
    fn test_labels_add_pixels_above_grid() {
        let m = test_metrics();
        let without = render_grid(
            &m,
            &RenderConfig {
                show_labels: false,
                ..RenderConfig::default()
            },
        );
        let with = render_grid(
            &m,
            &RenderConfig {
                show_labels: true,
                ..RenderConfig::default()
            },
        );
        let differing = with
            .pixels()
            .zip(without.pixels())
            .filter(|(a, b)| a != b)
            .count();
        assert!(differing > 0, "labels drew nothing");
    }
}
