/// Grid layout computation for the week grid
///
/// This module turns a canvas size plus margin fractions into concrete
/// pixel geometry:
/// - Margins and the label gutter as fractions of the canvas dimensions
/// - Square cell sizing bound by whichever axis runs out of room first
/// - Horizontal centering over the full canvas, shifted by half the
///   label gutter so the grid-plus-gutter block reads as centered
/// - Vertical centering inside the band between top and bottom margins
///
/// All math is f32; cell centers are handed to the rasterizer as-is and
/// rounded only at pixel level.
use crate::render::RenderConfig;

/// Fixed number of columns: one per week of a (simplified) year.
pub const GRID_COLUMNS: u32 = 52;

/// Resolved pixel geometry for one render pass. Derived, never persisted.
#[derive(Debug, Clone, Copy)]
pub struct GridLayout {
    /// Left edge of the grid's first column
    pub grid_x: f32,
    /// Top edge of the grid's first row
    pub grid_y: f32,
    pub grid_width: f32,
    pub grid_height: f32,
    pub cell_size: f32,
    pub cell_spacing: f32,
    pub columns: u32,
    pub rows: u32,
    /// Width of the reserved vertical-label region left of the grid
    pub label_gutter: f32,
}

impl GridLayout {
    /// Compute the layout for a given number of rows (years of life).
    ///
    /// Total over its inputs: a canvas too small for the requested grid
    /// still yields a layout, with `cell_size` floored at the configured
    /// minimum (the grid may then overrun its margins, which the drawing
    /// code tolerates via per-pixel bounds checks).
    pub fn compute(config: &RenderConfig, rows: u32) -> Self {
        let rows = rows.max(1);
        let canvas_w = config.width as f32;
        let canvas_h = config.height as f32;

        let top_margin = canvas_h * config.top_margin;
        let bottom_margin = canvas_h * config.bottom_margin;
        let side_margin = canvas_w * config.side_margin;
        let label_gutter = canvas_w * config.label_gutter;

        let available_w = canvas_w - 2.0 * side_margin - label_gutter;
        let available_h = canvas_h - top_margin - bottom_margin;

        let spacing = config.cell_spacing;
        let cell_from_width =
            (available_w - (GRID_COLUMNS - 1) as f32 * spacing) / GRID_COLUMNS as f32;
        let cell_from_height = (available_h - (rows - 1) as f32 * spacing) / rows as f32;

        // Cells stay square: the binding axis decides, floored at the minimum
        let cell_size = cell_from_width.min(cell_from_height).max(config.min_cell_size);

        let grid_width = GRID_COLUMNS as f32 * cell_size + (GRID_COLUMNS - 1) as f32 * spacing;
        let grid_height = rows as f32 * cell_size + (rows - 1) as f32 * spacing;

        // Center over the full canvas width, then shift right by half the
        // gutter so the visual block (gutter + grid) is balanced
        let grid_x = (canvas_w - grid_width) / 2.0 + label_gutter / 2.0;
        // Vertical centering happens inside the margin band, not the canvas
        let grid_y = top_margin + (available_h - grid_height) / 2.0;

        Self {
            grid_x,
            grid_y,
            grid_width,
            grid_height,
            cell_size,
            cell_spacing: spacing,
            columns: GRID_COLUMNS,
            rows,
            label_gutter,
        }
    }

    /// Center of the cell at (column, row), in canvas pixels.
    #[inline]
    pub fn cell_center(&self, column: u32, row: u32) -> (f32, f32) {
        let pitch = self.cell_size + self.cell_spacing;
        let x = self.grid_x + column as f32 * pitch + self.cell_size / 2.0;
        let y = self.grid_y + row as f32 * pitch + self.cell_size / 2.0;
        (x, y)
    }
}
