use image::RgbaImage;

/// CPU raster canvas backing one render pass.
///
/// A plain RGBA byte buffer with the handful of primitives the grid
/// renderer needs: background fill, filled/stroked circles, squares and
/// diamonds, and a save/restore 90° counter-clockwise rotation used for
/// the vertical label. Every write is bounds-checked, so callers can
/// draw past the edges of a degenerate canvas without failing.
pub struct Canvas {
    buffer: Vec<u8>,
    width: u32,
    height: u32,
    /// Pivot of the active 90° CCW rotation, if any
    rotation: Option<(f32, f32)>,
}

impl Canvas {
    /// Create a canvas with an all-transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            buffer: vec![0u8; (width * height * 4) as usize],
            width,
            height,
            rotation: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Flood the whole buffer with an opaque color.
    pub fn fill_background(&mut self, color: [u8; 4]) {
        for pixel in self.buffer.chunks_exact_mut(4) {
            pixel[0] = color[0];
            pixel[1] = color[1];
            pixel[2] = color[2];
            pixel[3] = 255;
        }
    }

    /// Rotate all subsequent drawing 90° counter-clockwise about a pivot.
    pub fn set_rotation_ccw(&mut self, pivot_x: f32, pivot_y: f32) {
        self.rotation = Some((pivot_x, pivot_y));
    }

    /// Restore unrotated drawing.
    pub fn clear_rotation(&mut self) {
        self.rotation = None;
    }

    /// Read back a pixel; (0,0,0,0) outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.buffer[idx],
            self.buffer[idx + 1],
            self.buffer[idx + 2],
            self.buffer[idx + 3],
        ]
    }

    /// Hand the buffer off as an `image` crate bitmap.
    pub fn finish(self) -> RgbaImage {
        RgbaImage::from_raw(self.width, self.height, self.buffer)
            .expect("buffer sized to canvas dimensions")
    }

    /// Blend a pixel with the given coverage in [0, 1].
    ///
    /// Applies the active rotation, bounds-checks, then source-over
    /// blends against the existing pixel.
    fn plot(&mut self, x: f32, y: f32, color: [u8; 4], coverage: f32) {
        if coverage <= 0.0 {
            return;
        }
        let (x, y) = match self.rotation {
            Some((cx, cy)) => (cx + (y - cy), cy - (x - cx)),
            None => (x, y),
        };
        let px = x.floor() as i32;
        let py = y.floor() as i32;
        if px < 0 || py < 0 || px >= self.width as i32 || py >= self.height as i32 {
            return;
        }

        let idx = ((py as u32 * self.width + px as u32) * 4) as usize;
        let alpha = (color[3] as f32 / 255.0) * coverage.min(1.0);
        for channel in 0..3 {
            let src = color[channel] as f32;
            let dst = self.buffer[idx + channel] as f32;
            self.buffer[idx + channel] = (src * alpha + dst * (1.0 - alpha)).round() as u8;
        }
        let dst_a = self.buffer[idx + 3] as f32;
        self.buffer[idx + 3] = (255.0 * alpha + dst_a * (1.0 - alpha)).round() as u8;
    }

    /// Filled circle with a one-pixel feathered edge.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: [u8; 4]) {
        let r = radius.max(0.5);
        let (x0, y0, x1, y1) = bounding_box(cx, cy, r + 1.0);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                let coverage = (r - dist + 0.5).clamp(0.0, 1.0);
                self.plot(x as f32, y as f32, color, coverage);
            }
        }
    }

    /// Circle outline of the given stroke width, feathered on both edges.
    pub fn stroke_circle(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        stroke_width: f32,
        color: [u8; 4],
    ) {
        let r = radius.max(0.5);
        let half_stroke = (stroke_width / 2.0).max(0.5);
        let (x0, y0, x1, y1) = bounding_box(cx, cy, r + half_stroke + 1.0);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                let coverage = (half_stroke - (dist - r).abs() + 0.5).clamp(0.0, 1.0);
                self.plot(x as f32, y as f32, color, coverage);
            }
        }
    }

    /// Axis-aligned filled square centered on (cx, cy).
    pub fn fill_square(&mut self, cx: f32, cy: f32, half_extent: f32, color: [u8; 4]) {
        let h = half_extent.max(0.5);
        let (x0, y0, x1, y1) = bounding_box(cx, cy, h + 1.0);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = (x as f32 + 0.5 - cx).abs();
                let dy = (y as f32 + 0.5 - cy).abs();
                let coverage = (h - dx.max(dy) + 0.5).clamp(0.0, 1.0);
                self.plot(x as f32, y as f32, color, coverage);
            }
        }
    }

    /// Square outline of the given stroke width.
    pub fn stroke_square(
        &mut self,
        cx: f32,
        cy: f32,
        half_extent: f32,
        stroke_width: f32,
        color: [u8; 4],
    ) {
        let h = half_extent.max(0.5);
        let half_stroke = (stroke_width / 2.0).max(0.5);
        let (x0, y0, x1, y1) = bounding_box(cx, cy, h + half_stroke + 1.0);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = (x as f32 + 0.5 - cx).abs();
                let dy = (y as f32 + 0.5 - cy).abs();
                let edge_dist = (dx.max(dy) - h).abs();
                let coverage = (half_stroke - edge_dist + 0.5).clamp(0.0, 1.0);
                self.plot(x as f32, y as f32, color, coverage);
            }
        }
    }

    /// Filled diamond (square rotated 45°) centered on (cx, cy).
    pub fn fill_diamond(&mut self, cx: f32, cy: f32, half_extent: f32, color: [u8; 4]) {
        let h = half_extent.max(0.5);
        let (x0, y0, x1, y1) = bounding_box(cx, cy, h + 1.0);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = (x as f32 + 0.5 - cx).abs();
                let dy = (y as f32 + 0.5 - cy).abs();
                // L1 distance makes the diamond edge
                let coverage = (h - (dx + dy) + 0.5).clamp(0.0, 1.0);
                self.plot(x as f32, y as f32, color, coverage);
            }
        }
    }

    /// Diamond outline of the given stroke width.
    pub fn stroke_diamond(
        &mut self,
        cx: f32,
        cy: f32,
        half_extent: f32,
        stroke_width: f32,
        color: [u8; 4],
    ) {
        let h = half_extent.max(0.5);
        let half_stroke = (stroke_width / 2.0).max(0.5);
        let (x0, y0, x1, y1) = bounding_box(cx, cy, h + half_stroke + 1.0);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = (x as f32 + 0.5 - cx).abs();
                let dy = (y as f32 + 0.5 - cy).abs();
                let edge_dist = ((dx + dy) - h).abs();
                let coverage = (half_stroke - edge_dist + 0.5).clamp(0.0, 1.0);
                self.plot(x as f32, y as f32, color, coverage);
            }
        }
    }
}

/// Integer pixel bounds around a center and reach, unclamped.
///
/// Clamping happens per-pixel in `plot` so rotated drawing still lands
/// where the transform puts it.
fn bounding_box(cx: f32, cy: f32, reach: f32) -> (i32, i32, i32, i32) {
    (
        (cx - reach).floor() as i32,
        (cy - reach).floor() as i32,
        (cx + reach).ceil() as i32,
        (cy + reach).ceil() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_fill_is_opaque() {
        let mut canvas = Canvas::new(8, 8);
        canvas.fill_background([10, 20, 30, 255]);
        assert_eq!(canvas.pixel(0, 0), [10, 20, 30, 255]);
        assert_eq!(canvas.pixel(7, 7), [10, 20, 30, 255]);
    }

    #[test]
    fn test_fill_circle_covers_center_not_corners() {
        let mut canvas = Canvas::new(20, 20);
        canvas.fill_background([0, 0, 0, 255]);
        canvas.fill_circle(10.0, 10.0, 5.0, [255, 255, 255, 255]);

        assert_eq!(canvas.pixel(10, 10), [255, 255, 255, 255]);
        // Corner of the bounding box stays background
        assert_eq!(canvas.pixel(5, 5), [0, 0, 0, 255]);
    }

    #[test]
    fn test_stroke_circle_leaves_center_empty() {
        let mut canvas = Canvas::new(30, 30);
        canvas.fill_background([0, 0, 0, 255]);
        canvas.stroke_circle(15.0, 15.0, 8.0, 2.0, [255, 0, 0, 255]);

        // Center untouched, ring touched
        assert_eq!(canvas.pixel(15, 15), [0, 0, 0, 255]);
        let on_ring = canvas.pixel(23, 15);
        assert!(on_ring[0] > 128);
    }

    #[test]
    fn test_diamond_is_narrower_than_square() {
        let mut square = Canvas::new(20, 20);
        square.fill_background([0, 0, 0, 255]);
        square.fill_square(10.0, 10.0, 5.0, [255, 255, 255, 255]);

        let mut diamond = Canvas::new(20, 20);
        diamond.fill_background([0, 0, 0, 255]);
        diamond.fill_diamond(10.0, 10.0, 5.0, [255, 255, 255, 255]);

        // A point near the square's corner is inside the square but
        // outside the diamond
        assert!(square.pixel(6, 6)[0] > 128);
        assert!(diamond.pixel(6, 6)[0] < 128);
    }

    #[test]
    fn test_out_of_bounds_drawing_is_ignored() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_background([0, 0, 0, 255]);
        canvas.fill_circle(-20.0, -20.0, 5.0, [255, 255, 255, 255]);
        canvas.fill_circle(100.0, 5.0, 8.0, [255, 255, 255, 255]);
        assert_eq!(canvas.pixel(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn test_rotation_maps_right_to_up() {
        let mut canvas = Canvas::new(40, 40);
        canvas.fill_background([0, 0, 0, 255]);

        // With a CCW rotation about (20, 20), a dot drawn to the right of
        // the pivot lands above it
        canvas.set_rotation_ccw(20.0, 20.0);
        canvas.fill_circle(30.0, 20.0, 2.0, [255, 255, 255, 255]);
        canvas.clear_rotation();

        assert!(canvas.pixel(20, 10)[0] > 128);
        assert_eq!(canvas.pixel(30, 20), [0, 0, 0, 255]);
    }

    #[test]
    fn test_finish_hands_off_dimensions() {
        let canvas = Canvas::new(12, 34);
        let img = canvas.finish();
        assert_eq!(img.dimensions(), (12, 34));
    }
}
