/// Dot-matrix label renderer
///
/// Each glyph is a fixed grid of on/off cells, at most 5 columns wide and
/// exactly 7 rows tall, drawn as one filled dot per on-cell. Measuring
/// and drawing share a single advance routine so right-aligned and
/// centered labels line up exactly with what gets drawn.
use std::collections::HashMap;

use crate::render::surface::Canvas;

/// Rows per glyph. Every pattern in the table has exactly this many rows.
pub const GLYPH_ROWS: usize = 7;

/// Dots a space advances by (no dots drawn).
const SPACE_DOTS: f32 = 2.0;

/// On/off cell grid for one character; `'#'` marks a dot.
#[derive(Debug, Clone, Copy)]
pub struct GlyphPattern {
    pub width: usize,
    pub rows: &'static [&'static str],
}

/// Marker drawn for characters missing from the table.
const GLYPH_UNKNOWN: &[&str] = &[
    "####",
    "#..#",
    "#..#",
    "#..#",
    "#..#",
    "#..#",
    "####",
];

/// Immutable character table built once per font value.
pub struct DotFont {
    glyphs: HashMap<char, GlyphPattern>,
    placeholder: GlyphPattern,
}

impl Default for DotFont {
    fn default() -> Self {
        Self::new()
    }
}

impl DotFont {
    pub fn new() -> Self {
        let mut glyphs = HashMap::new();
        for &(c, rows) in GLYPH_TABLE {
            glyphs.insert(
                c,
                GlyphPattern {
                    width: rows[0].len(),
                    rows,
                },
            );
        }
        Self {
            glyphs,
            placeholder: GlyphPattern {
                width: GLYPH_UNKNOWN[0].len(),
                rows: GLYPH_UNKNOWN,
            },
        }
    }

    /// Look up a character's pattern; unknown characters resolve to the
    /// placeholder, never an error.
    pub fn glyph(&self, c: char) -> GlyphPattern {
        let c = c.to_ascii_uppercase();
        *self.glyphs.get(&c).unwrap_or(&self.placeholder)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Pixel height of a rendered line at the given dot size.
    pub fn line_height(dot_size: f32) -> f32 {
        GLYPH_ROWS as f32 * dot_size
    }

    /// Pixel width `text` will occupy when drawn. Sums the exact advances
    /// `draw` uses.
    pub fn measure(&self, text: &str, dot_size: f32, spacing: f32) -> f32 {
        text.chars()
            .map(|c| self.advance(c, dot_size, spacing))
            .sum()
    }

    /// Draw `text` with its top-left corner at (x, y).
    pub fn draw(
        &self,
        canvas: &mut Canvas,
        text: &str,
        x: f32,
        y: f32,
        dot_size: f32,
        spacing: f32,
        color: [u8; 4],
    ) {
        let mut cursor = x;
        for c in text.chars() {
            if c != ' ' {
                self.draw_glyph(canvas, self.glyph(c), cursor, y, dot_size, color);
            }
            cursor += self.advance(c, dot_size, spacing);
        }
    }

    /// Per-character advance shared by `measure` and `draw`: glyph width
    /// in dots times the dot size, plus the dot gap, plus one
    /// inter-character gap. A space advances by a flat 2 dots + gap.
    fn advance(&self, c: char, dot_size: f32, spacing: f32) -> f32 {
        if c == ' ' {
            SPACE_DOTS * dot_size + spacing
        } else {
            self.glyph(c).width as f32 * dot_size + spacing + spacing
        }
    }

    fn draw_glyph(
        &self,
        canvas: &mut Canvas,
        pattern: GlyphPattern,
        x: f32,
        y: f32,
        dot_size: f32,
        color: [u8; 4],
    ) {
        let radius = dot_size / 2.0;
        for (row, cells) in pattern.rows.iter().enumerate() {
            for (col, cell) in cells.bytes().enumerate() {
                if cell == b'#' {
                    let cx = x + col as f32 * dot_size + radius;
                    let cy = y + row as f32 * dot_size + radius;
                    canvas.fill_circle(cx, cy, radius, color);
                }
            }
        }
    }
}

/// The full repertoire: A–Z, 0–9, '%', '.', '-'. Widths vary per glyph.
#[rustfmt::skip]
const GLYPH_TABLE: &[(char, &[&str])] = &[
    ('A', &[
        ".###.",
        "#...#",
        "#...#",
        "#####",
        "#...#",
        "#...#",
        "#...#",
    ]),
    ('B', &[
        "####.",
        "#...#",
        "#...#",
        "####.",
        "#...#",
        "#...#",
        "####.",
    ]),
    ('C', &[
        ".###.",
        "#...#",
        "#....",
        "#....",
        "#....",
        "#...#",
        ".###.",
    ]),
    ('D', &[
        "####.",
        "#...#",
        "#...#",
        "#...#",
        "#...#",
        "#...#",
        "####.",
    ]),
    ('E', &[
        "#####",
        "#....",
        "#....",
        "####.",
        "#....",
        "#....",
        "#####",
    ]),
    ('F', &[
        "#####",
        "#....",
        "#....",
        "####.",
        "#....",
        "#....",
        "#....",
    ]),
    ('G', &[
        ".###.",
        "#...#",
        "#....",
        "#.###",
        "#...#",
        "#...#",
        ".####",
    ]),
    ('H', &[
        "#...#",
        "#...#",
        "#...#",
        "#####",
        "#...#",
        "#...#",
        "#...#",
    ]),
    ('I', &[
        "###",
        ".#.",
        ".#.",
        ".#.",
        ".#.",
        ".#.",
        "###",
    ]),
    ('J', &[
        "....#",
        "....#",
        "....#",
        "....#",
        "....#",
        "#...#",
        ".###.",
    ]),
    ('K', &[
        "#...#",
        "#..#.",
        "#.#..",
        "##...",
        "#.#..",
        "#..#.",
        "#...#",
    ]),
    ('L', &[
        "#....",
        "#....",
        "#....",
        "#....",
        "#....",
        "#....",
        "#####",
    ]),
    ('M', &[
        "#...#",
        "##.##",
        "#.#.#",
        "#.#.#",
        "#...#",
        "#...#",
        "#...#",
    ]),
    ('N', &[
        "#...#",
        "##..#",
        "#.#.#",
        "#..##",
        "#...#",
        "#...#",
        "#...#",
    ]),
    ('O', &[
        ".###.",
        "#...#",
        "#...#",
        "#...#",
        "#...#",
        "#...#",
        ".###.",
    ]),
    ('P', &[
        "####.",
        "#...#",
        "#...#",
        "####.",
        "#....",
        "#....",
        "#....",
    ]),
    ('Q', &[
        ".###.",
        "#...#",
        "#...#",
        "#...#",
        "#.#.#",
        "#..#.",
        ".##.#",
    ]),
    ('R', &[
        "####.",
        "#...#",
        "#...#",
        "####.",
        "#.#..",
        "#..#.",
        "#...#",
    ]),
    ('S', &[
        ".####",
        "#....",
        "#....",
        ".###.",
        "....#",
        "....#",
        "####.",
    ]),
    ('T', &[
        "#####",
        "..#..",
        "..#..",
        "..#..",
        "..#..",
        "..#..",
        "..#..",
    ]),
    ('U', &[
        "#...#",
        "#...#",
        "#...#",
        "#...#",
        "#...#",
        "#...#",
        ".###.",
    ]),
    ('V', &[
        "#...#",
        "#...#",
        "#...#",
        "#...#",
        "#...#",
        ".#.#.",
        "..#..",
    ]),
    ('W', &[
        "#...#",
        "#...#",
        "#...#",
        "#.#.#",
        "#.#.#",
        "##.##",
        "#...#",
    ]),
    ('X', &[
        "#...#",
        "#...#",
        ".#.#.",
        "..#..",
        ".#.#.",
        "#...#",
        "#...#",
    ]),
    ('Y', &[
        "#...#",
        "#...#",
        ".#.#.",
        "..#..",
        "..#..",
        "..#..",
        "..#..",
    ]),
    ('Z', &[
        "#####",
        "....#",
        "...#.",
        "..#..",
        ".#...",
        "#....",
        "#####",
    ]),
    ('0', &[
        ".###.",
        "#...#",
        "#..##",
        "#.#.#",
        "##..#",
        "#...#",
        ".###.",
    ]),
    ('1', &[
        ".#.",
        "##.",
        ".#.",
        ".#.",
        ".#.",
        ".#.",
        "###",
    ]),
    ('2', &[
        ".###.",
        "#...#",
        "....#",
        "...#.",
        "..#..",
        ".#...",
        "#####",
    ]),
    ('3', &[
        "#####",
        "...#.",
        "..#..",
        "...#.",
        "....#",
        "#...#",
        ".###.",
    ]),
    ('4', &[
        "...#.",
        "..##.",
        ".#.#.",
        "#..#.",
        "#####",
        "...#.",
        "...#.",
    ]),
    ('5', &[
        "#####",
        "#....",
        "####.",
        "....#",
        "....#",
        "#...#",
        ".###.",
    ]),
    ('6', &[
        "..##.",
        ".#...",
        "#....",
        "####.",
        "#...#",
        "#...#",
        ".###.",
    ]),
    ('7', &[
        "#####",
        "....#",
        "...#.",
        "..#..",
        ".#...",
        ".#...",
        ".#...",
    ]),
    ('8', &[
        ".###.",
        "#...#",
        "#...#",
        ".###.",
        "#...#",
        "#...#",
        ".###.",
    ]),
    ('9', &[
        ".###.",
        "#...#",
        "#...#",
        ".####",
        "....#",
        "...#.",
        ".##..",
    ]),
    ('%', &[
        "##..#",
        "##.#.",
        "...#.",
        "..#..",
        ".#...",
        ".#.##",
        "#..##",
    ]),
    ('.', &[
        "..",
        "..",
        "..",
        "..",
        "..",
        "##",
        "##",
    ]),
    ('-', &[
        "...",
        "...",
        "...",
        "###",
        "...",
        "...",
        "...",
    ]),
];
