//! Bitmap Text
//!
//! A 5x7 bitmap font used for every piece of menu text. The font is pure data
//! plus arithmetic: [`BitmapFont::measure`] drives menu layout and hover
//! bounds, [`BitmapFont::rasterize`] turns a string into the pixel rectangles a
//! renderer fills.

use sdl2::rect::Rect;

/// Glyph cell width in font pixels
const GLYPH_WIDTH: u32 = 5;

/// Horizontal advance per character (glyph + 1 pixel spacing)
const GLYPH_ADVANCE: u32 = 6;

/// Vertical advance per line (7 rows + 2 pixels leading)
const LINE_HEIGHT: u32 = 9;

/// The font every menu screen draws with.
pub const MENU_FONT: BitmapFont = BitmapFont { pixel_size: 6.0 };

/// A scalable 5x7 bitmap font
///
/// `pixel_size` is the on-screen size of one font pixel at scale 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitmapFont {
    pub pixel_size: f32,
}

impl BitmapFont {
    /// Distance between baselines of consecutive lines at scale 1.0
    pub fn line_spacing(&self) -> f32 {
        LINE_HEIGHT as f32 * self.pixel_size
    }

    /// Size of `text` at scale 1.0 as `(width, height)`
    ///
    /// Width is that of the longest line; height is one line spacing per line.
    /// The empty string measures zero wide and one line tall.
    pub fn measure(&self, text: &str) -> (f32, f32) {
        let mut widest = 0;
        let mut lines = 0;

        for line in text.split('\n') {
            widest = widest.max(line.chars().count() as u32);
            lines += 1;
        }

        (
            (widest * GLYPH_ADVANCE) as f32 * self.pixel_size,
            lines as f32 * self.line_spacing(),
        )
    }

    /// Converts `text` into filled pixel rectangles
    ///
    /// `position` is the top-left corner of the first line. Lines are split
    /// on `'\n'`.
    pub fn rasterize(&self, text: &str, position: (f32, f32), scale: f32) -> Vec<Rect> {
        let pixel = (self.pixel_size * scale).max(0.0);
        if pixel <= 0.0 {
            return Vec::new();
        }
        let side = pixel.ceil().max(1.0) as u32;

        let mut rects = Vec::new();

        for (line_index, line) in text.split('\n').enumerate() {
            let line_y = position.1 + line_index as f32 * LINE_HEIGHT as f32 * pixel;

            for (i, c) in line.chars().enumerate() {
                let char_x = position.0 + (i as u32 * GLYPH_ADVANCE) as f32 * pixel;

                for (row, &pattern_row) in glyph(c).iter().enumerate() {
                    for col in 0..GLYPH_WIDTH {
                        if (pattern_row >> (GLYPH_WIDTH - 1 - col)) & 1 == 1 {
                            rects.push(Rect::new(
                                (char_x + col as f32 * pixel) as i32,
                                (line_y + row as f32 * pixel) as i32,
                                side,
                                side,
                            ));
                        }
                    }
                }
            }
        }

        rects
    }
}

/// 5x7 bitmap patterns (1 = pixel on). Lowercase letters render as uppercase.
fn glyph(c: char) -> &'static [u8; 7] {
    match c.to_ascii_uppercase() {
        'A' => &[0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => &[0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => &[0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => &[0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => &[0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => &[0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => &[0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'H' => &[0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => &[0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111],
        'J' => &[0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => &[0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => &[0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => &[0b10001, 0b11011, 0b10101, 0b10001, 0b10001, 0b10001, 0b10001],
        'N' => &[0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => &[0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => &[0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => &[0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => &[0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => &[0b01110, 0b10001, 0b10000, 0b01110, 0b00001, 0b10001, 0b01110],
        'T' => &[0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => &[0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => &[0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => &[0b10001, 0b10001, 0b10001, 0b10001, 0b10101, 0b11011, 0b10001],
        'X' => &[0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => &[0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => &[0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => &[0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => &[0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => &[0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => &[0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => &[0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => &[0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => &[0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => &[0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => &[0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => &[0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => &[0b00000, 0b00000, 0b00100, 0b00000, 0b00100, 0b00000, 0b00000],
        '/' => &[0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        '-' => &[0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => &[0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ',' => &[0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b00100, 0b01000],
        '!' => &[0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '?' => &[0b01110, 0b10001, 0b00001, 0b00110, 0b00100, 0b00000, 0b00100],
        '(' => &[0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => &[0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        ' ' => &[0b00000; 7],
        _ => &[0b11111; 7], // Full block for unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_single_line() {
        let font = BitmapFont { pixel_size: 2.0 };
        // 4 chars * 6 advance * 2 px
        assert_eq!(font.measure("PLAY"), (48.0, 18.0));
    }

    #[test]
    fn test_measure_empty_is_zero_width() {
        let (width, height) = MENU_FONT.measure("");
        assert_eq!(width, 0.0);
        assert_eq!(height, MENU_FONT.line_spacing());
    }

    #[test]
    fn test_measure_multiline_uses_widest_line() {
        let font = BitmapFont { pixel_size: 1.0 };
        assert_eq!(font.measure("AB\nABCD\n"), (24.0, 27.0));
    }

    #[test]
    fn test_rasterize_space_is_empty() {
        assert!(MENU_FONT.rasterize("   ", (0.0, 0.0), 1.0).is_empty());
    }

    #[test]
    fn test_rasterize_counts_pixels() {
        let font = BitmapFont { pixel_size: 1.0 };
        // '-' is a single row of five pixels
        let rects = font.rasterize("-", (10.0, 20.0), 1.0);
        assert_eq!(rects.len(), 5);
        assert_eq!(rects[0].x(), 10);
        assert_eq!(rects[0].y(), 23);
    }

    #[test]
    fn test_rasterize_second_line_offset() {
        let font = BitmapFont { pixel_size: 1.0 };
        let rects = font.rasterize("\n-", (0.0, 0.0), 2.0);
        assert_eq!(rects[0].y(), (LINE_HEIGHT as i32 + 3) * 2);
    }

    #[test]
    fn test_lowercase_matches_uppercase() {
        assert_eq!(glyph('a'), glyph('A'));
    }
}
