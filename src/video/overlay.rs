//! Bitmap text overlay
//!
//! Paints a short numeric string near the bottom-left of the frame, on top
//! of everything the compositor and blitter already drew. Only set glyph
//! bits touch the destination: there is no background erase, so the overlay
//! is purely additive.

use crate::video::{font, PixelGrid, WHITE};

/// Left margin of the overlay text in pixels
const TEXT_X: usize = 8;

/// Distance from the bottom edge to the top of the glyph row
const TEXT_BOTTOM_OFFSET: usize = 18;

/// Foreground palette index used for set glyph bits
pub const OVERLAY_COLOR: u8 = WHITE;

/// Render `text` onto `out` with the 8x16 digit font
///
/// Characters advance [`font::GLYPH_WIDTH`] pixels each; characters the
/// font does not cover still advance but paint nothing. Glyph row bits are
/// tested from the least-significant bit outward (bit 0 = leftmost
/// column). The text must fit the frame; the scene layer keeps scores
/// short enough.
pub fn draw_overlay(text: &str, out: &mut PixelGrid) {
    let y0 = out.height() - TEXT_BOTTOM_OFFSET;
    for (i, c) in text.chars().enumerate() {
        let Some(rows) = font::glyph(c) else {
            continue;
        };
        let x0 = i * font::GLYPH_WIDTH + TEXT_X;
        debug_assert!(x0 + font::GLYPH_WIDTH <= out.width());
        debug_assert!(y0 + font::GLYPH_HEIGHT <= out.height());
        for (row, &bits) in rows.iter().enumerate() {
            for col in 0..font::GLYPH_WIDTH {
                if bits & (1 << col) != 0 {
                    out.set(x0 + col, y0 + row, OVERLAY_COLOR);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FRAME_HEIGHT, FRAME_WIDTH};
    use crate::video::font::{GLYPH_HEIGHT, GLYPH_WIDTH};

    #[test]
    fn test_overlay_is_additive() {
        let mut out = PixelGrid::new(FRAME_WIDTH, FRAME_HEIGHT);
        out.fill(0x42);
        draw_overlay("008", &mut out);
        // Every pixel is either untouched background or the foreground color
        assert!(out.as_bytes().iter().all(|&p| p == 0x42 || p == OVERLAY_COLOR));
        // Clear glyph bits never erased the background
        let y0 = FRAME_HEIGHT - 18;
        assert_eq!(out.get(TEXT_X, y0), 0x42); // blank top glyph row
        // And something was actually painted
        assert!(out.as_bytes().iter().any(|&p| p == OVERLAY_COLOR));
    }

    #[test]
    fn test_character_advance() {
        let mut single = PixelGrid::new(FRAME_WIDTH, FRAME_HEIGHT);
        draw_overlay("7", &mut single);
        let mut shifted = PixelGrid::new(FRAME_WIDTH, FRAME_HEIGHT);
        draw_overlay("07", &mut shifted);
        // The '7' of "07" is the '7' of "7" moved one glyph right
        let y0 = FRAME_HEIGHT - 18;
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                assert_eq!(
                    single.get(TEXT_X + col, y0 + row),
                    shifted.get(TEXT_X + GLYPH_WIDTH + col, y0 + row)
                );
            }
        }
    }

    #[test]
    fn test_uncovered_characters_skip_but_advance() {
        let mut with_gap = PixelGrid::new(FRAME_WIDTH, FRAME_HEIGHT);
        draw_overlay("-1", &mut with_gap);
        // The dash paints nothing in its cell
        let y0 = FRAME_HEIGHT - 18;
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                assert_eq!(with_gap.get(TEXT_X + col, y0 + row), 0);
            }
        }
        // But the '1' still lands in the second cell
        assert!((0..GLYPH_HEIGHT).any(|row| {
            (0..GLYPH_WIDTH)
                .any(|col| with_gap.get(TEXT_X + GLYPH_WIDTH + col, y0 + row) == OVERLAY_COLOR)
        }));
    }

    #[test]
    fn test_bit_zero_is_leftmost_column() {
        // Digit 1 row 2 is 0x18: bits 3 and 4 -> columns 3 and 4
        let mut out = PixelGrid::new(FRAME_WIDTH, FRAME_HEIGHT);
        draw_overlay("1", &mut out);
        let y = FRAME_HEIGHT - 18 + 2;
        assert_eq!(out.get(TEXT_X + 3, y), OVERLAY_COLOR);
        assert_eq!(out.get(TEXT_X + 4, y), OVERLAY_COLOR);
        assert_eq!(out.get(TEXT_X, y), 0);
        assert_eq!(out.get(TEXT_X + 7, y), 0);
    }
}
