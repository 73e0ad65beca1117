//! Parallax background compositor
//!
//! Fully repaints the frame buffer from a wider background image split into
//! equal horizontal bands. Band `k` scrolls `k + 1` pixels per frame with
//! horizontal wraparound, so lower bands move faster and the stack reads as
//! depth. Rows map 1:1; only the column is transformed.

use crate::config::BAND_COUNT;
use crate::video::PixelGrid;

/// Repaint `out` from `background` for the given frame index
///
/// For band `k` (0-based) and output pixel `(x, y)`:
/// `out[y][x] = background[y][(x + frame * (k + 1)) % background_width]`.
/// Every pixel of `out` is overwritten.
///
/// The background must be exactly as tall as the output, at least as wide,
/// and the output height must divide evenly into [`BAND_COUNT`] bands.
pub fn composite_background(background: &PixelGrid, frame: u64, out: &mut PixelGrid) {
    debug_assert_eq!(background.height(), out.height());
    debug_assert!(background.width() >= out.width());
    debug_assert_eq!(out.height() % BAND_COUNT, 0);

    let band_height = out.height() / BAND_COUNT;
    let source_width = background.width() as u64;

    for band in 0..BAND_COUNT {
        let scroll = frame * (band as u64 + 1);
        for y in band * band_height..(band + 1) * band_height {
            for x in 0..out.width() {
                let bx = ((x as u64 + scroll) % source_width) as usize;
                out.set(x, y, background.get(bx, y));
            }
        }
    }
}
