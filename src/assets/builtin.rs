//! Built-in fallback assets
//!
//! Hardwired tiles and a synthetic background so the demo and its tests
//! run without any external files. The missile has no external art at all;
//! the player block stands in when no ship pixmap is configured.

use crate::config::{BACKGROUND_WIDTH, BAND_COUNT, FRAME_HEIGHT};
use crate::video::{PixelGrid, BLUE, RED, WHITE};

/// Built-in 7x6 missile tile (black pixels are the transparent key)
pub fn missile_tile() -> PixelGrid {
    #[rustfmt::skip]
    const TILE: [u8; 7 * 6] = [
        0,     WHITE, WHITE, WHITE, RED,  RED, 0,
        WHITE, RED,   RED,   BLUE,  RED,  RED, RED,
        WHITE, RED,   BLUE,  BLUE,  BLUE, RED, RED,
        WHITE, RED,   BLUE,  BLUE,  BLUE, RED, 1,
        WHITE, RED,   RED,   BLUE,  RED,  RED, 1,
        0,     1,     1,     1,     1,    1,   0,
    ];
    PixelGrid::from_vec(7, 6, TILE.to_vec()).expect("tile dimensions are fixed")
}

/// Built-in 8x8 player block tile (corner pixels transparent-ish black)
pub fn player_tile() -> PixelGrid {
    #[rustfmt::skip]
    const TILE: [u8; 8 * 8] = [
        0,     WHITE, WHITE, WHITE, WHITE, WHITE, WHITE, 0,
        WHITE, WHITE, WHITE, WHITE, WHITE, WHITE, WHITE, WHITE,
        WHITE, WHITE, WHITE, WHITE, WHITE, WHITE, WHITE, WHITE,
        WHITE, WHITE, WHITE, BLUE,  BLUE,  WHITE, WHITE, WHITE,
        WHITE, WHITE, WHITE, BLUE,  BLUE,  WHITE, WHITE, WHITE,
        WHITE, WHITE, WHITE, WHITE, WHITE, WHITE, WHITE, WHITE,
        WHITE, WHITE, WHITE, WHITE, WHITE, WHITE, WHITE, WHITE,
        0,     WHITE, WHITE, WHITE, WHITE, WHITE, WHITE, 0,
    ];
    PixelGrid::from_vec(8, 8, TILE.to_vec()).expect("tile dimensions are fixed")
}

/// Deterministic test-card background, one hue family per parallax band
///
/// Each band carries vertical stripes so the differing scroll speeds are
/// visible immediately; the stripe phase also varies with the row to keep
/// the card from looking flat.
pub fn synthetic_background() -> PixelGrid {
    let mut grid = PixelGrid::new(BACKGROUND_WIDTH, FRAME_HEIGHT);
    let band_height = FRAME_HEIGHT / BAND_COUNT;
    for y in 0..FRAME_HEIGHT {
        let band = y / band_height;
        for x in 0..BACKGROUND_WIDTH {
            let stripe = ((x / 40) + (y / 10)) % 4;
            let level = stripe as u8;
            let index = match band {
                // Sky: blue levels
                0 => level & 0x03,
                // Hills: green levels
                1 => (level << 2) | 0x01,
                // Foreground: red levels
                2 => (level << 5) | 0x04,
                // Ground: grey ramp
                _ => (level << 5) | (level << 2) | (level & 0x03),
            };
            grid.set(x, y, index);
        }
    }
    grid
}
