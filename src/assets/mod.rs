//! Asset loading
//!
//! Decodes the demo's external assets into the typed buffers the engine
//! consumes: PPM pixmaps quantized to 3-3-2 palette indices, and a raw
//! little-endian mono PCM effect sample. Colour quantization happens here,
//! at the boundary: the core only ever sees palette-index bytes.

pub mod builtin;
pub mod pcm;
pub mod pixmap;

pub use pcm::load_pcm;
pub use pixmap::{load_pixmap, parse_pixmap};

use crate::config::DemoConfig;
use crate::engine::DemoAssets;
use crate::Result;

/// Quantize an 8-bit RGB triplet to a 3-3-2 palette index
///
/// Three bits of red, three of green, two of blue:
/// `(r/32) << 5 | (g/32) << 2 | b/64`. The inverse (index to RGB) lives in
/// the presentation stage.
#[inline]
pub fn rgb332(r: u8, g: u8, b: u8) -> u8 {
    ((r >> 5) << 5) | ((g >> 5) << 2) | (b >> 6)
}

/// Load the demo's assets, falling back to built-ins where unconfigured
///
/// Missing `background`/`ship` paths fall back to the synthetic background
/// and the built-in block tile; a missing `effect` path yields an empty
/// (never-sounding) effect buffer. Configured paths that fail to decode
/// are reported as errors, not silently replaced.
pub fn load_demo_assets(config: &DemoConfig) -> Result<DemoAssets> {
    let background = match &config.background {
        Some(path) => load_pixmap(path)?,
        None => builtin::synthetic_background(),
    };
    let player_tile = match &config.ship {
        Some(path) => load_pixmap(path)?,
        None => builtin::player_tile(),
    };
    let effect = match &config.effect {
        Some(path) => load_pcm(path)?,
        None => Vec::new(),
    };
    Ok(DemoAssets {
        background,
        player_tile,
        missile_tile: builtin::missile_tile(),
        effect,
    })
}
