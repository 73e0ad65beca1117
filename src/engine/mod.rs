//! Per-frame demo engine
//!
//! `DemoEngine` owns every mutable table and buffer the demo touches;
//! there are no process-wide statics. It is constructed once from typed
//! asset buffers, ticked once per video frame, and hands its two output
//! buffers (palette-index video frame, interleaved stereo audio frame) to
//! the presentation stage after each tick. Single-threaded, non-blocking,
//! allocation-free in steady state.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::config::{BACKGROUND_WIDTH, FRAME_HEIGHT, FRAME_WIDTH, TimingConfig};
use crate::scene::{NoteEvent, SceneState};
use crate::synth::{AudioFrame, EffectMixer, ToneBank, WaveTables};
use crate::video::{composite_background, draw_overlay, draw_sprites, PixelGrid};
use crate::{Result, ScrollerError};

/// Typed asset buffers supplied by the loading stage
///
/// The engine validates geometry here once; afterwards the core assumes
/// everything is in-bounds by construction.
pub struct DemoAssets {
    /// Scroll source image, `BACKGROUND_WIDTH` x `FRAME_HEIGHT`
    pub background: PixelGrid,
    /// Player ship tile
    pub player_tile: PixelGrid,
    /// Missile tile
    pub missile_tile: PixelGrid,
    /// Mono effect sample (signed 16-bit PCM)
    pub effect: Vec<i16>,
}

/// The frame-synchronous synthesis and compositing engine
pub struct DemoEngine {
    tables: WaveTables,
    bank: ToneBank,
    effect: EffectMixer,
    scene: SceneState,
    background: PixelGrid,
    frame_buffer: PixelGrid,
    audio_frame: AudioFrame,
    score_text: String,
}

impl DemoEngine {
    /// Build an engine with the built-in note script
    pub fn new(assets: DemoAssets) -> Result<Self> {
        Self::with_script(assets, &NoteEvent::default_script())
    }

    /// Build an engine with a custom note script
    pub fn with_script(assets: DemoAssets, notes: &[NoteEvent]) -> Result<Self> {
        if assets.background.height() != FRAME_HEIGHT
            || assets.background.width() < BACKGROUND_WIDTH
        {
            return Err(ScrollerError::ConfigError(format!(
                "background must be at least {BACKGROUND_WIDTH}x{FRAME_HEIGHT}, got {}x{}",
                assets.background.width(),
                assets.background.height()
            )));
        }
        for (name, tile) in [
            ("player", &assets.player_tile),
            ("missile", &assets.missile_tile),
        ] {
            if tile.width() > FRAME_WIDTH || tile.height() > FRAME_HEIGHT {
                return Err(ScrollerError::ConfigError(format!(
                    "{name} tile {}x{} exceeds the frame buffer",
                    tile.width(),
                    tile.height()
                )));
            }
        }

        let scene = SceneState::with_script(
            Arc::new(assets.player_tile),
            Arc::new(assets.missile_tile),
            notes,
        )?;
        let timing = TimingConfig::default();
        Ok(DemoEngine {
            tables: WaveTables::generate(),
            bank: ToneBank::new(),
            effect: EffectMixer::new(assets.effect),
            scene,
            background: assets.background,
            frame_buffer: PixelGrid::new(FRAME_WIDTH, FRAME_HEIGHT),
            audio_frame: AudioFrame::new(timing.samples_per_frame()),
            score_text: String::with_capacity(8),
        })
    }

    /// Advance the demo by one frame
    ///
    /// Runs the fixed per-tick pipeline: scene update, then background,
    /// sprites and score overlay into the frame buffer, then one frame of
    /// audio. Scene triggers are applied before audio rendering so a note
    /// struck on this frame sounds on this frame. Frame indices must be
    /// monotonic and gapless or edge-fired triggers are lost.
    pub fn tick(&mut self, frame: u64) {
        self.scene
            .update(frame, &mut self.bank, &mut self.effect, &self.tables);

        composite_background(&self.background, frame, &mut self.frame_buffer);
        draw_sprites(self.scene.sprites(), &mut self.frame_buffer);

        self.score_text.clear();
        let _ = write!(self.score_text, "{frame:06}");
        draw_overlay(&self.score_text, &mut self.frame_buffer);

        self.bank
            .render_frame(&self.tables, &mut self.effect, &mut self.audio_frame);
    }

    /// The composited video frame from the last tick
    #[inline]
    pub fn frame_buffer(&self) -> &PixelGrid {
        &self.frame_buffer
    }

    /// The rendered audio frame from the last tick
    #[inline]
    pub fn audio_frame(&self) -> &AudioFrame {
        &self.audio_frame
    }

    /// The shared lookup tables
    #[inline]
    pub fn tables(&self) -> &WaveTables {
        &self.tables
    }

    /// The tone generator bank (for inspection or manual triggering)
    #[inline]
    pub fn bank_mut(&mut self) -> &mut ToneBank {
        &mut self.bank
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::WHITE;

    fn assets() -> DemoAssets {
        DemoAssets {
            background: PixelGrid::new(BACKGROUND_WIDTH, FRAME_HEIGHT),
            player_tile: tile(29, 11, 0x20),
            missile_tile: tile(7, 6, 0x30),
            effect: vec![250; 2000],
        }
    }

    fn tile(w: usize, h: usize, color: u8) -> PixelGrid {
        let mut t = PixelGrid::new(w, h);
        t.fill(color);
        t
    }

    #[test]
    fn test_rejects_undersized_background() {
        let mut bad = assets();
        bad.background = PixelGrid::new(FRAME_WIDTH, FRAME_HEIGHT);
        assert!(DemoEngine::new(bad).is_err());
    }

    #[test]
    fn test_rejects_oversized_tile() {
        let mut bad = assets();
        bad.player_tile = tile(FRAME_WIDTH + 1, 4, 0x20);
        assert!(DemoEngine::new(bad).is_err());
    }

    #[test]
    fn test_tick_zero_video_is_background_plus_sprite_and_score() {
        let mut engine = DemoEngine::new(assets()).unwrap();
        engine.tick(0);
        let frame = engine.frame_buffer();
        // Player tile landed at (16, 10)
        assert_eq!(frame.get(16, 10), 0x20);
        // Score overlay painted white somewhere on the bottom rows
        assert!(frame
            .row(FRAME_HEIGHT - 14)
            .iter()
            .any(|&p| p == WHITE));
    }

    #[test]
    fn test_tick_zero_audio_is_silent() {
        let mut engine = DemoEngine::new(assets()).unwrap();
        engine.tick(0);
        assert!(engine
            .audio_frame()
            .samples()
            .iter()
            .all(|s| s.left == 0 && s.right == 0));
    }

    #[test]
    fn test_effect_sounds_from_fire_frame() {
        let mut engine = DemoEngine::new(assets()).unwrap();
        for frame in 0..=crate::scene::FIRE_FRAME {
            engine.tick(frame);
        }
        // The PCM effect (constant 250) is present on the left channel
        assert!(engine.audio_frame().samples().iter().any(|s| s.left != 0));
    }

    #[test]
    fn test_deterministic_across_engines() {
        let mut a = DemoEngine::new(assets()).unwrap();
        let mut b = DemoEngine::new(assets()).unwrap();
        for frame in 0..100 {
            a.tick(frame);
            b.tick(frame);
            assert_eq!(a.frame_buffer().as_bytes(), b.frame_buffer().as_bytes());
            assert_eq!(a.audio_frame().samples(), b.audio_frame().samples());
        }
    }
}
