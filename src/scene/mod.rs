//! Scene state and scripted tone triggers
//!
//! Advances sprite positions and (re)configures tone generators once per
//! video frame. Triggers are edge-fired on frame-index equality, so the
//! driving loop must supply monotonic, gapless frame indices; a skipped
//! index would silently drop its trigger. Sprite placement is validated
//! and clamped here so the blitter downstream can assume in-bounds
//! coordinates.

use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{FRAME_HEIGHT, FRAME_RATE, FRAME_WIDTH};
use crate::synth::{
    phase_delta_for_frequency, EffectMixer, EnvelopeShape, NoteParams, ToneBank, Waveform,
    WaveTables,
};
use crate::video::{PixelGrid, Sprite, BLACK, MAGENTA};
use crate::{Result, ScrollerError};

/// Sprite table index of the player ship (drawn first, rearmost)
pub const PLAYER: usize = 0;

/// Sprite table index of the missile
pub const MISSILE: usize = 1;

/// Frame at which the missile launches and the effect sample fires (1s in)
pub const FIRE_FRAME: u64 = FRAME_RATE as u64;

/// Fixed player x position
const PLAYER_X: usize = 16;

/// One scripted note, in the numeric id format of the demo script
///
/// Waveform and envelope are small integer ids (0 = sine .. 3 = sawtooth,
/// 0 = linear .. 5 = tremolo); they are resolved to enums when the scene is
/// built so a bad script fails at startup, not mid-demo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Frame index the note fires on (equality-compared, fired once)
    pub frame: u64,
    /// Tone generator slot to strike
    pub generator: usize,
    /// Numeric waveform id
    pub waveform: u8,
    /// Numeric envelope id
    pub envelope: u8,
    /// Frequency in Hz
    pub frequency: f64,
    /// Per-sample phase delta increment (pitch glide, 0 = none)
    pub glide: i32,
    /// Envelope position increment per sub-rate step
    pub volume_delta: u16,
    /// Left gain divisor
    pub gain_left: u16,
    /// Right gain divisor
    pub gain_right: u16,
}

impl NoteEvent {
    /// The built-in two-note script of the demo
    ///
    /// A tremolo'd A with a downward glide when the missile fires, then a
    /// plain bell-decay C two seconds later.
    pub fn default_script() -> Vec<NoteEvent> {
        vec![
            NoteEvent {
                frame: FIRE_FRAME,
                generator: 0,
                waveform: Waveform::Sine as u8,
                envelope: EnvelopeShape::Tremolo as u8,
                frequency: 440.0,
                glide: -200,
                volume_delta: 300,
                gain_left: 64,
                gain_right: 16,
            },
            NoteEvent {
                frame: 3 * FIRE_FRAME,
                generator: 0,
                waveform: Waveform::Sine as u8,
                envelope: EnvelopeShape::Exponential as u8,
                frequency: 261.0,
                glide: 0,
                volume_delta: 500,
                gain_left: 64,
                gain_right: 16,
            },
        ]
    }

    fn resolve(&self) -> Result<NoteParams> {
        let waveform = Waveform::from_u8(self.waveform)
            .ok_or_else(|| ScrollerError::ConfigError(format!("bad waveform id {}", self.waveform)))?;
        let envelope = EnvelopeShape::from_u8(self.envelope)
            .ok_or_else(|| ScrollerError::ConfigError(format!("bad envelope id {}", self.envelope)))?;
        if self.gain_left == 0 || self.gain_right == 0 {
            return Err(ScrollerError::ConfigError(
                "note gain divisors must be non-zero".into(),
            ));
        }
        Ok(NoteParams {
            waveform,
            envelope,
            phase_delta: phase_delta_for_frequency(self.frequency),
            phase_delta_delta: self.glide,
            volume_delta: self.volume_delta,
            gain_left: self.gain_left,
            gain_right: self.gain_right,
        })
    }
}

/// A note script entry resolved against the table enums
#[derive(Debug, Clone)]
struct ResolvedNote {
    frame: u64,
    generator: usize,
    params: NoteParams,
}

/// Positions, visibility and tone assignments, advanced once per frame
pub struct SceneState {
    sprites: Vec<Sprite>,
    script: Vec<ResolvedNote>,
}

impl SceneState {
    /// Build the scene with the built-in note script
    pub fn new(player_tile: Arc<PixelGrid>, missile_tile: Arc<PixelGrid>) -> Self {
        // The built-in script always resolves
        Self::with_script(player_tile, missile_tile, &NoteEvent::default_script())
            .expect("built-in script is valid")
    }

    /// Build the scene with a custom note script
    ///
    /// Fails fast on unknown waveform/envelope ids, zero gain divisors or
    /// out-of-range generator slots.
    pub fn with_script(
        player_tile: Arc<PixelGrid>,
        missile_tile: Arc<PixelGrid>,
        notes: &[NoteEvent],
    ) -> Result<Self> {
        let script = notes
            .iter()
            .map(|note| {
                if note.generator >= crate::config::TONE_COUNT {
                    return Err(ScrollerError::ConfigError(format!(
                        "generator slot {} out of range",
                        note.generator
                    )));
                }
                Ok(ResolvedNote {
                    frame: note.frame,
                    generator: note.generator,
                    params: note.resolve()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let sprites = vec![
            Sprite::new(player_tile, MAGENTA),
            Sprite::new(missile_tile, BLACK),
        ];
        Ok(SceneState { sprites, script })
    }

    /// The sprite table in draw order
    #[inline]
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    /// Advance the scene for `frame` and apply any tone triggers
    ///
    /// Must run before compositing and before audio rendering for the same
    /// frame: the blitter reads the positions written here and the tone
    /// bank must see this frame's strikes.
    pub fn update(
        &mut self,
        frame: u64,
        bank: &mut ToneBank,
        effect: &mut EffectMixer,
        tables: &WaveTables,
    ) {
        if frame == 0 {
            let missile = &mut self.sprites[MISSILE];
            missile.x = 0;
            missile.y = 0;
            missile.visible = false;
            self.sprites[PLAYER].visible = true;
        }

        // Player drifts down one pixel per frame and parks on the bottom edge
        let player = &mut self.sprites[PLAYER];
        player.x = PLAYER_X;
        player.y = (frame as usize).saturating_add(10);
        player.clamp_to(FRAME_WIDTH, FRAME_HEIGHT);
        let nose = (player.x + player.width() - 1, player.y + 3);

        if frame == FIRE_FRAME {
            let missile = &mut self.sprites[MISSILE];
            missile.x = nose.0;
            missile.y = nose.1;
            missile.visible = true;
            effect.trigger();
        }

        if frame > FIRE_FRAME {
            let missile = &mut self.sprites[MISSILE];
            missile.x += 2;
            missile.y += 1;
        }
        self.sprites[MISSILE].clamp_to(FRAME_WIDTH, FRAME_HEIGHT);

        for note in &self.script {
            if note.frame == frame {
                bank.generator_mut(note.generator).strike(note.params, tables);
            }
        }
    }
}
