//! Wavetable synthesis core
//!
//! A fixed bank of phase-accumulator tone generators mixed into one stereo
//! frame buffer per video frame, plus a PCM effect overlay. Mixing is plain
//! summation with wrapping 16-bit arithmetic and no clipping guard; the
//! audible result is deterministic bit-for-bit.

pub mod effect;
pub mod tables;
pub mod tone;

pub use effect::EffectMixer;
pub use tables::{EnvelopeShape, Waveform, WaveTables};
pub use tone::{phase_delta_for_frequency, NoteParams, ToneGenerator};

use crate::config::TONE_COUNT;

/// One interleaved stereo sample pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StereoSample {
    /// Left channel value
    pub left: i16,
    /// Right channel value
    pub right: i16,
}

/// One video frame's worth of stereo samples, fully overwritten per tick
#[derive(Debug, Clone)]
pub struct AudioFrame {
    samples: Vec<StereoSample>,
}

impl AudioFrame {
    /// Allocate a zeroed frame of the given sample count
    pub fn new(samples_per_frame: usize) -> Self {
        AudioFrame {
            samples: vec![StereoSample::default(); samples_per_frame],
        }
    }

    /// Number of stereo sample pairs in the frame
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the frame holds no samples
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Read access to the sample pairs
    #[inline]
    pub fn samples(&self) -> &[StereoSample] {
        &self.samples
    }

    /// Mutable access to the sample pairs
    #[inline]
    pub fn samples_mut(&mut self) -> &mut [StereoSample] {
        &mut self.samples
    }

    /// Iterator over interleaved left/right values (for device output)
    pub fn interleaved(&self) -> impl Iterator<Item = i16> + '_ {
        self.samples.iter().flat_map(|s| [s.left, s.right])
    }
}

/// The fixed bank of tone generators plus the shared envelope cadence
///
/// The envelope sub-rate counter is a persistent 8-bit counter incremented
/// once per sample; every time it wraps to zero (each 256th sample, across
/// frame boundaries) all live generators advance their envelopes.
pub struct ToneBank {
    generators: [ToneGenerator; TONE_COUNT],
    volume_counter: u8,
}

impl ToneBank {
    /// Create a bank of muted generators
    pub fn new() -> Self {
        ToneBank {
            generators: Default::default(),
            volume_counter: 0,
        }
    }

    /// Access one generator for reconfiguration
    #[inline]
    pub fn generator_mut(&mut self, index: usize) -> &mut ToneGenerator {
        &mut self.generators[index]
    }

    /// Read access to one generator
    #[inline]
    pub fn generator(&self, index: usize) -> &ToneGenerator {
        &self.generators[index]
    }

    /// Whether every generator in the bank is muted
    pub fn is_silent(&self) -> bool {
        self.generators.iter().all(ToneGenerator::is_muted)
    }

    /// Render one frame of audio: tone bank first, then the effect overlay
    ///
    /// Every sample pair in `out` is overwritten. No I/O, no blocking, no
    /// allocation.
    pub fn render_frame(
        &mut self,
        tables: &WaveTables,
        effect: &mut EffectMixer,
        out: &mut AudioFrame,
    ) {
        for sample in out.samples_mut() {
            *sample = StereoSample::default();
            self.volume_counter = self.volume_counter.wrapping_add(1);
            let advance = self.volume_counter == 0;
            for generator in &mut self.generators {
                generator.mix_into(tables, sample);
                if advance {
                    generator.advance_envelope(tables);
                }
            }
        }
        effect.mix_into(out);
    }
}

impl Default for ToneBank {
    fn default() -> Self {
        Self::new()
    }
}
