//! Phase-accumulator tone generator
//!
//! Each generator owns a 32-bit phase accumulator whose top 12 bits index
//! the 4096-entry waveform table, a per-sample phase delta (frequency), a
//! delta-of-delta for linear pitch glides, and a 16-bit fixed-point volume
//! accumulator that walks an envelope table at a slow sub-rate. A generator
//! with no voice assigned is muted and contributes nothing; envelope
//! exhaustion re-enters that state permanently until the generator is
//! struck again.

use crate::config::SAMPLE_RATE;
use crate::synth::tables::{EnvelopeShape, Waveform, WaveTables};
use crate::synth::StereoSample;

/// Bits to discard when mapping the phase accumulator to a table index
///
/// Keeps the top 12 bits: table-length granularity regardless of
/// accumulator width.
const PHASE_INDEX_SHIFT: u32 = 20;

/// Everything needed to strike a note on one generator
#[derive(Debug, Clone, Copy)]
pub struct NoteParams {
    /// Waveform table the generator reads
    pub waveform: Waveform,
    /// Envelope table governing amplitude decay
    pub envelope: EnvelopeShape,
    /// Per-sample phase increment (frequency control)
    pub phase_delta: u32,
    /// Per-sample increment applied to `phase_delta` (pitch glide)
    pub phase_delta_delta: i32,
    /// Envelope position increment applied at the sub-rate cadence
    pub volume_delta: u16,
    /// Left channel gain divisor (larger = quieter)
    pub gain_left: u16,
    /// Right channel gain divisor
    pub gain_right: u16,
}

/// Phase-accumulator oscillator with envelope-driven amplitude
#[derive(Debug, Clone, Default)]
pub struct ToneGenerator {
    voice: Option<Waveform>,
    envelope: EnvelopeShape,
    phase_acc: u32,
    phase_delta: u32,
    phase_delta_delta: i32,
    volume_acc: u16,
    volume_delta: u16,
    env_amp: u16,
    gain_left: u16,
    gain_right: u16,
}

impl ToneGenerator {
    /// Create a muted generator with zeroed phase and volume state
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the generator is muted (contributes nothing to the mix)
    #[inline]
    pub fn is_muted(&self) -> bool {
        self.voice.is_none()
    }

    /// Mute the generator and zero its amplitude
    pub fn mute(&mut self) {
        self.voice = None;
        self.env_amp = 0;
    }

    /// Strike a note: assign voice and envelope, reset phase and volume
    ///
    /// Gain divisors must be non-zero; a zero divisor is a caller
    /// programming error.
    pub fn strike(&mut self, params: NoteParams, tables: &WaveTables) {
        assert!(
            params.gain_left != 0 && params.gain_right != 0,
            "tone gain divisors must be non-zero"
        );
        self.voice = Some(params.waveform);
        self.envelope = params.envelope;
        self.phase_acc = 0;
        self.phase_delta = params.phase_delta;
        self.phase_delta_delta = params.phase_delta_delta;
        self.volume_acc = 0;
        self.volume_delta = params.volume_delta;
        self.env_amp = tables.envelope_at(params.envelope, 0) as u16;
        self.gain_left = params.gain_left;
        self.gain_right = params.gain_right;
    }

    /// Mix one sample into the stereo accumulator and advance the phase
    ///
    /// Accumulation wraps per i16 arithmetic; there is deliberately no
    /// clipping guard, matching the fixed-width mix the output format
    /// defines.
    #[inline]
    pub fn mix_into(&mut self, tables: &WaveTables, out: &mut StereoSample) {
        let Some(waveform) = self.voice else {
            return;
        };
        let index = (self.phase_acc >> PHASE_INDEX_SHIFT) as usize;
        let scaled = tables.waveform(waveform)[index] as i32 * self.env_amp as i32;
        out.left = out.left.wrapping_add((scaled / self.gain_left as i32) as i16);
        out.right = out
            .right
            .wrapping_add((scaled / self.gain_right as i32) as i16);
        self.phase_acc = self.phase_acc.wrapping_add(self.phase_delta);
        self.phase_delta = self.phase_delta.wrapping_add_signed(self.phase_delta_delta);
    }

    /// Advance the envelope one sub-rate step
    ///
    /// Once the volume accumulator runs out of headroom the generator mutes
    /// itself; exhaustion is terminal and never retried.
    #[inline]
    pub fn advance_envelope(&mut self, tables: &WaveTables) {
        if self.voice.is_none() {
            return;
        }
        if self.volume_acc < u16::MAX - self.volume_delta {
            self.volume_acc += self.volume_delta;
            self.env_amp =
                tables.envelope_at(self.envelope, (self.volume_acc >> 8) as usize) as u16;
        } else {
            self.voice = None;
            self.env_amp = 0;
            self.volume_acc = u16::MAX;
        }
    }

    /// Current envelope amplitude scalar
    #[inline]
    pub fn envelope_amplitude(&self) -> u16 {
        self.env_amp
    }
}

/// Phase delta producing the given frequency at the engine sample rate
///
/// `u32::MAX` counts represent one full waveform cycle, so a delta of
/// `u32::MAX * f / rate` advances the oscillator `f` cycles per second.
#[inline]
pub fn phase_delta_for_frequency(frequency: f64) -> u32 {
    ((u32::MAX as f64 * frequency) / SAMPLE_RATE as f64 + 0.5) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::StereoSample;

    fn struck(tables: &WaveTables, volume_delta: u16) -> ToneGenerator {
        let mut tone = ToneGenerator::new();
        tone.strike(
            NoteParams {
                waveform: Waveform::Sine,
                envelope: EnvelopeShape::Linear,
                phase_delta: phase_delta_for_frequency(440.0),
                phase_delta_delta: 0,
                volume_delta,
                gain_left: 64,
                gain_right: 16,
            },
            tables,
        );
        tone
    }

    #[test]
    fn test_muted_generator_contributes_nothing() {
        let tables = WaveTables::generate();
        let mut tone = ToneGenerator::new();
        let mut sample = StereoSample::default();
        for _ in 0..1000 {
            tone.mix_into(&tables, &mut sample);
        }
        assert_eq!(sample.left, 0);
        assert_eq!(sample.right, 0);
    }

    #[test]
    fn test_struck_generator_produces_output() {
        let tables = WaveTables::generate();
        let mut tone = struck(&tables, 300);
        let mut nonzero = false;
        for _ in 0..256 {
            let mut sample = StereoSample::default();
            tone.mix_into(&tables, &mut sample);
            nonzero |= sample.left != 0 || sample.right != 0;
        }
        assert!(nonzero);
    }

    #[test]
    fn test_envelope_exhaustion_is_terminal() {
        let tables = WaveTables::generate();
        let mut tone = struck(&tables, u16::MAX / 2);
        // Two steps exhaust a half-range delta
        tone.advance_envelope(&tables);
        tone.advance_envelope(&tables);
        assert!(tone.is_muted());
        assert_eq!(tone.envelope_amplitude(), 0);
        // Idempotent silence afterwards
        for _ in 0..10 {
            tone.advance_envelope(&tables);
            let mut sample = StereoSample::default();
            tone.mix_into(&tables, &mut sample);
            assert_eq!((sample.left, sample.right), (0, 0));
        }
        assert!(tone.is_muted());
    }

    #[test]
    fn test_envelope_amplitude_follows_table() {
        let tables = WaveTables::generate();
        let mut tone = struck(&tables, 512);
        assert_eq!(tone.envelope_amplitude(), 255);
        tone.advance_envelope(&tables);
        // volume_acc = 512 -> step 2 of the linear envelope
        assert_eq!(
            tone.envelope_amplitude(),
            tables.envelope_at(EnvelopeShape::Linear, 2) as u16
        );
    }

    #[test]
    fn test_glide_changes_phase_delta() {
        let tables = WaveTables::generate();
        let mut with_glide = struck(&tables, 300);
        with_glide.phase_delta_delta = -200;
        let mut without_glide = struck(&tables, 300);
        for _ in 0..1000 {
            let mut s = StereoSample::default();
            with_glide.mix_into(&tables, &mut s);
            without_glide.mix_into(&tables, &mut s);
        }
        assert!(with_glide.phase_delta < without_glide.phase_delta);
    }

    #[test]
    fn test_phase_delta_for_frequency() {
        // One cycle per sample-rate samples: delta * rate == u32::MAX
        let delta = phase_delta_for_frequency(440.0);
        let expected = (u32::MAX as f64 * 440.0 / 44_100.0 + 0.5) as u32;
        assert_eq!(delta, expected);
    }
}
