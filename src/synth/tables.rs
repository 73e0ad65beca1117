//! Waveform and envelope lookup tables
//!
//! All signal generation is table-driven: four single-cycle waveform tables
//! (4096 signed 16-bit entries normalized to +-2047) and six amplitude
//! envelope tables (256 steps). The tables are a pure function of fixed
//! constants, generated once at startup and shared read-only by every tone
//! generator, so regenerating them always yields identical arrays.

use num_derive::{FromPrimitive, ToPrimitive};
use std::f64::consts::TAU;

use crate::config::{ENV_STEPS, WAVE_LEN};

/// Peak amplitude of the waveform tables
pub const WAVE_PEAK: i16 = 2047;

/// Oscillator waveform selection
///
/// The discriminants match the numeric voice ids used by the demo script
/// format, so `from_u8` doubles as the script decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Waveform {
    /// Pure sine cycle
    Sine = 0,
    /// 50% duty square wave
    Square = 1,
    /// Symmetric triangle
    Triangle = 2,
    /// Rising sawtooth
    Sawtooth = 3,
}

/// Amplitude envelope selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromPrimitive, ToPrimitive)]
pub enum EnvelopeShape {
    /// Linear decay to zero
    #[default]
    Linear = 0,
    /// Exponential decay, similar to a bell
    Exponential = 1,
    /// Simple on/off gating
    Gate = 2,
    /// Attack, decay, sustain, release
    Adsr = 3,
    /// Short exponential attack, long sustain, decay
    Sustain = 4,
    /// Like ADSR but with a modulated sustain amplitude
    Tremolo = 5,
}

/// Number of waveform tables
pub const WAVEFORM_COUNT: usize = 4;

/// Number of envelope tables
pub const ENVELOPE_COUNT: usize = 6;

/// Immutable waveform and envelope lookup tables
///
/// One full oscillator cycle per waveform; envelope values are unsigned
/// amplitudes 0-255 stored as i16.
pub struct WaveTables {
    waveforms: [[i16; WAVE_LEN]; WAVEFORM_COUNT],
    envelopes: [[i16; ENV_STEPS]; ENVELOPE_COUNT],
}

impl WaveTables {
    /// Generate all lookup tables from their closed-form formulas
    pub fn generate() -> Self {
        let mut waveforms = [[0i16; WAVE_LEN]; WAVEFORM_COUNT];
        let mut envelopes = [[0i16; ENV_STEPS]; ENVELOPE_COUNT];

        let n = WAVE_LEN;
        for i in 0..n {
            let theta = (TAU / n as f64) * i as f64;
            waveforms[Waveform::Sine as usize][i] = (theta.sin() * WAVE_PEAK as f64).round() as i16;

            waveforms[Waveform::Square as usize][i] = if i < n / 2 { -WAVE_PEAK } else { WAVE_PEAK };

            // Integer-scaled slope; the apex lands exactly on the peak
            waveforms[Waveform::Triangle as usize][i] = if i == n / 2 {
                WAVE_PEAK
            } else if i < n / 2 {
                ((i * 2 * 4096) / n) as i16 - WAVE_PEAK
            } else {
                (((n - i) * 2 * 4096) / n) as i16 - WAVE_PEAK
            };

            waveforms[Waveform::Sawtooth as usize][i] = ((i * 4096) / n) as i16 - WAVE_PEAK;
        }

        for i in 0..ENV_STEPS {
            envelopes[EnvelopeShape::Linear as usize][i] = 255 - i as i16;

            envelopes[EnvelopeShape::Exponential as usize][i] = exp_step(i, 32.0);

            envelopes[EnvelopeShape::Gate as usize][i] =
                if i < ENV_STEPS - 1 { 255 } else { 0 };

            envelopes[EnvelopeShape::Adsr as usize][i] = if i < 32 {
                exp_step(i, 32.0)
            } else if i < 192 {
                127
            } else {
                exp_step(i, 64.0 / 7.0)
            };

            envelopes[EnvelopeShape::Sustain as usize][i] = if i < 32 {
                (256.0 - ((32 - i) as f64 / 4.0).exp2()) as i16
            } else if i < 192 {
                255
            } else {
                exp_step(i, 8.0)
            };

            envelopes[EnvelopeShape::Tremolo as usize][i] = if i < 32 {
                exp_step(i, 32.0)
            } else if i < 192 {
                // 5 sinusoidal cycles over the 160-step plateau, +-64 around 127
                let x = (i - 32) as f64 * 5.0 * TAU / 160.0;
                (127.0 + 64.0 * x.sin()) as i16
            } else {
                exp_step(i, 64.0 / 7.0)
            };
        }

        WaveTables {
            waveforms,
            envelopes,
        }
    }

    /// One full cycle of the given waveform
    #[inline]
    pub fn waveform(&self, waveform: Waveform) -> &[i16; WAVE_LEN] {
        &self.waveforms[waveform as usize]
    }

    /// The full table for the given envelope shape
    #[inline]
    pub fn envelope(&self, shape: EnvelopeShape) -> &[i16; ENV_STEPS] {
        &self.envelopes[shape as usize]
    }

    /// Envelope amplitude at a coarse envelope position (0-255)
    #[inline]
    pub fn envelope_at(&self, shape: EnvelopeShape, step: usize) -> i16 {
        debug_assert!(step < ENV_STEPS, "envelope step {step} out of range");
        self.envelopes[shape as usize][step]
    }
}

/// Exponential envelope segment: `2^((256 - i) / divisor) - 1`, truncated
#[inline]
fn exp_step(i: usize, divisor: f64) -> i16 {
    (((ENV_STEPS - i) as f64 / divisor).exp2() - 1.0) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use num_traits::FromPrimitive;

    #[test]
    fn test_tables_deterministic() {
        let a = WaveTables::generate();
        let b = WaveTables::generate();
        assert_eq!(a.waveforms, b.waveforms);
        assert_eq!(a.envelopes, b.envelopes);
    }

    #[test]
    fn test_sine_boundaries() {
        let tables = WaveTables::generate();
        let sine = tables.waveform(Waveform::Sine);
        assert_eq!(sine[0], 0);
        assert_relative_eq!(
            sine[WAVE_LEN / 4] as f64,
            WAVE_PEAK as f64,
            max_relative = 0.001
        );
        assert_relative_eq!(
            sine[3 * WAVE_LEN / 4] as f64,
            -WAVE_PEAK as f64,
            max_relative = 0.001
        );
    }

    #[test]
    fn test_square_halves() {
        let tables = WaveTables::generate();
        let square = tables.waveform(Waveform::Square);
        assert!(square[..WAVE_LEN / 2].iter().all(|&s| s == -WAVE_PEAK));
        assert!(square[WAVE_LEN / 2..].iter().all(|&s| s == WAVE_PEAK));
    }

    #[test]
    fn test_triangle_apex_and_monotonicity() {
        let tables = WaveTables::generate();
        let triangle = tables.waveform(Waveform::Triangle);
        assert_eq!(triangle[WAVE_LEN / 2], WAVE_PEAK);
        assert_eq!(triangle[0], -WAVE_PEAK);
        assert!(triangle[..=WAVE_LEN / 2].windows(2).all(|w| w[0] <= w[1]));
        assert!(triangle[WAVE_LEN / 2..].windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_sawtooth_ramp() {
        let tables = WaveTables::generate();
        let saw = tables.waveform(Waveform::Sawtooth);
        assert_eq!(saw[0], -WAVE_PEAK);
        assert!(saw.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_linear_envelope() {
        let tables = WaveTables::generate();
        let env = tables.envelope(EnvelopeShape::Linear);
        assert_eq!(env[0], 255);
        assert_eq!(env[255], 0);
        assert!(env.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_exponential_envelope() {
        let tables = WaveTables::generate();
        let env = tables.envelope(EnvelopeShape::Exponential);
        assert_eq!(env[0], 255);
        assert_eq!(env[32], 127);
        assert_eq!(env[255], 0);
        assert!(env.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_gate_envelope() {
        let tables = WaveTables::generate();
        let env = tables.envelope(EnvelopeShape::Gate);
        assert!(env[..ENV_STEPS - 1].iter().all(|&s| s == 255));
        assert_eq!(env[ENV_STEPS - 1], 0);
    }

    #[test]
    fn test_adsr_segments() {
        let tables = WaveTables::generate();
        let env = tables.envelope(EnvelopeShape::Adsr);
        assert_eq!(env[0], 255);
        // Plateau is flat at 127 and the decay joins it without a step
        assert!(env[32..192].iter().all(|&s| s == 127));
        assert_eq!(env[192], 127);
        assert_eq!(env[255], 0);
    }

    #[test]
    fn test_sustain_segments() {
        let tables = WaveTables::generate();
        let env = tables.envelope(EnvelopeShape::Sustain);
        assert_eq!(env[0], 0);
        assert!(env[..32].windows(2).all(|w| w[0] <= w[1]));
        assert!(env[32..192].iter().all(|&s| s == 255));
        assert_eq!(env[192], 255);
        assert_eq!(env[255], 0);
    }

    #[test]
    fn test_tremolo_plateau_modulation() {
        let tables = WaveTables::generate();
        let env = tables.envelope(EnvelopeShape::Tremolo);
        // Modulation stays within +-64 of the 127 center
        assert!(env[32..192].iter().all(|&s| (63..=191).contains(&s)));
        assert_eq!(env[32], 127);
        // The plateau actually swings both ways
        assert!(env[32..192].iter().any(|&s| s > 180));
        assert!(env[32..192].iter().any(|&s| s < 70));
    }

    #[test]
    fn test_envelope_values_fit_amplitude_range() {
        let tables = WaveTables::generate();
        for shape in 0..ENVELOPE_COUNT {
            let shape = EnvelopeShape::from_usize(shape).unwrap();
            assert!(tables
                .envelope(shape)
                .iter()
                .all(|&s| (0..=255).contains(&s)));
        }
    }

    #[test]
    fn test_numeric_ids_round_trip() {
        assert_eq!(Waveform::from_u8(0), Some(Waveform::Sine));
        assert_eq!(Waveform::from_u8(3), Some(Waveform::Sawtooth));
        assert_eq!(Waveform::from_u8(4), None);
        assert_eq!(EnvelopeShape::from_u8(5), Some(EnvelopeShape::Tremolo));
        assert_eq!(EnvelopeShape::from_u8(6), None);
    }
}
