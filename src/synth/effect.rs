//! PCM effect overlay
//!
//! A single pre-recorded mono sample stream mixed on top of the tone bank.
//! The mixer owns an explicit cursor into the immutable sample buffer:
//! triggering rewinds the cursor to the start, rendering advances it
//! monotonically, and once the buffer is exhausted further frames
//! contribute nothing. The effect lands on the left channel only.

use crate::synth::AudioFrame;

/// Mono PCM effect stream with a trigger-resettable playback cursor
#[derive(Debug, Clone)]
pub struct EffectMixer {
    samples: Vec<i16>,
    position: usize,
}

impl EffectMixer {
    /// Wrap a preloaded mono sample buffer
    ///
    /// The mixer starts exhausted; nothing sounds before the first
    /// [`trigger`](Self::trigger).
    pub fn new(samples: Vec<i16>) -> Self {
        let position = samples.len();
        EffectMixer { samples, position }
    }

    /// Restart playback from the first sample
    pub fn trigger(&mut self) {
        self.position = 0;
    }

    /// Whether the whole buffer has been mixed since the last trigger
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.samples.len()
    }

    /// Samples left to mix before exhaustion
    #[inline]
    pub fn remaining(&self) -> usize {
        self.samples.len() - self.position
    }

    /// Overlay the next slice of the effect onto the frame's left channel
    ///
    /// Adds with wrapping i16 arithmetic on top of whatever the tone bank
    /// already mixed. Stops at whichever comes first: end of frame or end
    /// of buffer.
    pub fn mix_into(&mut self, frame: &mut AudioFrame) {
        if self.is_exhausted() {
            return;
        }
        for sample in frame.samples_mut() {
            let Some(&value) = self.samples.get(self.position) else {
                break;
            };
            sample.left = sample.left.wrapping_add(value);
            self.position += 1;
        }
    }
}
