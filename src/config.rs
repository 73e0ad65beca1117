//! Engine constants and demo configuration
//!
//! The demo targets exactly one video mode and one audio format; the fixed
//! dimensions live here as compile-time constants. `TimingConfig` derives
//! the per-frame sample count, and `DemoConfig` carries the file paths and
//! run length the CLI reads from a JSON file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::Result;

/// Audio sample rate in Hz (CD quality)
pub const SAMPLE_RATE: u32 = 44_100;

/// Video frame rate in Hz (VGA mode 13h refresh)
pub const FRAME_RATE: u32 = 70;

/// Frame buffer width in pixels
pub const FRAME_WIDTH: usize = 320;

/// Frame buffer height in pixels
pub const FRAME_HEIGHT: usize = 200;

/// Background image width in pixels (twice the frame width for wraparound)
pub const BACKGROUND_WIDTH: usize = 640;

/// Number of parallax bands the background is divided into
pub const BAND_COUNT: usize = 4;

/// Number of tone generators in the bank
pub const TONE_COUNT: usize = 4;

/// Waveform table length (one full cycle)
pub const WAVE_LEN: usize = 4096;

/// Envelope table length (coarse envelope positions 0-255)
pub const ENV_STEPS: usize = 256;

/// Timing configuration tying the audio clock to the video refresh
///
/// The engine renders `samples_per_frame()` stereo samples for every video
/// frame, keeping audio and video in lockstep without drift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Audio sample rate in Hz
    pub sample_rate: u32,
    /// Video frame rate in Hz
    pub frame_rate: u32,
}

impl TimingConfig {
    /// Number of audio samples generated per video frame
    #[inline]
    pub fn samples_per_frame(&self) -> usize {
        (self.sample_rate / self.frame_rate) as usize
    }

    /// Duration of the demo in seconds for a given frame count
    pub fn duration_seconds(&self, frames: u64) -> f64 {
        frames as f64 / self.frame_rate as f64
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            sample_rate: SAMPLE_RATE,
            frame_rate: FRAME_RATE,
        }
    }
}

/// Demo run configuration loaded by the CLI
///
/// All fields are optional in the JSON file; missing asset paths fall back
/// to the built-in tiles and synthetic background.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of frames to generate
    pub frames: u64,
    /// Path to the background pixmap (PPM, `BACKGROUND_WIDTH` x `FRAME_HEIGHT`)
    pub background: Option<PathBuf>,
    /// Path to the player ship pixmap (PPM, 29x11)
    pub ship: Option<PathBuf>,
    /// Path to the raw PCM effect sample (mono, signed 16-bit little-endian)
    pub effect: Option<PathBuf>,
    /// Directory for numbered PPM frame dumps
    pub output_dir: PathBuf,
    /// Path for the rendered WAV file
    pub wav_path: PathBuf,
    /// Whether to write PPM frame dumps
    pub write_frames: bool,
    /// Scripted note events overriding the built-in script
    pub notes: Option<Vec<crate::scene::NoteEvent>>,
}

impl DemoConfig {
    /// Load a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str(&data)
            .map_err(|e| crate::ScrollerError::ConfigError(format!("bad config JSON: {e}")))
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            // 8 seconds of output
            frames: 8 * FRAME_RATE as u64,
            background: None,
            ship: None,
            effect: None,
            output_dir: PathBuf::from("frames"),
            wav_path: PathBuf::from("demo.wav"),
            write_frames: true,
            notes: None,
        }
    }
}
