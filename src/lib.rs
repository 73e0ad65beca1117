//! Fixed-framerate parallax demo engine
//!
//! A deterministic audio-visual demo generator in the style of classic VGA
//! mode 13h productions. Every tick advances a phase-accumulator wavetable
//! synthesizer to produce one video frame's worth of stereo samples, and
//! composites a full 320x200 palette-indexed video frame: a four-band
//! parallax-scrolling background, transparent software sprites and an 8x16
//! bitmap-font score overlay.
//!
//! # Features
//! - Bank of 4 independently configurable wavetable tone generators
//! - 4 waveforms (sine, square, triangle, sawtooth) and 6 amplitude envelopes
//! - Sample-accurate PCM effect overlay on the left channel
//! - Four-band parallax background scroller with horizontal wraparound
//! - Color-keyed sprite blitter and additive bitmap text overlay
//! - 70 fps / 44.1 kHz frame-synchronous timing (630 samples per frame)
//!
//! # Crate feature flags
//! - `assets` (default): Pixmap (PPM) and raw PCM asset loading (`assets`)
//! - `export` (default): WAV audio and PPM frame export (`export`)
//! - `streaming` (opt-in): Real-time audio output (enables optional `rodio` dep)
//!
//! # Quick start
//! ## Render one tick
//! ```no_run
//! # #[cfg(feature = "assets")]
//! # {
//! use scroller::assets::builtin;
//! use scroller::{DemoAssets, DemoEngine};
//!
//! let assets = DemoAssets {
//!     background: builtin::synthetic_background(),
//!     player_tile: builtin::player_tile(),
//!     missile_tile: builtin::missile_tile(),
//!     effect: Vec::new(),
//! };
//! let mut engine = DemoEngine::new(assets).unwrap();
//! engine.tick(0);
//! let video = engine.frame_buffer();
//! let audio = engine.audio_frame();
//! # let _ = (video, audio);
//! # }
//! ```
//!
//! ## Offline export
//! ```no_run
//! # #[cfg(all(feature = "assets", feature = "export"))]
//! # {
//! use scroller::assets::builtin;
//! use scroller::export::WavFrameWriter;
//! use scroller::{DemoAssets, DemoEngine, TimingConfig};
//!
//! let assets = DemoAssets {
//!     background: builtin::synthetic_background(),
//!     player_tile: builtin::player_tile(),
//!     missile_tile: builtin::missile_tile(),
//!     effect: Vec::new(),
//! };
//! let mut engine = DemoEngine::new(assets).unwrap();
//! let mut wav = WavFrameWriter::create("demo.wav", TimingConfig::default()).unwrap();
//! for frame in 0..560 {
//!     engine.tick(frame);
//!     wav.write_frame(engine.audio_frame()).unwrap();
//! }
//! wav.finalize().unwrap();
//! # }
//! ```

#![warn(missing_docs)]

// Domain modules (feature-gated for modular use)
pub mod config; // Timing and demo configuration
pub mod engine; // Per-frame demo engine
pub mod scene; // Scripted scene state and tone triggers
pub mod synth; // Wavetable synthesis core
pub mod video; // Frame compositing

#[cfg(feature = "assets")]
pub mod assets; // Pixmap / PCM asset loading
#[cfg(feature = "export")]
pub mod export; // WAV and PPM frame output
#[cfg(feature = "streaming")]
pub mod streaming; // Audio output & streaming

/// Error types for demo engine operations
#[derive(thiserror::Error, Debug)]
pub enum ScrollerError {
    /// Error while decoding an asset file
    #[error("Asset error: {0}")]
    AssetError(String),

    /// Error writing audio or frame output
    #[error("Export error: {0}")]
    ExportError(String),

    /// IO error from filesystem or device
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Audio device error
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for ScrollerError {
    /// Converts a String into `ScrollerError::Other`.
    ///
    /// Convenience conversion for generic string errors. Prefer the specific
    /// variant constructors where the error class is known:
    /// - `ScrollerError::AssetError(msg)` for asset decoding failures
    /// - `ScrollerError::ConfigError(msg)` for invalid configuration
    /// - `ScrollerError::ExportError(msg)` for output issues
    /// - `ScrollerError::AudioDeviceError(msg)` for device initialization
    fn from(msg: String) -> Self {
        ScrollerError::Other(msg)
    }
}

impl From<&str> for ScrollerError {
    /// Converts a string slice into `ScrollerError::Other`.
    ///
    /// See [`From<String>`] for guidance on when to use explicit variant
    /// constructors instead.
    fn from(msg: &str) -> Self {
        ScrollerError::Other(msg.to_string())
    }
}

/// Result type for demo engine operations
pub type Result<T> = std::result::Result<T, ScrollerError>;

// Public API exports
pub use config::{DemoConfig, TimingConfig};
pub use engine::{DemoAssets, DemoEngine};
pub use scene::{NoteEvent, SceneState};
pub use synth::{
    AudioFrame, EffectMixer, EnvelopeShape, StereoSample, ToneBank, ToneGenerator, Waveform,
    WaveTables,
};
pub use video::{draw_overlay, draw_sprites, PixelGrid, Sprite};

#[cfg(feature = "export")]
pub use export::WavFrameWriter;
#[cfg(feature = "streaming")]
pub use streaming::{AudioDevice, RealtimePlayer, RingBuffer, StreamConfig};
