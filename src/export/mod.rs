//! WAV and PPM frame output
//!
//! The presentation half the core hands its buffers to: streaming WAV
//! export for the audio frames and P6 pixmap dumps for the video frames,
//! including the static palette mapping from 3-3-2 indices back to RGB.

pub mod ppm;
pub mod wav;

pub use ppm::{palette_rgb, save_frame, write_frame_ppm};
pub use wav::WavFrameWriter;
