//! Audio output & streaming
//!
//! Real-time playback of the rendered audio frames with bounded memory: a
//! ring buffer sits between the frame-producing demo loop and the audio
//! device thread, and backpressure on the producer side paces the demo at
//! the device's real-time rate.

pub mod audio_device;
pub mod realtime;
pub mod ring_buffer;

pub use audio_device::AudioDevice;
pub use realtime::{PlaybackStats, RealtimePlayer};
pub use ring_buffer::RingBuffer;

/// Default sample rate (44.1 kHz)
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Buffer backoff time in microseconds
pub const BUFFER_BACKOFF_MICROS: u64 = 100;

/// Configuration for streaming playback
#[derive(Debug, Clone, Copy)]
pub struct StreamConfig {
    /// Size of the ring buffer (in interleaved samples)
    /// Larger buffers = more latency but less chance of underrun
    pub ring_buffer_size: usize,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of audio channels
    pub channels: u16,
}

impl StreamConfig {
    /// Configuration optimized for low latency
    /// Buffer = 8192 interleaved samples ≈ 93ms of stereo @ 44.1kHz
    pub fn low_latency(sample_rate: u32) -> Self {
        StreamConfig {
            ring_buffer_size: 8192,
            sample_rate,
            channels: 2,
        }
    }

    /// Configuration optimized for stability
    /// Buffer = 32768 interleaved samples ≈ 372ms of stereo @ 44.1kHz
    pub fn stable(sample_rate: u32) -> Self {
        StreamConfig {
            ring_buffer_size: 32_768,
            sample_rate,
            channels: 2,
        }
    }

    /// Buffer latency in milliseconds
    pub fn latency_ms(&self) -> f32 {
        let frames = self.ring_buffer_size as f32 / self.channels.max(1) as f32;
        (frames / self.sample_rate as f32) * 1000.0
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self::stable(DEFAULT_SAMPLE_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_config_latency() {
        let config = StreamConfig::low_latency(44_100);
        let latency = config.latency_ms();
        assert!(latency > 90.0 && latency < 95.0);
    }

    #[test]
    fn test_stable_config_latency() {
        let config = StreamConfig::stable(44_100);
        assert!(config.latency_ms() > 300.0);
    }
}
