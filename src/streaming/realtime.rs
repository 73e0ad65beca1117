//! Real-time audio playback with streaming
//!
//! The producer-facing half of the streaming path: accepts rendered audio
//! frames, pushes them into the shared ring buffer with backpressure, and
//! tracks overrun statistics. Blocking on a full buffer is what paces the
//! demo loop at the device's real-time rate.

use parking_lot::Mutex;
use std::sync::Arc;

use super::{RingBuffer, StreamConfig, BUFFER_BACKOFF_MICROS};
use crate::synth::AudioFrame;
use crate::Result;

/// Real-time audio player with streaming
pub struct RealtimePlayer {
    /// Ring buffer shared with the audio device
    buffer: Arc<RingBuffer>,
    /// Stream configuration
    config: StreamConfig,
    /// Playback statistics
    stats: Arc<Mutex<PlaybackStats>>,
}

/// Playback statistics for monitoring overruns and buffer health
#[derive(Debug, Clone, Copy)]
pub struct PlaybackStats {
    /// Number of overrun events (producer write hit a full buffer)
    pub overrun_count: usize,
    /// Number of samples pushed
    pub samples_played: usize,
    /// Current buffer fill percentage
    pub fill_percentage: f32,
}

impl RealtimePlayer {
    /// Create a new real-time player with streaming
    pub fn new(config: StreamConfig) -> Result<Self> {
        let buffer = Arc::new(RingBuffer::new(config.ring_buffer_size)?);
        let stats = Arc::new(Mutex::new(PlaybackStats {
            overrun_count: 0,
            samples_played: 0,
            fill_percentage: 0.0,
        }));
        Ok(RealtimePlayer {
            buffer,
            config,
            stats,
        })
    }

    /// Push one rendered audio frame, blocking until it is fully buffered
    pub fn write_frame_blocking(&self, frame: &AudioFrame) -> usize {
        let samples: Vec<i16> = frame.interleaved().collect();
        self.write_blocking(&samples)
    }

    /// Write interleaved samples, blocking with backpressure until done
    pub fn write_blocking(&self, samples: &[i16]) -> usize {
        let mut total_written = 0;
        let mut remaining = samples;

        while !remaining.is_empty() {
            let written = self.buffer.write(remaining);

            {
                let mut stats = self.stats.lock();
                stats.samples_played += written;
                stats.fill_percentage = self.buffer.fill_percentage();
                if written == 0 {
                    stats.overrun_count += 1;
                }
            }

            total_written += written;

            if written == 0 {
                // Buffer is full, back off and retry
                std::thread::sleep(std::time::Duration::from_micros(BUFFER_BACKOFF_MICROS));
            } else {
                remaining = &remaining[written..];
            }
        }

        total_written
    }

    /// Write without blocking; returns the count actually buffered
    pub fn write_nonblocking(&self, samples: &[i16]) -> usize {
        let written = self.buffer.write(samples);
        let mut stats = self.stats.lock();
        if written < samples.len() {
            stats.overrun_count += 1;
        }
        stats.samples_played += written;
        stats.fill_percentage = self.buffer.fill_percentage();
        written
    }

    /// Current playback statistics
    pub fn get_stats(&self) -> PlaybackStats {
        *self.stats.lock()
    }

    /// Buffer fill percentage (0.0 to 1.0)
    pub fn fill_percentage(&self) -> f32 {
        self.buffer.fill_percentage()
    }

    /// Buffer latency in milliseconds
    pub fn latency_ms(&self) -> f32 {
        self.config.latency_ms()
    }

    /// The stream configuration
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// The shared ring buffer, for audio device integration
    pub fn get_buffer(&self) -> Arc<RingBuffer> {
        Arc::clone(&self.buffer)
    }
}
