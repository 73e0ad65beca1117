//! Audio device integration using rodio
//!
//! Plays the ring buffer's interleaved stereo samples on the system audio
//! device. Underruns feed silence to keep the stream alive; `finish()`
//! lets the source terminate once the demo stops producing.

use rodio::{OutputStream, Sink, Source};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::RingBuffer;
use crate::{Result, ScrollerError};

/// Batch size for ring buffer reads (reduces lock contention)
const READ_CHUNK: usize = 4096;

/// Audio source that reads from the shared ring buffer
struct RingBufferSource {
    ring_buffer: Arc<RingBuffer>,
    sample_rate: u32,
    channels: u16,
    finished: Arc<AtomicBool>,
    /// Internal buffer for batch reads
    buffer: Vec<i16>,
    /// Current position in the internal buffer
    buffer_pos: usize,
}

impl RingBufferSource {
    fn new(
        ring_buffer: Arc<RingBuffer>,
        sample_rate: u32,
        channels: u16,
        finished: Arc<AtomicBool>,
    ) -> Self {
        RingBufferSource {
            ring_buffer,
            sample_rate,
            channels,
            finished,
            buffer: vec![0; READ_CHUNK],
            buffer_pos: READ_CHUNK, // Force a batch read on first pull
        }
    }
}

impl Source for RingBufferSource {
    fn current_frame_len(&self) -> Option<usize> {
        let available = self.ring_buffer.available_read();
        if available > 0 {
            Some(available)
        } else {
            Some(READ_CHUNK)
        }
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

impl Iterator for RingBufferSource {
    type Item = i16;

    fn next(&mut self) -> Option<i16> {
        if self.buffer_pos >= self.buffer.len() {
            if self.finished.load(Ordering::Relaxed) && self.ring_buffer.available_read() == 0 {
                return None;
            }
            let read = self.ring_buffer.read(&mut self.buffer);
            self.buffer_pos = 0;
            if read == 0 {
                // Underrun - feed silence to keep the stream alive
                self.buffer.fill(0);
            } else if read < self.buffer.len() {
                self.buffer[read..].fill(0);
            }
        }

        let sample = self.buffer[self.buffer_pos];
        self.buffer_pos += 1;
        Some(sample)
    }
}

/// Audio playback device using rodio
pub struct AudioDevice {
    _stream: OutputStream,
    sink: Sink,
    finished: Arc<AtomicBool>,
}

impl AudioDevice {
    /// Create a new audio device and start playback
    ///
    /// # Arguments
    /// * `sample_rate` - Sample rate in Hz (typically 44100)
    /// * `channels` - Number of audio channels (2 for the demo's stereo mix)
    /// * `ring_buffer` - The ring buffer the demo loop writes into
    pub fn new(sample_rate: u32, channels: u16, ring_buffer: Arc<RingBuffer>) -> Result<Self> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| ScrollerError::AudioDeviceError(format!("cannot open stream: {e}")))?;

        let sink = Sink::try_new(&stream_handle)
            .map_err(|e| ScrollerError::AudioDeviceError(format!("cannot create sink: {e}")))?;

        let finished = Arc::new(AtomicBool::new(false));
        let source =
            RingBufferSource::new(ring_buffer, sample_rate, channels, Arc::clone(&finished));
        sink.append(source);

        Ok(AudioDevice {
            _stream: stream,
            sink,
            finished,
        })
    }

    /// Pause playback
    pub fn pause(&self) {
        self.sink.pause();
    }

    /// Resume playback
    pub fn play(&self) {
        self.sink.play();
    }

    /// Signal that no more samples will be produced
    ///
    /// The source drains what is buffered and then terminates instead of
    /// playing silence forever.
    pub fn finish(&self) {
        self.finished.store(true, Ordering::Relaxed);
    }

    /// Block until the sink has drained
    pub fn wait_for_finish(&self) {
        self.sink.sleep_until_end();
    }
}

impl Drop for AudioDevice {
    fn drop(&mut self) {
        self.pause();
    }
}
