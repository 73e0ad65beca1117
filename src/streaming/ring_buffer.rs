//! Ring buffer for concurrent sample generation and playback
//!
//! A circular buffer of interleaved stereo samples shared by two threads:
//! the demo loop writes rendered frames, the audio device thread reads
//! them. Memory consumption is fixed at the buffer capacity regardless of
//! demo length. Mutex-protected storage with atomic position tracking for
//! cross-thread visibility.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{Result, ScrollerError};

/// Ring buffer for streaming interleaved i16 audio samples
///
/// # Thread Safety
/// - One producer thread (the demo loop)
/// - One consumer thread (audio playback)
/// - Capacity is rounded up to a power of two so positions wrap with a mask
#[derive(Debug)]
pub struct RingBuffer {
    /// Shared sample storage (protected by mutex)
    buffer: Mutex<Vec<i16>>,
    /// Write position (producer)
    write_pos: AtomicUsize,
    /// Read position (consumer)
    read_pos: AtomicUsize,
    /// Capacity (power of 2)
    capacity: usize,
    /// Capacity mask: `pos & mask == pos % capacity`
    mask: usize,
}

impl RingBuffer {
    /// Create a new ring buffer; capacity rounds up to the next power of 2
    pub fn new(requested_capacity: usize) -> Result<Self> {
        if requested_capacity == 0 {
            return Err(ScrollerError::ConfigError(
                "ring buffer capacity must be greater than 0".into(),
            ));
        }

        let capacity = requested_capacity.next_power_of_two();

        // Refuse unreasonably large allocations
        const MAX_CAPACITY: usize = 256 * 1024 * 1024 / std::mem::size_of::<i16>();
        if capacity > MAX_CAPACITY {
            return Err(ScrollerError::ConfigError(format!(
                "ring buffer capacity {capacity} exceeds maximum safe size {MAX_CAPACITY}"
            )));
        }

        Ok(RingBuffer {
            buffer: Mutex::new(vec![0; capacity]),
            write_pos: AtomicUsize::new(0),
            read_pos: AtomicUsize::new(0),
            capacity,
            mask: capacity - 1,
        })
    }

    /// Number of samples available to read without blocking
    pub fn available_read(&self) -> usize {
        let write = self.write_pos.load(Ordering::Acquire);
        let read = self.read_pos.load(Ordering::Acquire);
        write - read
    }

    /// Number of samples that can be written without overwriting
    pub fn available_write(&self) -> usize {
        self.capacity - 1 - self.available_read()
    }

    /// Buffer fill level, 0.0 (empty) to 1.0 (full)
    pub fn fill_percentage(&self) -> f32 {
        self.available_read() as f32 / self.capacity as f32
    }

    /// Write samples (producer side); returns the count actually written
    ///
    /// Returns 0 when the buffer is full; the caller decides whether to
    /// back off and retry.
    pub fn write(&self, samples: &[i16]) -> usize {
        let mut buf = self.buffer.lock();

        // Compute free space under the lock to avoid racing the reader
        let write_pos = self.write_pos.load(Ordering::Acquire);
        let read_pos = self.read_pos.load(Ordering::Acquire);
        let available = self.capacity - 1 - (write_pos - read_pos);

        let to_write = samples.len().min(available);
        if to_write == 0 {
            return 0;
        }

        let write_idx = write_pos & self.mask;
        if write_idx + to_write <= self.capacity {
            buf[write_idx..write_idx + to_write].copy_from_slice(&samples[..to_write]);
        } else {
            let first_part = self.capacity - write_idx;
            buf[write_idx..].copy_from_slice(&samples[..first_part]);
            buf[..to_write - first_part].copy_from_slice(&samples[first_part..to_write]);
        }

        drop(buf);
        self.write_pos.store(write_pos + to_write, Ordering::Release);
        to_write
    }

    /// Read samples (consumer side); returns the count actually read
    pub fn read(&self, dest: &mut [i16]) -> usize {
        let buf = self.buffer.lock();

        let write_pos = self.write_pos.load(Ordering::Acquire);
        let read_pos = self.read_pos.load(Ordering::Acquire);
        let available = write_pos - read_pos;

        let to_read = dest.len().min(available);
        if to_read == 0 {
            return 0;
        }

        let read_idx = read_pos & self.mask;
        if read_idx + to_read <= self.capacity {
            dest[..to_read].copy_from_slice(&buf[read_idx..read_idx + to_read]);
        } else {
            let first_part = self.capacity - read_idx;
            dest[..first_part].copy_from_slice(&buf[read_idx..]);
            dest[first_part..to_read].copy_from_slice(&buf[..to_read - first_part]);
        }

        drop(buf);
        self.read_pos.store(read_pos + to_read, Ordering::Release);
        to_read
    }

    /// Drain and discard everything buffered
    pub fn flush(&self) {
        let write_pos = self.write_pos.load(Ordering::Acquire);
        self.read_pos.store(write_pos, Ordering::Release);
    }
}
