//! WAV audio export
//!
//! Streams rendered audio frames into a 16-bit stereo WAV file, one frame
//! at a time, so an arbitrarily long demo never buffers more than one
//! frame of audio.

use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::config::TimingConfig;
use crate::synth::AudioFrame;
use crate::{Result, ScrollerError};

/// Incremental WAV writer fed one audio frame per tick
pub struct WavFrameWriter {
    writer: WavWriter<BufWriter<File>>,
}

impl WavFrameWriter {
    /// Create a 16-bit stereo WAV file at the engine sample rate
    pub fn create<P: AsRef<Path>>(path: P, timing: TimingConfig) -> Result<Self> {
        let spec = WavSpec {
            channels: 2,
            sample_rate: timing.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let writer = WavWriter::create(path, spec)
            .map_err(|e| ScrollerError::ExportError(format!("cannot create WAV: {e}")))?;
        Ok(WavFrameWriter { writer })
    }

    /// Append one frame of interleaved stereo samples
    pub fn write_frame(&mut self, frame: &AudioFrame) -> Result<()> {
        for sample in frame.interleaved() {
            self.writer
                .write_sample(sample)
                .map_err(|e| ScrollerError::ExportError(format!("WAV write failed: {e}")))?;
        }
        Ok(())
    }

    /// Finish the file, patching up the RIFF header
    pub fn finalize(self) -> Result<()> {
        self.writer
            .finalize()
            .map_err(|e| ScrollerError::ExportError(format!("WAV finalize failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::AudioFrame;

    #[test]
    fn test_wav_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");

        let mut frame = AudioFrame::new(4);
        for (i, sample) in frame.samples_mut().iter_mut().enumerate() {
            sample.left = i as i16 * 100;
            sample.right = -(i as i16) * 100;
        }

        let mut writer = WavFrameWriter::create(&path, TimingConfig::default()).unwrap();
        writer.write_frame(&frame).unwrap();
        writer.finalize().unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().channels, 2);
        assert_eq!(reader.spec().sample_rate, 44_100);
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0, 0, 100, -100, 200, -200, 300, -300]);
    }
}
