//! Raw PCM effect loading
//!
//! The effect sample ships as headerless mono signed 16-bit little-endian
//! PCM at the engine sample rate.

use std::path::Path;

use crate::{Result, ScrollerError};

/// Decode headerless mono s16le PCM from memory
pub fn parse_pcm(data: &[u8]) -> Result<Vec<i16>> {
    if data.len() % 2 != 0 {
        return Err(ScrollerError::AssetError(format!(
            "PCM data has odd length {}",
            data.len()
        )));
    }
    Ok(data
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect())
}

/// Load a headerless mono s16le PCM file
pub fn load_pcm<P: AsRef<Path>>(path: P) -> Result<Vec<i16>> {
    let data = std::fs::read(path)?;
    parse_pcm(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_little_endian() {
        let samples = parse_pcm(&[0x00, 0x00, 0xff, 0x7f, 0x00, 0x80]).unwrap();
        assert_eq!(samples, vec![0, i16::MAX, i16::MIN]);
    }

    #[test]
    fn test_rejects_odd_length() {
        assert!(parse_pcm(&[0x01, 0x02, 0x03]).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("laser.raw");
        std::fs::write(&path, [0x10, 0x00, 0xf0, 0xff]).unwrap();
        assert_eq!(load_pcm(&path).unwrap(), vec![16, -16]);
    }
}
