//! PPM pixmap decoding
//!
//! Parses the two portable-pixmap flavours the demo's art pipeline
//! produces: `P3` (ASCII) and `P6` (binary), with `#` comments in the
//! header. Samples are quantized straight to 3-3-2 palette indices; the
//! full-range RGB never leaves this module.

use nom::branch::alt;
use nom::bytes::complete::{tag, take, take_while, take_while1};
use nom::combinator::{map, map_res, value};
use nom::multi::many0_count;
use nom::sequence::pair;
use nom::IResult;
use std::path::Path;

use crate::assets::rgb332;
use crate::video::PixelGrid;
use crate::{Result, ScrollerError};

/// Pixmap sample encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PixmapFormat {
    /// `P3`: whitespace-separated ASCII decimal samples
    Ascii,
    /// `P6`: one raw byte per sample
    Binary,
}

/// Parsed pixmap header fields
#[derive(Debug, Clone, Copy)]
struct PixmapHeader {
    format: PixmapFormat,
    width: u32,
    height: u32,
    maxval: u32,
}

/// Whitespace and `#`-comment runs between header tokens
fn separator(input: &[u8]) -> IResult<&[u8], ()> {
    value(
        (),
        many0_count(alt((
            value((), take_while1(|c: u8| c.is_ascii_whitespace())),
            value((), pair(tag("#"), take_while(|c| c != b'\n'))),
        ))),
    )(input)
}

/// One ASCII decimal token
fn decimal(input: &[u8]) -> IResult<&[u8], u32> {
    map_res(
        take_while1(|c: u8| c.is_ascii_digit()),
        |digits: &[u8]| String::from_utf8_lossy(digits).parse::<u32>(),
    )(input)
}

fn magic(input: &[u8]) -> IResult<&[u8], PixmapFormat> {
    alt((
        map(tag("P3"), |_| PixmapFormat::Ascii),
        map(tag("P6"), |_| PixmapFormat::Binary),
    ))(input)
}

/// Header up to and including the maxval token (trailing separator not
/// consumed: binary data starts exactly one byte after it)
fn header(input: &[u8]) -> IResult<&[u8], PixmapHeader> {
    let (input, format) = magic(input)?;
    let (input, _) = separator(input)?;
    let (input, width) = decimal(input)?;
    let (input, _) = separator(input)?;
    let (input, height) = decimal(input)?;
    let (input, _) = separator(input)?;
    let (input, maxval) = decimal(input)?;
    Ok((
        input,
        PixmapHeader {
            format,
            width,
            height,
            maxval,
        },
    ))
}

/// Decode a PPM image from memory into a palette-index grid
pub fn parse_pixmap(data: &[u8]) -> Result<PixelGrid> {
    let (rest, header) =
        header(data).map_err(|e| ScrollerError::AssetError(format!("bad pixmap header: {e}")))?;

    if header.maxval != 255 {
        return Err(ScrollerError::AssetError(format!(
            "unsupported pixmap depth {} (expected 255)",
            header.maxval
        )));
    }
    let width = header.width as usize;
    let height = header.height as usize;
    if width == 0 || height == 0 {
        return Err(ScrollerError::AssetError("empty pixmap".into()));
    }

    let mut pixels = Vec::with_capacity(width * height);
    match header.format {
        PixmapFormat::Binary => {
            // Exactly one whitespace byte separates the header from the data
            let (rest, _) = take::<_, _, nom::error::Error<&[u8]>>(1usize)(rest)
                .map_err(|_| ScrollerError::AssetError("truncated pixmap".into()))?;
            if rest.len() < width * height * 3 {
                return Err(ScrollerError::AssetError(format!(
                    "pixmap data truncated: {} bytes for {width}x{height}",
                    rest.len()
                )));
            }
            for rgb in rest[..width * height * 3].chunks_exact(3) {
                pixels.push(rgb332(rgb[0], rgb[1], rgb[2]));
            }
        }
        PixmapFormat::Ascii => {
            let mut rest = rest;
            for _ in 0..width * height {
                let mut sample = [0u8; 3];
                for channel in &mut sample {
                    let (after_sep, _) = separator(rest)
                        .map_err(|e| ScrollerError::AssetError(format!("bad pixmap: {e}")))?;
                    let (after_num, value) = decimal(after_sep).map_err(|_| {
                        ScrollerError::AssetError("pixmap data truncated".into())
                    })?;
                    if value > 255 {
                        return Err(ScrollerError::AssetError(format!(
                            "sample {value} exceeds depth 255"
                        )));
                    }
                    *channel = value as u8;
                    rest = after_num;
                }
                pixels.push(rgb332(sample[0], sample[1], sample[2]));
            }
        }
    }

    PixelGrid::from_vec(width, height, pixels)
}

/// Load and decode a PPM file
pub fn load_pixmap<P: AsRef<Path>>(path: P) -> Result<PixelGrid> {
    let data = std::fs::read(path)?;
    parse_pixmap(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_p3() {
        let data = b"P3\n# test card\n2 2\n255\n255 0 0  0 255 0\n0 0 255  255 255 255\n";
        let grid = parse_pixmap(data).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(0, 0), 0xe0);
        assert_eq!(grid.get(1, 0), 0x1c);
        assert_eq!(grid.get(0, 1), 0x03);
        assert_eq!(grid.get(1, 1), 0xff);
    }

    #[test]
    fn test_parse_p6() {
        let mut data = b"P6 2 1 255\n".to_vec();
        data.extend_from_slice(&[255, 0, 0, 0, 0, 255]);
        let grid = parse_pixmap(&data).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.get(0, 0), 0xe0);
        assert_eq!(grid.get(1, 0), 0x03);
    }

    #[test]
    fn test_rejects_wrong_depth() {
        let data = b"P3 1 1 65535\n0 0 0\n";
        assert!(parse_pixmap(data).is_err());
    }

    #[test]
    fn test_rejects_truncated_binary() {
        let mut data = b"P6 4 4 255\n".to_vec();
        data.extend_from_slice(&[0; 10]);
        assert!(parse_pixmap(&data).is_err());
    }

    #[test]
    fn test_rejects_truncated_ascii() {
        let data = b"P3 2 2 255\n255 0 0\n";
        assert!(parse_pixmap(data).is_err());
    }

    #[test]
    fn test_rejects_unknown_magic() {
        assert!(parse_pixmap(b"P5 1 1 255\n\0").is_err());
    }

    #[test]
    fn test_load_pixmap_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tile.ppm");
        std::fs::write(&path, b"P3 1 1 255\n12 200 80\n").unwrap();
        let grid = load_pixmap(&path).unwrap();
        assert_eq!(grid.get(0, 0), rgb332(12, 200, 80));
    }
}
