//! PPM frame export and palette mapping
//!
//! Expands palette-index frame buffers back to RGB through the static
//! 3-3-2 palette (the inverse of the asset loader's quantization) and
//! writes binary P6 pixmaps, one file per frame.

use std::io::{BufWriter, Write};
use std::path::Path;

use crate::video::PixelGrid;
use crate::Result;

/// Expand a 3-3-2 palette index to its display RGB triplet
///
/// Mirrors VGA mode 13h palette programming: three bits of red and green
/// scaled by 36, two bits of blue scaled by 85.
#[inline]
pub fn palette_rgb(index: u8) -> (u8, u8, u8) {
    (
        ((index >> 5) & 0x07) * 36,
        ((index >> 2) & 0x07) * 36,
        (index & 0x03) * 85,
    )
}

/// Write a frame as a binary P6 pixmap
pub fn write_frame_ppm<W: Write>(frame: &PixelGrid, mut out: W) -> Result<()> {
    writeln!(out, "P6\n{} {}\n255", frame.width(), frame.height())?;
    let mut row = Vec::with_capacity(frame.width() * 3);
    for y in 0..frame.height() {
        row.clear();
        for &index in frame.row(y) {
            let (r, g, b) = palette_rgb(index);
            row.extend_from_slice(&[r, g, b]);
        }
        out.write_all(&row)?;
    }
    Ok(())
}

/// Write a frame as a P6 pixmap file
pub fn save_frame<P: AsRef<Path>>(frame: &PixelGrid, path: P) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_frame_ppm(frame, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::{BLUE, RED, WHITE};

    #[test]
    fn test_palette_extremes() {
        assert_eq!(palette_rgb(0x00), (0, 0, 0));
        assert_eq!(palette_rgb(WHITE), (252, 252, 255));
        assert_eq!(palette_rgb(RED), (252, 0, 0));
        assert_eq!(palette_rgb(BLUE), (0, 0, 255));
    }

    #[test]
    #[cfg(feature = "assets")]
    fn test_palette_inverts_quantization() {
        use crate::assets::rgb332;
        // Quantize then expand lands in the same 3-3-2 bucket
        for &(r, g, b) in &[(255u8, 128u8, 64u8), (10, 200, 90), (0, 0, 0)] {
            let index = rgb332(r, g, b);
            let (er, eg, eb) = palette_rgb(index);
            assert_eq!(rgb332(er, eg, eb), index);
        }
    }

    #[test]
    fn test_write_frame_header_and_size() {
        let mut frame = PixelGrid::new(3, 2);
        frame.set(0, 0, WHITE);
        let mut out = Vec::new();
        write_frame_ppm(&frame, &mut out).unwrap();
        assert!(out.starts_with(b"P6\n3 2\n255\n"));
        assert_eq!(out.len(), b"P6\n3 2\n255\n".len() + 3 * 2 * 3);
    }

    #[test]
    #[cfg(feature = "assets")]
    fn test_save_frame_roundtrips_through_loader() {
        use crate::assets::load_pixmap;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.ppm");
        let mut frame = PixelGrid::new(4, 4);
        frame.set(1, 2, RED);
        frame.set(3, 3, BLUE);
        save_frame(&frame, &path).unwrap();

        let back = load_pixmap(&path).unwrap();
        assert_eq!(back.get(1, 2), RED);
        assert_eq!(back.get(3, 3), BLUE);
        assert_eq!(back.get(0, 0), 0);
    }
}
