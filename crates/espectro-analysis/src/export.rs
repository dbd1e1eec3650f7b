//! PPM image file I/O.
//!
//! Spectrogram images cross the process boundary as binary PPM (P6): a
//! tiny self-describing header followed by packed RGB bytes, readable by
//! most image tools. Writes go through a temp file in the destination
//! directory and are persisted atomically, so a failed or cancelled export
//! never leaves a partial file behind.

use std::io::Write;
use std::path::Path;

use crate::image::PixelGrid;
use crate::{Error, Result};

/// Writes `image` to `path` as binary PPM.
///
/// The bytes land in a temporary file first and are renamed into place only
/// once fully written.
pub fn write_ppm(image: &PixelGrid, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut file = match dir {
        Some(dir) => tempfile::NamedTempFile::new_in(dir)?,
        None => tempfile::NamedTempFile::new_in(".")?,
    };
    write!(file, "P6\n{} {}\n255\n", image.width(), image.height())?;
    file.write_all(image.data())?;
    file.flush()?;
    file.persist(path).map_err(|err| Error::Io(err.error))?;
    Ok(())
}

/// Reads a binary PPM (P6) file into a [`PixelGrid`].
pub fn read_ppm(path: impl AsRef<Path>) -> Result<PixelGrid> {
    let bytes = std::fs::read(path)?;
    parse_ppm(&bytes)
}

fn parse_ppm(bytes: &[u8]) -> Result<PixelGrid> {
    let mut header = HeaderReader { bytes, at: 0 };

    let magic = header.token()?;
    if magic != b"P6" {
        return Err(Error::Image(format!(
            "expected P6 magic, found {:?}",
            String::from_utf8_lossy(&magic)
        )));
    }
    let width = header.number()?;
    let height = header.number()?;
    let maxval = header.number()?;
    if maxval != 255 {
        return Err(Error::Image(format!("unsupported max value {maxval}")));
    }
    if width == 0 || height == 0 {
        return Err(Error::Image("empty image".into()));
    }
    // Exactly one whitespace byte separates the header from the pixels.
    header.at += 1;

    let expected = width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or_else(|| Error::Image("image dimensions overflow".into()))?;
    let pixels = bytes
        .get(header.at..header.at + expected)
        .ok_or_else(|| Error::Image("truncated pixel data".into()))?;
    Ok(PixelGrid::from_raw(width, height, pixels.to_vec()))
}

/// Minimal PPM header tokenizer: whitespace-separated tokens with
/// `#`-to-end-of-line comments.
struct HeaderReader<'a> {
    bytes: &'a [u8],
    at: usize,
}

impl HeaderReader<'_> {
    fn token(&mut self) -> Result<Vec<u8>> {
        // Skip whitespace and comments.
        while self.at < self.bytes.len() {
            let byte = self.bytes[self.at];
            if byte == b'#' {
                while self.at < self.bytes.len() && self.bytes[self.at] != b'\n' {
                    self.at += 1;
                }
            } else if byte.is_ascii_whitespace() {
                self.at += 1;
            } else {
                break;
            }
        }
        let start = self.at;
        while self.at < self.bytes.len() && !self.bytes[self.at].is_ascii_whitespace() {
            self.at += 1;
        }
        if start == self.at {
            return Err(Error::Image("truncated header".into()));
        }
        Ok(self.bytes[start..self.at].to_vec())
    }

    fn number(&mut self) -> Result<usize> {
        let token = self.token()?;
        std::str::from_utf8(&token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                Error::Image(format!(
                    "bad header number {:?}",
                    String::from_utf8_lossy(&token)
                ))
            })
    }
}
