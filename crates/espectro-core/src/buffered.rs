//! Fixed-size write buffering over a file sink.

use std::fs::File;
use std::io::{self, Write};

use crate::cache::BLOCK_SIZE;

const DEFAULT_BUFFER: usize = BLOCK_SIZE * 8;

/// A fixed-size write buffer over a file.
///
/// Bytes written through [`write_buffered`](Self::write_buffered) accumulate
/// in the buffer, which is written out to the file whenever it fills.
/// [`flush`](Self::flush) must be called explicitly after the last write;
/// there is intentionally no flush on drop, so a caller that forgets loses
/// the trailing partial buffer.
///
/// Used only while a disk-backed sample store is being built from a decode
/// stream.
pub struct BufferedFileWriter {
    file: File,
    buffer: Vec<u8>,
    at: usize,
}

impl BufferedFileWriter {
    /// Wraps `file` with the default buffer of 2048 samples worth of bytes.
    pub fn new(file: File) -> Self {
        Self::with_buffer_size(file, DEFAULT_BUFFER)
    }

    /// Wraps `file` with a buffer of `size` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0.
    pub fn with_buffer_size(file: File, size: usize) -> Self {
        assert!(size > 0, "buffer size must be > 0");
        Self {
            file,
            buffer: vec![0; size],
            at: 0,
        }
    }

    /// Appends `bytes` to the buffer, writing the buffer out to the file
    /// each time it fills.
    pub fn write_buffered(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut rest = bytes;
        while !rest.is_empty() {
            let room = self.buffer.len() - self.at;
            let take = room.min(rest.len());
            self.buffer[self.at..self.at + take].copy_from_slice(&rest[..take]);
            self.at += take;
            rest = &rest[take..];
            if self.at >= self.buffer.len() {
                self.flush()?;
            }
        }
        Ok(())
    }

    /// Writes any buffered bytes to the file and resets the buffer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.file.write_all(&self.buffer[..self.at])?;
        self.at = 0;
        Ok(())
    }

    /// Number of bytes currently waiting in the buffer.
    pub fn pending(&self) -> usize {
        self.at
    }

    /// Consumes the writer, returning the underlying file.
    ///
    /// Unflushed bytes are discarded, as with drop.
    pub fn into_inner(self) -> File {
        self.file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Seek, SeekFrom};

    fn read_back(mut file: File) -> Vec<u8> {
        let mut contents = Vec::new();
        file.seek(SeekFrom::Start(0)).unwrap();
        file.read_to_end(&mut contents).unwrap();
        contents
    }

    #[test]
    fn small_write_stays_buffered_until_flush() {
        let mut writer =
            BufferedFileWriter::with_buffer_size(tempfile::tempfile().unwrap(), 16);
        writer.write_buffered(&[1, 2, 3]).unwrap();
        assert_eq!(writer.pending(), 3);
        assert!(read_back(writer.file.try_clone().unwrap()).is_empty());

        writer.flush().unwrap();
        assert_eq!(writer.pending(), 0);
        assert_eq!(read_back(writer.into_inner()), vec![1, 2, 3]);
    }

    #[test]
    fn filling_the_buffer_writes_through() {
        let mut writer =
            BufferedFileWriter::with_buffer_size(tempfile::tempfile().unwrap(), 4);
        writer.write_buffered(&[1, 2, 3, 4]).unwrap();
        // Auto-flushed exactly at the boundary.
        assert_eq!(writer.pending(), 0);
        assert_eq!(read_back(writer.into_inner()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn write_spanning_buffer_boundary() {
        let mut writer =
            BufferedFileWriter::with_buffer_size(tempfile::tempfile().unwrap(), 4);
        writer.write_buffered(&[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(writer.pending(), 2);
        writer.flush().unwrap();
        assert_eq!(read_back(writer.into_inner()), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn trailing_bytes_lost_without_flush() {
        let mut writer =
            BufferedFileWriter::with_buffer_size(tempfile::tempfile().unwrap(), 4);
        writer.write_buffered(&[1, 2, 3, 4, 5, 6]).unwrap();
        // Only the auto-flushed first buffer reaches the file.
        assert_eq!(read_back(writer.into_inner()), vec![1, 2, 3, 4]);
    }
}
