//! Building a [`Signal`] from the decoder.

use std::io::{Seek, SeekFrom};
use std::path::Path;

use espectro_core::{
    BufferedFileWriter, CancelToken, DiskStore, MemoryStore, SampleStore, Signal,
};

use crate::decode::WavDecoder;
use crate::{Error, Result};

/// Where a loaded signal's samples live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Flat in-memory array.
    #[default]
    Memory,
    /// Unlinked temp file of big-endian doubles behind a block cache.
    Disk,
}

/// Decodes `path` into a [`Signal`] with the chosen storage.
///
/// Cancellation is polled once per sample. A failed or cancelled load
/// exposes no partial signal; the disk path writes into an already-unlinked
/// temp file, so abandoning it discards the data automatically.
pub fn load_signal(
    path: impl AsRef<Path>,
    mode: StorageMode,
    cancel: &CancelToken,
) -> Result<Signal> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map_or_else(|| "signal".to_string(), |n| n.to_string_lossy().into_owned());

    let decoder = WavDecoder::open(path)?;
    let length = decoder.len();
    let sample_rate = decoder.sample_rate();
    tracing::info!(name = %name, samples = length, sample_rate, ?mode, "loading signal");

    let store: Box<dyn SampleStore> = match mode {
        StorageMode::Memory => {
            let mut samples = Vec::with_capacity(length);
            for sample in decoder.samples() {
                if cancel.is_cancelled() {
                    return Err(Error::Cancelled);
                }
                samples.push(sample?);
            }
            Box::new(MemoryStore::new(samples))
        }
        StorageMode::Disk => {
            let mut writer = BufferedFileWriter::new(tempfile::tempfile()?);
            for sample in decoder.samples() {
                if cancel.is_cancelled() {
                    return Err(Error::Cancelled);
                }
                writer.write_buffered(&sample?.to_be_bytes())?;
            }
            writer.flush()?;
            let mut file = writer.into_inner();
            file.seek(SeekFrom::Start(0))?;
            Box::new(DiskStore::new(file, length))
        }
    };

    Ok(Signal::new(name, sample_rate, store))
}
