//! 16-bit PCM output for playback and encoding.

use std::path::Path;

use espectro_core::{BLOCK_SIZE, SampleStore};
use hound::{SampleFormat, WavSpec, WavWriter};

use crate::{Error, Result};

/// Converts a normalized sample to a signed 16-bit value:
/// `round(clamp(sample·32768, i16::MIN, i16::MAX))`.
fn quantize(sample: f64) -> i16 {
    (sample * 32768.0)
        .clamp(f64::from(i16::MIN), f64::from(i16::MAX))
        .round() as i16
}

/// Renders a store as 16-bit signed big-endian mono PCM.
///
/// Samples are pulled in block-sized chunks so disk-backed stores stream
/// through their cache instead of being materialized at once.
pub fn pcm16_be_bytes(store: &dyn SampleStore) -> Vec<u8> {
    let n = store.len();
    let mut bytes = Vec::with_capacity(n * 2);
    let mut at = 0;
    while at < n {
        let take = BLOCK_SIZE.min(n - at);
        let buffer = store.samples(at as i64, BLOCK_SIZE);
        for &sample in &buffer[..take] {
            bytes.extend_from_slice(&quantize(sample).to_be_bytes());
        }
        at += take;
    }
    bytes
}

/// Writes a store to `path` as a 16-bit mono WAV at `sample_rate`.
///
/// The container is written to a same-directory temp file and persisted
/// atomically, so an I/O failure leaves no partial destination file.
pub fn write_wav16(
    store: &dyn SampleStore,
    sample_rate: u32,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let file = match dir {
        Some(dir) => tempfile::NamedTempFile::new_in(dir)?,
        None => tempfile::NamedTempFile::new_in(".")?,
    };

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::new(std::io::BufWriter::new(file.as_file()), spec)?;

    let n = store.len();
    let mut at = 0;
    while at < n {
        let take = BLOCK_SIZE.min(n - at);
        let buffer = store.samples(at as i64, BLOCK_SIZE);
        for &sample in &buffer[..take] {
            writer.write_sample(quantize(sample))?;
        }
        at += take;
    }
    writer.finalize()?;

    file.persist(path).map_err(|err| Error::Io(err.error))?;
    Ok(())
}
