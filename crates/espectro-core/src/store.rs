//! Polymorphic sample storage.
//!
//! A [`SampleStore`] holds the `N` samples of a decoded signal and serves
//! windowed reads to the spectral engine. Two variants exist:
//!
//! - [`MemoryStore`] - a flat array, for signals that fit comfortably in RAM
//! - [`DiskStore`] - a raw big-endian `f64` temp file read through a
//!   [`BlockCache`], for multi-gigasample signals
//!
//! Both serve [`samples`](SampleStore::samples) requests with the same
//! clipping rule: the result always has exactly the requested length, with
//! out-of-range positions left at zero and in-range samples copied to the
//! *front* of the output. An underflowing request (start < 0) therefore
//! left-aligns the valid samples rather than placing them at their true
//! offset; spectra taken near the start of a signal depend on this exact
//! behavior.

use std::cell::RefCell;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::sync::Arc;

use crate::cache::{Block, BlockCache, BLOCK_SIZE};

/// Width of one stored sample in bytes (big-endian IEEE-754 double).
const SAMPLE_WIDTH: u64 = 8;

/// Read-only random access to a signal's samples.
///
/// Built once at load time; read-only for the lifetime of the owning
/// [`Signal`](crate::Signal).
pub trait SampleStore: Send {
    /// Total number of samples.
    fn len(&self) -> usize;

    /// Returns `true` if the store holds no samples.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the sample at `i`.
    ///
    /// In-memory stores index directly (and panic out of bounds, like any
    /// slice); the disk store reads one sample from the file and degrades
    /// to `0.0` on I/O failure.
    fn get(&self, i: usize) -> f64;

    /// Reads `length` samples starting at `start`, which may run off either
    /// end of the store.
    ///
    /// The result always has exactly `length` entries. The in-range portion
    /// of the request is copied to the front of the output; every other
    /// position stays zero.
    fn samples(&self, start: i64, length: usize) -> Vec<f64>;
}

/// Clips `(start, length)` against a store of `n` samples.
///
/// Returns the clamped read start and the number of samples to copy; a
/// fully out-of-range request copies nothing. A negative `start` reduces
/// the copied length, not the output length.
fn clip(start: i64, length: usize, n: usize) -> (usize, usize) {
    let mut start = start;
    let mut copy = length as i64;
    if start < 0 {
        copy += start;
        start = 0;
    }
    if start + copy > n as i64 {
        copy = n as i64 - start;
    }
    if copy <= 0 {
        (0, 0)
    } else {
        (start as usize, copy as usize)
    }
}

/// Sample store backed by a flat in-memory array.
pub struct MemoryStore {
    samples: Vec<f64>,
}

impl MemoryStore {
    /// Wraps an owned sample array.
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples }
    }
}

impl SampleStore for MemoryStore {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn get(&self, i: usize) -> f64 {
        self.samples[i]
    }

    fn samples(&self, start: i64, length: usize) -> Vec<f64> {
        let mut data = vec![0.0; length];
        let (start, copy) = clip(start, length, self.samples.len());
        data[..copy].copy_from_slice(&self.samples[start..start + copy]);
        data
    }
}

struct DiskInner {
    file: File,
    cache: BlockCache,
}

impl DiskInner {
    /// Fetches a block through the cache, reading and decoding it from the
    /// file on a miss. A block that fails to read is cached zero-filled.
    fn block(&mut self, index: usize, store_len: usize) -> Block {
        if let Some(block) = self.cache.get(index) {
            return block;
        }
        let mut decoded = vec![0.0; BLOCK_SIZE];
        let start = index * BLOCK_SIZE;
        let count = BLOCK_SIZE.min(store_len.saturating_sub(start));
        if let Err(err) = read_block(&mut self.file, start, &mut decoded[..count]) {
            tracing::warn!(block = index, %err, "block read failed, serving silence");
        }
        let block: Block = Arc::from(decoded);
        self.cache.insert(index, Arc::clone(&block));
        block
    }
}

/// Reads `out.len()` big-endian doubles starting at sample `start`.
fn read_block(file: &mut File, start: usize, out: &mut [f64]) -> std::io::Result<()> {
    let mut bytes = vec![0u8; out.len() * SAMPLE_WIDTH as usize];
    file.seek(SeekFrom::Start(start as u64 * SAMPLE_WIDTH))?;
    file.read_exact(&mut bytes)?;
    for (sample, chunk) in out.iter_mut().zip(bytes.chunks_exact(8)) {
        *sample = f64::from_be_bytes(chunk.try_into().expect("8-byte chunk"));
    }
    Ok(())
}

/// Sample store backed by a raw big-endian `f64` file, read through a
/// bounded LRU block cache.
///
/// The file is expected to be a headerless sequence of `len` big-endian
/// doubles, typically an unlinked temp file that disappears when this store
/// is dropped. I/O failures degrade to silence (zero samples) rather than
/// propagating, so reads are infallible; each failure is logged at `warn`.
pub struct DiskStore {
    inner: RefCell<DiskInner>,
    len: usize,
}

impl DiskStore {
    /// Wraps an open sample file holding `len` samples.
    pub fn new(file: File, len: usize) -> Self {
        Self {
            inner: RefCell::new(DiskInner {
                file,
                cache: BlockCache::new(),
            }),
            len,
        }
    }

    /// Number of blocks currently held by the cache (test hook).
    pub fn cached_blocks(&self) -> usize {
        self.inner.borrow().cache.len()
    }
}

impl SampleStore for DiskStore {
    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, i: usize) -> f64 {
        let inner = &mut *self.inner.borrow_mut();
        let mut bytes = [0u8; 8];
        let result = inner
            .file
            .seek(SeekFrom::Start(i as u64 * SAMPLE_WIDTH))
            .and_then(|_| inner.file.read_exact(&mut bytes));
        match result {
            Ok(()) => f64::from_be_bytes(bytes),
            Err(err) => {
                tracing::warn!(sample = i, %err, "sample read failed, serving silence");
                0.0
            }
        }
    }

    fn samples(&self, start: i64, length: usize) -> Vec<f64> {
        let mut data = vec![0.0; length];
        let (mut start, mut remaining) = clip(start, length, self.len);
        let mut out = 0;
        let inner = &mut *self.inner.borrow_mut();
        while remaining > 0 {
            let index = start / BLOCK_SIZE;
            let offset = start % BLOCK_SIZE;
            let run = (BLOCK_SIZE - offset).min(remaining);
            let block = inner.block(index, self.len);
            data[out..out + run].copy_from_slice(&block[offset..offset + run]);
            start += run;
            out += run;
            remaining -= run;
        }
        data
    }
}
