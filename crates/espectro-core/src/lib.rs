//! Espectro Core - Sample storage for the Espectro spectrogram toolkit.
//!
//! This crate provides the storage layer that the spectral engine reads
//! through, plus the small process primitives shared by long-running
//! operations:
//!
//! - [`SampleStore`] - polymorphic access to a signal's samples, backed
//!   either by a flat in-memory array ([`MemoryStore`]) or by a temporary
//!   raw sample file read through a block cache ([`DiskStore`])
//! - [`BlockCache`] - bounded least-recently-used cache of decoded sample
//!   blocks
//! - [`BufferedFileWriter`] - fixed-size write buffer used while a
//!   disk-backed store is being built from a decode stream
//! - [`Signal`] - an immutable named signal: sample rate plus an owned store
//! - [`CancelToken`] / [`BusyFlag`] - cooperative cancellation and
//!   single-operation guarding for background work
//! - [`PlayCursor`] - lock-guarded playback position shared across threads
//!
//! Stores hold `f64` samples normalized to `[-1, 1]`. A store is built once
//! at load time and is read-only for the lifetime of its [`Signal`]; the
//! disk variant owns an unlinked temporary file that disappears when the
//! signal is dropped.

mod buffered;
mod cache;
mod cursor;
mod signal;
mod store;
mod task;

pub use buffered::BufferedFileWriter;
pub use cache::{Block, BlockCache, BLOCK_SIZE, CACHE_CAPACITY};
pub use cursor::PlayCursor;
pub use signal::Signal;
pub use store::{DiskStore, MemoryStore, SampleStore};
pub use task::{BusyFlag, BusyGuard, CancelToken};
