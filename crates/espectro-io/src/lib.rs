//! Audio I/O boundary for the Espectro spectrogram toolkit.
//!
//! This crate owns both edges of the audio path:
//!
//! - **Decoding**: [`WavDecoder`] opens a WAV file, accepts only 16-bit
//!   signed PCM, and yields normalized mono `f64` samples lazily
//! - **Loading**: [`load_signal`] drives the decoder into an in-memory or
//!   disk-backed [`Signal`](espectro_core::Signal), cancellable per sample
//! - **Encoding**: [`pcm`] converts a sample store to 16-bit big-endian
//!   PCM and writes WAV files for synthesized audio
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use espectro_core::CancelToken;
//! use espectro_io::{load_signal, StorageMode};
//!
//! let signal = load_signal("input.wav", StorageMode::Memory, &CancelToken::new())?;
//! println!("{}: {} samples at {} Hz", signal.name(), signal.len(), signal.sample_rate());
//! ```

mod decode;
mod load;
pub mod pcm;

pub use decode::{SampleIter, WavDecoder};
pub use load::{StorageMode, load_signal};

/// Maximum accepted signal length in samples.
///
/// Time positions stay comfortably inside `i64` sample arithmetic and the
/// temp-file byte offsets (`N·8`) inside `u64`.
pub const MAX_SAMPLES: u64 = i32::MAX as u64;

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV container read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The source is not 16-bit signed PCM.
    #[error("unsupported encoding: {0} (16-bit signed PCM required)")]
    UnsupportedEncoding(String),

    /// The source holds no samples.
    #[error("signal is empty")]
    Empty,

    /// The source exceeds [`MAX_SAMPLES`].
    #[error("signal too long: {0} samples")]
    TooLong(u64),

    /// The load was cancelled through its token.
    #[error("operation cancelled")]
    Cancelled,
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
