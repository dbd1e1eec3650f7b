//! Espectro Analysis - Spectral engine for the Espectro spectrogram toolkit.
//!
//! This crate turns sample windows into colour-coded spectra and back:
//!
//! - [`window`] - the selectable weighting curves applied before a transform
//! - [`fft`] - [`SpectrumEngine`]: real FFT with a single length-keyed plan
//! - [`spectrum`] - the transient per-window power/phase value object
//! - [`color`] - [`ColorCodec`]: logarithmic power ↔ RGB gradient
//! - [`image`] - [`PixelGrid`]: the raster exchanged with image codecs
//! - [`render`] - [`SpectrogramRenderer`]: signal → spectrogram image
//! - [`synth`] - [`ImageSynthesizer`]: power image → audio samples
//! - [`export`] - PPM image file I/O
//!
//! ## Example
//!
//! ```rust,ignore
//! use espectro_analysis::{SpectrogramRenderer, SpectrumEngine, SpectrumMode, WindowFunction};
//! use espectro_core::CancelToken;
//!
//! let renderer = SpectrogramRenderer::new(
//!     512, 0.5, WindowFunction::Hann, SpectrumMode::Power, false,
//! );
//! let mut engine = SpectrumEngine::new();
//! let image = renderer.render(&mut engine, &signal, &CancelToken::new(), |_, _| {})?;
//! espectro_analysis::export::write_ppm(&image, "spectrogram.ppm")?;
//! ```

pub mod color;
pub mod export;
pub mod fft;
pub mod image;
pub mod render;
pub mod spectrum;
pub mod synth;
pub mod window;

pub use color::ColorCodec;
pub use fft::SpectrumEngine;
pub use image::PixelGrid;
pub use render::SpectrogramRenderer;
pub use spectrum::{Spectrum, SpectrumMode};
pub use synth::ImageSynthesizer;
pub use window::WindowFunction;

/// Error types for spectral operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The operation was cancelled through its [`CancelToken`](espectro_core::CancelToken).
    #[error("operation cancelled")]
    Cancelled,

    /// Image file read/write error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed image data.
    #[error("invalid image: {0}")]
    Image(String),
}

/// Convenience result type for spectral operations.
pub type Result<T> = std::result::Result<T, Error>;
