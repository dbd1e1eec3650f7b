//! Audio synthesis from a power image.

use std::f64::consts::{PI, TAU};

use rand::Rng;

use espectro_core::{CancelToken, MemoryStore};

use crate::color::ColorCodec;
use crate::fft::SpectrumEngine;
use crate::image::PixelGrid;
use crate::{Error, Result};

/// Reconstructs a sample sequence from a spectrogram power image.
///
/// A power image carries no phase, so each bin gets a uniformly random
/// phase in `[-π, π)` — an intrinsic information loss, which makes
/// resynthesis non-deterministic by construction. Per image column the
/// decoded half-spectrum is inverse-transformed and the first
/// `floor(2B·overlap)` output samples are kept (scaled by 2), then the
/// kept segments are concatenated across columns.
pub struct ImageSynthesizer {
    overlap: f64,
}

impl ImageSynthesizer {
    /// Creates a synthesizer advancing by `overlap` of a transform segment
    /// per column.
    ///
    /// # Panics
    ///
    /// Panics if `overlap` is not in `(0, 1]`.
    pub fn new(overlap: f64) -> Self {
        assert!(
            overlap > 0.0 && overlap <= 1.0,
            "overlap must be in (0, 1]"
        );
        Self { overlap }
    }

    /// Samples produced per image column for `bins` frequency rows.
    pub fn samples_per_column(&self, bins: usize) -> usize {
        ((bins * 2) as f64 * self.overlap) as usize
    }

    /// Synthesizes audio from `image`, one column per time step with row 0
    /// as the highest frequency.
    ///
    /// `on_column(done, total)` reports progress after each column.
    /// Cancellation is polled per pixel; a cancelled synthesis returns
    /// [`Error::Cancelled`] and yields no samples.
    pub fn synthesize(
        &self,
        image: &PixelGrid,
        cancel: &CancelToken,
        mut on_column: impl FnMut(usize, usize),
    ) -> Result<MemoryStore> {
        let cols = image.width();
        let bins = image.height();
        let codec = ColorCodec::new(bins);
        let keep = self.samples_per_column(bins);

        let mut engine = SpectrumEngine::new();
        let mut rng = rand::rng();
        let mut samples = vec![0.0; keep * cols];
        let mut packed = vec![0.0; bins * 2];
        let mut at = 0;

        for col in 0..cols {
            for bin in 0..bins {
                if cancel.is_cancelled() {
                    return Err(Error::Cancelled);
                }
                // Row 0 is the highest frequency; bin 0 the lowest.
                let rgb = image.get(col, bins - bin - 1);
                let power = codec.decode_power(rgb);
                let amplitude = power.sqrt();
                let phase = rng.random::<f64>() * TAU - PI;
                packed[2 * bin] = amplitude * phase.cos();
                packed[2 * bin + 1] = amplitude * phase.sin();
            }
            let segment = engine.inverse_packed(&packed);
            for &sample in &segment[..keep] {
                samples[at] = sample * 2.0;
                at += 1;
            }
            on_column(col + 1, cols);
        }

        Ok(MemoryStore::new(samples))
    }
}
