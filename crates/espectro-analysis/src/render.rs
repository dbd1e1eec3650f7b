//! Spectrogram tiling and image rendering.

use espectro_core::{CancelToken, Signal};

use crate::color::ColorCodec;
use crate::fft::SpectrumEngine;
use crate::image::PixelGrid;
use crate::spectrum::{Spectrum, SpectrumMode};
use crate::window::WindowFunction;
use crate::{Error, Result};

/// Shared tiling and axis logic for painting and exporting spectrograms.
///
/// Time positions advance in steps of the spectrum width `2B·overlap`; each
/// step yields one spectrum painted as a block of pixels. Rows run top to
/// bottom from the highest to the lowest frequency; with the log axis
/// enabled each display row shows the power of a logarithmically remapped
/// source bin instead of its own (a lookup, not an interpolation — several
/// top rows may repeat the same source bin).
pub struct SpectrogramRenderer {
    bins: usize,
    overlap: f64,
    window: WindowFunction,
    mode: SpectrumMode,
    log_axis: bool,
    codec: ColorCodec,
    lbins: Vec<usize>,
}

impl SpectrogramRenderer {
    /// Creates a renderer.
    ///
    /// # Panics
    ///
    /// Panics if `bins < 2` or `overlap` is not in `(0, 1]`.
    pub fn new(
        bins: usize,
        overlap: f64,
        window: WindowFunction,
        mode: SpectrumMode,
        log_axis: bool,
    ) -> Self {
        assert!(bins >= 2, "bins must be >= 2");
        assert!(
            overlap > 0.0 && overlap <= 1.0,
            "overlap must be in (0, 1]"
        );
        Self {
            bins,
            overlap,
            window,
            mode,
            log_axis,
            codec: ColorCodec::new(bins),
            lbins: log_bins(bins),
        }
    }

    /// Number of frequency bins per spectrum (the image height).
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Fraction of a transform segment advanced between spectra.
    pub fn overlap(&self) -> f64 {
        self.overlap
    }

    /// The window applied before each transform.
    pub fn window(&self) -> WindowFunction {
        self.window
    }

    /// Whether power or phase is displayed.
    pub fn mode(&self) -> SpectrumMode {
        self.mode
    }

    /// Whether the frequency axis is logarithmic.
    pub fn log_axis(&self) -> bool {
        self.log_axis
    }

    /// The color codec derived from the bin count.
    pub fn codec(&self) -> &ColorCodec {
        &self.codec
    }

    /// Samples advanced between successive spectra: `2B · overlap`.
    pub fn spectrum_width(&self) -> f64 {
        (self.bins * 2) as f64 * self.overlap
    }

    /// Whole-sample time step between spectra (at least 1).
    pub fn time_step(&self) -> usize {
        (self.spectrum_width() as usize).max(1)
    }

    /// Width in pixels of one painted block at `zoom` samples per pixel
    /// (at least 1).
    pub fn tile_width(&self, zoom: usize) -> usize {
        ((self.spectrum_width() / zoom as f64) as usize).max(1)
    }

    /// Pixel x position of the block for the spectrum at sample `time`,
    /// centering the window on its time index.
    pub fn tile_x(&self, time: i64, zoom: usize) -> i64 {
        ((time as f64 - self.spectrum_width() / 2.0) / zoom as f64) as i64
    }

    /// The source bin displayed on row `row` (row 0 at the top).
    pub fn source_bin(&self, row: usize) -> usize {
        let bin = if self.log_axis {
            self.lbins[row]
        } else {
            row
        };
        self.bins - bin - 1
    }

    /// The log-axis remap table: `lbins[j] = floor(ln(1+j) · (B−1)/ln B)`.
    pub fn log_row_map(&self) -> &[usize] {
        &self.lbins
    }

    /// Colors for one image column of `spectrum`, top row first.
    pub fn column_colors(&self, spectrum: &Spectrum) -> Vec<[u8; 3]> {
        (0..self.bins)
            .map(|row| self.pixel(spectrum, row))
            .collect()
    }

    fn pixel(&self, spectrum: &Spectrum, row: usize) -> [u8; 3] {
        let value = spectrum.get(self.source_bin(row));
        match self.mode {
            SpectrumMode::Power => self.codec.encode_power(value),
            SpectrumMode::Phase => self.codec.encode_phase(value),
        }
    }

    /// Renders the whole signal to an image, one column per time step.
    ///
    /// `on_column(done, total)` is invoked after each finished column (for
    /// progress reporting). Cancellation is polled per pixel; a cancelled
    /// render returns [`Error::Cancelled`] and yields no image.
    pub fn render(
        &self,
        engine: &mut SpectrumEngine,
        signal: &Signal,
        cancel: &CancelToken,
        mut on_column: impl FnMut(usize, usize),
    ) -> Result<PixelGrid> {
        let step = self.time_step();
        let width = signal.len() / step + 1;
        let mut image = PixelGrid::new(width, self.bins);
        for x in 0..width {
            let spectrum = engine.spectrum_at(
                signal,
                (x * step) as i64,
                self.bins,
                self.window,
                self.mode,
            );
            for row in 0..self.bins {
                if cancel.is_cancelled() {
                    return Err(Error::Cancelled);
                }
                image.set(x, row, self.pixel(&spectrum, row));
            }
            on_column(x + 1, width);
        }
        Ok(image)
    }
}

/// Precomputes the log-axis row remap for `bins` rows.
fn log_bins(bins: usize) -> Vec<usize> {
    let bf = (bins - 1) as f64 / (bins as f64).ln();
    (0..bins).map(|j| ((j as f64).ln_1p() * bf) as usize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use espectro_core::MemoryStore;
    use std::f64::consts::TAU;

    fn sine_signal(n: usize, cycles_per_window: f64, window_len: usize) -> Signal {
        let samples: Vec<f64> = (0..n)
            .map(|i| (TAU * cycles_per_window * i as f64 / window_len as f64).sin())
            .collect();
        Signal::new("sine", 8000, Box::new(MemoryStore::new(samples)))
    }

    #[test]
    fn spectrum_width_and_step() {
        let renderer = SpectrogramRenderer::new(
            512,
            0.5,
            WindowFunction::Hann,
            SpectrumMode::Power,
            false,
        );
        assert_eq!(renderer.spectrum_width(), 512.0);
        assert_eq!(renderer.time_step(), 512);
        assert_eq!(renderer.tile_width(4), 128);
        assert_eq!(renderer.tile_width(1024), 1);
    }

    #[test]
    fn log_row_map_shape() {
        let renderer = SpectrogramRenderer::new(
            256,
            0.5,
            WindowFunction::Hann,
            SpectrumMode::Power,
            true,
        );
        let lbins = renderer.log_row_map();
        assert_eq!(lbins.len(), 256);
        assert_eq!(lbins[0], 0);
        // Monotone non-decreasing, ending at (or one below, from the
        // floating-point floor) the last bin.
        for pair in lbins.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert!(lbins[255] >= 254 && lbins[255] <= 255);
    }

    #[test]
    fn linear_axis_maps_rows_top_down() {
        let renderer = SpectrogramRenderer::new(
            16,
            0.5,
            WindowFunction::Hann,
            SpectrumMode::Power,
            false,
        );
        assert_eq!(renderer.source_bin(0), 15, "top row is the highest bin");
        assert_eq!(renderer.source_bin(15), 0, "bottom row is DC");
    }

    #[test]
    fn render_dimensions() {
        let signal = sine_signal(4096, 4.0, 128);
        let renderer = SpectrogramRenderer::new(
            64,
            0.5,
            WindowFunction::Hann,
            SpectrumMode::Power,
            false,
        );
        let mut engine = SpectrumEngine::new();
        let mut columns_seen = 0;
        let image = renderer
            .render(&mut engine, &signal, &CancelToken::new(), |done, total| {
                columns_seen = done;
                assert_eq!(total, 4096 / 64 + 1);
            })
            .unwrap();
        assert_eq!(image.width(), 4096 / 64 + 1);
        assert_eq!(image.height(), 64);
        assert_eq!(columns_seen, image.width());
    }

    #[test]
    fn sine_renders_brightest_at_its_bin_row() {
        // 4 cycles per 128-sample window concentrates power in bin 4,
        // displayed on row bins - 4 - 1.
        let signal = sine_signal(4096, 4.0, 128);
        let renderer = SpectrogramRenderer::new(
            64,
            0.5,
            WindowFunction::Rectangular,
            SpectrumMode::Power,
            false,
        );
        let mut engine = SpectrumEngine::new();
        let image = renderer
            .render(&mut engine, &signal, &CancelToken::new(), |_, _| {})
            .unwrap();

        // Inspect an interior column (edges see zero-padded windows).
        let x = image.width() / 2;
        let brightness = |row: usize| {
            let [r, g, b] = image.get(x, row);
            u32::from(r) + u32::from(g) + u32::from(b)
        };
        let brightest = (0..64).max_by_key(|&row| brightness(row)).unwrap();
        assert_eq!(brightest, 64 - 4 - 1);
    }

    #[test]
    fn cancelled_render_yields_no_image() {
        let signal = sine_signal(1024, 4.0, 128);
        let renderer = SpectrogramRenderer::new(
            64,
            0.5,
            WindowFunction::Hann,
            SpectrumMode::Power,
            false,
        );
        let token = CancelToken::new();
        token.cancel();
        let mut engine = SpectrumEngine::new();
        let result = renderer.render(&mut engine, &signal, &token, |_, _| {});
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[test]
    fn phase_mode_renders_grayscale() {
        let signal = sine_signal(512, 4.0, 64);
        let renderer = SpectrogramRenderer::new(
            32,
            0.5,
            WindowFunction::Hann,
            SpectrumMode::Phase,
            false,
        );
        let mut engine = SpectrumEngine::new();
        let image = renderer
            .render(&mut engine, &signal, &CancelToken::new(), |_, _| {})
            .unwrap();
        for x in 0..image.width() {
            for y in 0..image.height() {
                let [r, g, b] = image.get(x, y);
                assert!(r == g && g == b, "phase pixels are gray");
            }
        }
    }
}
