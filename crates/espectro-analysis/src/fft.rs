//! Real FFT engine with a single length-keyed plan slot.

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

use espectro_core::Signal;

use crate::spectrum::{Spectrum, SpectrumMode};
use crate::window::WindowFunction;

struct Plan {
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    len: usize,
}

/// FFT processor for real-valued signals.
///
/// The engine keeps exactly one plan, keyed by transform length; requesting
/// a different length discards and rebuilds it. The plan is owned by the
/// engine instance rather than shared process-wide, so callers that need to
/// run transforms concurrently simply create an engine each — there is no
/// locking, and the length-change invalidation stays per instance.
///
/// ## Packed half-spectrum layout
///
/// A forward transform of `2B` real samples produces `B` packed
/// real/imaginary pairs in place: pair `k` (for `0 < k < B`) holds
/// `(Re[k], Im[k])`, and pair 0 holds `(Re[0], Re[B])` — the purely real DC
/// and Nyquist coefficients folded together. Power and phase are derived
/// from the pairs as stored, so bin 0 mixes DC and Nyquist energy. The
/// inverse accepts the same layout.
pub struct SpectrumEngine {
    plan: Option<Plan>,
}

impl SpectrumEngine {
    /// Creates an engine with no plan; the first transform builds one.
    pub fn new() -> Self {
        Self { plan: None }
    }

    /// The length the current plan is keyed by, if any.
    pub fn plan_len(&self) -> Option<usize> {
        self.plan.as_ref().map(|plan| plan.len)
    }

    fn plan_for(&mut self, len: usize) -> &Plan {
        if self.plan.as_ref().is_none_or(|plan| plan.len != len) {
            let mut planner = FftPlanner::new();
            self.plan = Some(Plan {
                forward: planner.plan_fft_forward(len),
                inverse: planner.plan_fft_inverse(len),
                len,
            });
        }
        self.plan.as_ref().expect("plan built above")
    }

    /// Forward real FFT in place, leaving the packed half-spectrum in
    /// `data`.
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` is odd or less than 2.
    pub fn forward_packed(&mut self, data: &mut [f64]) {
        let n = data.len();
        assert!(n >= 2 && n % 2 == 0, "transform length must be even");
        let plan = self.plan_for(n);

        let mut buffer: Vec<Complex<f64>> =
            data.iter().map(|&x| Complex::new(x, 0.0)).collect();
        plan.forward.process(&mut buffer);

        data[0] = buffer[0].re;
        data[1] = buffer[n / 2].re;
        for k in 1..n / 2 {
            data[2 * k] = buffer[k].re;
            data[2 * k + 1] = buffer[k].im;
        }
    }

    /// Inverse real FFT from a packed half-spectrum, scaled by `1/n`.
    ///
    /// Returns the `n` real samples whose forward transform is `packed`.
    ///
    /// # Panics
    ///
    /// Panics if `packed.len()` is odd or less than 2.
    pub fn inverse_packed(&mut self, packed: &[f64]) -> Vec<f64> {
        let n = packed.len();
        assert!(n >= 2 && n % 2 == 0, "transform length must be even");
        let plan = self.plan_for(n);

        // Unpack to the full conjugate-symmetric spectrum.
        let mut buffer = vec![Complex::new(0.0, 0.0); n];
        buffer[0] = Complex::new(packed[0], 0.0);
        buffer[n / 2] = Complex::new(packed[1], 0.0);
        for k in 1..n / 2 {
            let bin = Complex::new(packed[2 * k], packed[2 * k + 1]);
            buffer[k] = bin;
            buffer[n - k] = bin.conj();
        }

        plan.inverse.process(&mut buffer);

        let scale = 1.0 / n as f64;
        buffer.iter().map(|c| c.re * scale).collect()
    }

    /// Windows `samples` in place, transforms, and derives one power or
    /// phase value per bin.
    ///
    /// `samples` must hold `2B` values for a `B`-bin spectrum.
    pub fn compute(
        &mut self,
        mut samples: Vec<f64>,
        time: i64,
        window: WindowFunction,
        mode: SpectrumMode,
    ) -> Spectrum {
        window.apply(&mut samples);
        self.forward_packed(&mut samples);
        let bins = samples.len() / 2;
        let values = (0..bins)
            .map(|k| {
                let re = samples[2 * k];
                let im = samples[2 * k + 1];
                match mode {
                    SpectrumMode::Power => re * re + im * im,
                    SpectrumMode::Phase => (im.atan2(re) + std::f64::consts::PI) / 2.0,
                }
            })
            .collect();
        Spectrum::new(time, values)
    }

    /// Computes the `bins`-bin spectrum of `signal` at sample position
    /// `time`, pulling the window through the signal's store.
    pub fn spectrum_at(
        &mut self,
        signal: &Signal,
        time: i64,
        bins: usize,
        window: WindowFunction,
        mode: SpectrumMode,
    ) -> Spectrum {
        self.compute(signal.spectrum_window(time, bins), time, window, mode)
    }
}

impl Default for SpectrumEngine {
    fn default() -> Self {
        Self::new()
    }
}
