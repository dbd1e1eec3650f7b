//! Window functions applied before spectral analysis.
//!
//! Each variant is a stateless, pure weighting curve multiplied into a
//! sample buffer in place to reduce spectral leakage. Coefficients `a`,
//! `b`, `c`, `d` are precomputed per call from the buffer length.

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

/// The selectable weighting curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowFunction {
    /// No weighting.
    Rectangular,
    /// Triangular (Bartlett) ramp.
    Triangular,
    /// Half-cycle sine.
    Cosine,
    /// Gaussian with sigma 0.4 of the half-width.
    Gaussian,
    /// Sinc (Lanczos) lobe; index 0 is left unscaled.
    Lanczos,
    /// Parabolic (Welch).
    Welch,
    /// Raised cosine.
    #[default]
    Hann,
    /// Raised cosine on a pedestal.
    Hamming,
    /// Combined triangular and cosine terms.
    BartlettHann,
    /// Three-term cosine series.
    Blackman,
    /// Four-term cosine series, Nuttall coefficients.
    Nuttall,
    /// Four-term cosine series, Blackman-Harris coefficients.
    BlackmanHarris,
    /// Four-term cosine series, Blackman-Nuttall coefficients.
    BlackmanNuttall,
    /// Five-term flat-top series.
    FlatTop,
}

impl WindowFunction {
    /// Every window, in menu order.
    pub const ALL: [WindowFunction; 14] = [
        WindowFunction::Rectangular,
        WindowFunction::Triangular,
        WindowFunction::Cosine,
        WindowFunction::Gaussian,
        WindowFunction::Lanczos,
        WindowFunction::Welch,
        WindowFunction::Hann,
        WindowFunction::Hamming,
        WindowFunction::BartlettHann,
        WindowFunction::Blackman,
        WindowFunction::Nuttall,
        WindowFunction::BlackmanHarris,
        WindowFunction::BlackmanNuttall,
        WindowFunction::FlatTop,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            WindowFunction::Rectangular => "Rectangular (Dirichlet)",
            WindowFunction::Triangular => "Triangular (Bartlett)",
            WindowFunction::Cosine => "Cosine (sine)",
            WindowFunction::Gaussian => "Gaussian",
            WindowFunction::Lanczos => "Lanczos (sinc)",
            WindowFunction::Welch => "Welch",
            WindowFunction::Hann => "Hann",
            WindowFunction::Hamming => "Hamming",
            WindowFunction::BartlettHann => "Bartlett-Hann",
            WindowFunction::Blackman => "Blackman",
            WindowFunction::Nuttall => "Nuttall",
            WindowFunction::BlackmanHarris => "Blackman-Harris",
            WindowFunction::BlackmanNuttall => "Blackman-Nuttall",
            WindowFunction::FlatTop => "Flat top",
        }
    }

    /// Key used on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            WindowFunction::Rectangular => "rectangular",
            WindowFunction::Triangular => "triangular",
            WindowFunction::Cosine => "cosine",
            WindowFunction::Gaussian => "gaussian",
            WindowFunction::Lanczos => "lanczos",
            WindowFunction::Welch => "welch",
            WindowFunction::Hann => "hann",
            WindowFunction::Hamming => "hamming",
            WindowFunction::BartlettHann => "bartlett-hann",
            WindowFunction::Blackman => "blackman",
            WindowFunction::Nuttall => "nuttall",
            WindowFunction::BlackmanHarris => "blackman-harris",
            WindowFunction::BlackmanNuttall => "blackman-nuttall",
            WindowFunction::FlatTop => "flat-top",
        }
    }

    /// Multiplies the curve into `data` in place.
    pub fn apply(&self, data: &mut [f64]) {
        let n = data.len();
        if n < 2 {
            return;
        }
        match self {
            WindowFunction::Rectangular => {}
            WindowFunction::Triangular => {
                let a = (n - 1) as f64 / 2.0;
                let b = 2.0 / (n - 1) as f64;
                for (i, sample) in data.iter_mut().enumerate() {
                    *sample *= b * (a - (i as f64 - a).abs());
                }
            }
            WindowFunction::Cosine => {
                let a = PI / (n - 1) as f64;
                for (i, sample) in data.iter_mut().enumerate() {
                    *sample *= (a * i as f64).sin();
                }
            }
            WindowFunction::Gaussian => {
                let a = (n - 1) as f64 / 2.0;
                let b = a * 0.4;
                for (i, sample) in data.iter_mut().enumerate() {
                    let x = (i as f64 - a) / b;
                    *sample *= (-0.5 * x * x).exp();
                }
            }
            WindowFunction::Lanczos => {
                // Index 0 keeps weight 1: sinc(0) = 1.
                let a = TAU / (n - 1) as f64;
                for (i, sample) in data.iter_mut().enumerate().skip(1) {
                    let b = i as f64 * a;
                    *sample *= b.sin() / b;
                }
            }
            WindowFunction::Welch => {
                let a = n as f64 / 2.0;
                for (i, sample) in data.iter_mut().enumerate() {
                    let x = (i as f64 - a) / a;
                    *sample *= 1.0 - x * x;
                }
            }
            WindowFunction::Hann => {
                let a = TAU / (n - 1) as f64;
                for (i, sample) in data.iter_mut().enumerate() {
                    *sample *= 0.5 - 0.5 * (i as f64 * a).cos();
                }
            }
            WindowFunction::Hamming => {
                let a = TAU / (n - 1) as f64;
                for (i, sample) in data.iter_mut().enumerate() {
                    *sample *= 0.54 - 0.46 * (i as f64 * a).cos();
                }
            }
            WindowFunction::BartlettHann => {
                let a = (n - 1) as f64;
                let b = TAU / (n - 1) as f64;
                for (i, sample) in data.iter_mut().enumerate() {
                    *sample *= 0.62
                        - 0.48 * (i as f64 / a - 0.5).abs()
                        - 0.38 * (i as f64 * b).cos();
                }
            }
            WindowFunction::Blackman => {
                let a = TAU / (n - 1) as f64;
                let b = 2.0 * a;
                for (i, sample) in data.iter_mut().enumerate() {
                    *sample *= 0.42 - 0.5 * (i as f64 * a).cos() + 0.08 * (i as f64 * b).cos();
                }
            }
            WindowFunction::Nuttall => {
                cosine_series(data, &[0.355768, -0.487396, 0.144232, -0.012604]);
            }
            WindowFunction::BlackmanHarris => {
                cosine_series(data, &[0.35875, -0.48829, 0.14128, -0.01168]);
            }
            WindowFunction::BlackmanNuttall => {
                cosine_series(data, &[0.3635819, -0.4891775, 0.1365995, -0.0106411]);
            }
            WindowFunction::FlatTop => {
                cosine_series(
                    data,
                    &[
                        0.21557895,
                        -0.41663158,
                        0.277263158,
                        -0.083578947,
                        0.006947368,
                    ],
                );
            }
        }
    }

    /// The curve sampled over `size` points (all-ones input).
    pub fn coefficients(&self, size: usize) -> Vec<f64> {
        let mut coeffs = vec![1.0; size];
        self.apply(&mut coeffs);
        coeffs
    }
}

/// Applies a cosine-series window with the given term coefficients:
/// `w(i) = c0 + c1·cos(iω) + c2·cos(2iω) + …`, `ω = 2π/(n−1)`.
fn cosine_series(data: &mut [f64], terms: &[f64]) {
    let a = TAU / (data.len() - 1) as f64;
    for (i, sample) in data.iter_mut().enumerate() {
        let mut w = terms[0];
        for (m, &term) in terms.iter().enumerate().skip(1) {
            w += term * (i as f64 * m as f64 * a).cos();
        }
        *sample *= w;
    }
}

impl fmt::Display for WindowFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WindowFunction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rectangular" | "rect" | "none" => Ok(WindowFunction::Rectangular),
            "triangular" | "bartlett" => Ok(WindowFunction::Triangular),
            "cosine" | "sine" => Ok(WindowFunction::Cosine),
            "gaussian" => Ok(WindowFunction::Gaussian),
            "lanczos" | "sinc" => Ok(WindowFunction::Lanczos),
            "welch" => Ok(WindowFunction::Welch),
            "hann" => Ok(WindowFunction::Hann),
            "hamming" => Ok(WindowFunction::Hamming),
            "bartlett-hann" => Ok(WindowFunction::BartlettHann),
            "blackman" => Ok(WindowFunction::Blackman),
            "nuttall" => Ok(WindowFunction::Nuttall),
            "blackman-harris" => Ok(WindowFunction::BlackmanHarris),
            "blackman-nuttall" => Ok(WindowFunction::BlackmanNuttall),
            "flat-top" | "flattop" => Ok(WindowFunction::FlatTop),
            other => Err(format!("unknown window function '{other}'")),
        }
    }
}
