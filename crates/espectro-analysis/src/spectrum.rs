//! Per-window spectrum values.

/// What a spectrum's values represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpectrumMode {
    /// Squared magnitude per bin (`re² + im²`), non-negative.
    #[default]
    Power,
    /// Phase per bin mapped into `[0, π]` (`(atan2(im, re) + π) / 2`).
    Phase,
}

/// One computed spectrum: a time index plus an ordered sequence of per-bin
/// values.
///
/// Transient value object — computed on demand from a sample window and
/// never cached or persisted.
#[derive(Debug, Clone)]
pub struct Spectrum {
    time: i64,
    values: Vec<f64>,
}

impl Spectrum {
    /// Wraps computed bin values at a time index.
    pub fn new(time: i64, values: Vec<f64>) -> Self {
        Self { time, values }
    }

    /// The sample position this spectrum was computed at.
    pub fn time(&self) -> i64 {
        self.time
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the spectrum has no bins.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of bin `i`.
    pub fn get(&self, i: usize) -> f64 {
        self.values[i]
    }

    /// All bin values, lowest frequency first.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
