//! A named, immutable audio signal.

use crate::store::SampleStore;

/// A decoded audio signal: a name, a sample rate, and an owned sample
/// store. Immutable after construction; dropping the signal releases the
/// store (and, for a disk-backed store, its temp file).
pub struct Signal {
    name: String,
    sample_rate: u32,
    store: Box<dyn SampleStore>,
}

impl Signal {
    /// Creates a signal over an owned store.
    ///
    /// # Panics
    ///
    /// Panics if `sample_rate` is 0.
    pub fn new(name: impl Into<String>, sample_rate: u32, store: Box<dyn SampleStore>) -> Self {
        assert!(sample_rate > 0, "sample rate must be positive");
        Self {
            name: name.into(),
            sample_rate,
            store,
        }
    }

    /// The signal's display name (typically the source file name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the signal holds no samples.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / f64::from(self.sample_rate)
    }

    /// The underlying sample store.
    pub fn store(&self) -> &dyn SampleStore {
        self.store.as_ref()
    }

    /// Clipped, zero-padded read; see [`SampleStore::samples`].
    pub fn samples(&self, start: i64, length: usize) -> Vec<f64> {
        self.store.samples(start, length)
    }

    /// Pulls the `2 * bins` sample window centered on `time` that feeds one
    /// spectrum computation.
    ///
    /// Near the start of the signal the request underflows and the valid
    /// samples are left-aligned in the window (the store's clipping rule),
    /// which is the one place that quirk is observable.
    pub fn spectrum_window(&self, time: i64, bins: usize) -> Vec<f64> {
        self.samples(time - bins as i64, bins * 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn signal(samples: Vec<f64>) -> Signal {
        Signal::new("test", 8000, Box::new(MemoryStore::new(samples)))
    }

    #[test]
    fn accessors() {
        let s = signal(vec![0.0; 16000]);
        assert_eq!(s.name(), "test");
        assert_eq!(s.sample_rate(), 8000);
        assert_eq!(s.len(), 16000);
        assert!((s.duration_secs() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn spectrum_window_interior() {
        let s = signal((0..100).map(f64::from).collect());
        let window = s.spectrum_window(50, 4);
        assert_eq!(window, vec![46.0, 47.0, 48.0, 49.0, 50.0, 51.0, 52.0, 53.0]);
    }

    #[test]
    fn spectrum_window_at_start_left_aligns() {
        let s = signal((0..100).map(f64::from).collect());
        // time=0, bins=4 requests samples(-4, 8): the four valid samples
        // land at the front of the window.
        let window = s.spectrum_window(0, 4);
        assert_eq!(window, vec![0.0, 1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    #[should_panic]
    fn zero_sample_rate_panics() {
        let _ = Signal::new("bad", 0, Box::new(MemoryStore::new(vec![])));
    }
}
