//! Integration tests for the espectro-core storage layer.
//!
//! Builds disk-backed stores the way the loader does (buffered big-endian
//! writes into a temp file) and checks that they are indistinguishable
//! from in-memory stores through the `SampleStore` interface.

use espectro_core::{
    BLOCK_SIZE, BufferedFileWriter, DiskStore, MemoryStore, SampleStore, Signal,
};

/// Writes `samples` as big-endian doubles through the buffered writer and
/// reopens them as a disk store, mirroring the load path.
fn build_disk_store(samples: &[f64]) -> DiskStore {
    let file = tempfile::tempfile().unwrap();
    let mut writer = BufferedFileWriter::new(file);
    for &sample in samples {
        writer.write_buffered(&sample.to_be_bytes()).unwrap();
    }
    writer.flush().unwrap();
    DiskStore::new(writer.into_inner(), samples.len())
}

fn ramp(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i as f64).sin() * 0.5).collect()
}

#[test]
fn disk_store_roundtrips_exactly() {
    let samples = ramp(BLOCK_SIZE * 3 + 17);
    let disk = build_disk_store(&samples);
    assert_eq!(disk.len(), samples.len());
    assert_eq!(disk.samples(0, samples.len()), samples);
}

#[test]
fn disk_and_memory_stores_agree_everywhere() {
    let samples = ramp(BLOCK_SIZE * 2 + 100);
    let n = samples.len() as i64;
    let memory = MemoryStore::new(samples.clone());
    let disk = build_disk_store(&samples);

    let cases: &[(i64, usize)] = &[
        (0, 1),
        (0, samples.len()),
        (-5, 32),
        (n - 3, 10),
        (BLOCK_SIZE as i64 - 1, 3),
        (BLOCK_SIZE as i64, BLOCK_SIZE),
        (-100, 50),
        (n + 100, 8),
    ];
    for &(start, length) in cases {
        assert_eq!(
            disk.samples(start, length),
            memory.samples(start, length),
            "start={start} length={length}"
        );
    }
}

#[test]
fn cache_stays_bounded_over_many_blocks() {
    // Touch far more blocks than the cache holds; the store must keep
    // serving correct data while the cache stays within its bound.
    let samples = ramp(BLOCK_SIZE * 40);
    let disk = build_disk_store(&samples);
    for block in 0..40 {
        let start = block * BLOCK_SIZE;
        let got = disk.samples(start as i64, 4);
        assert_eq!(got, &samples[start..start + 4]);
    }
    assert!(disk.cached_blocks() <= 24);
}

#[test]
fn signal_over_disk_store() {
    let samples = ramp(BLOCK_SIZE);
    let store = build_disk_store(&samples);
    let signal = Signal::new("ramp", 44100, Box::new(store));
    assert_eq!(signal.len(), BLOCK_SIZE);

    let window = signal.spectrum_window(0, 8);
    assert_eq!(window.len(), 16);
    assert_eq!(&window[..8], &samples[..8], "left-aligned valid samples");
    assert_eq!(&window[8..], &[0.0; 8], "zero tail");
}
