//! Property-based tests for the storage layer.
//!
//! Uses proptest to check the clipping invariant and the equivalence of
//! the in-memory and disk-backed stores over randomized ranges.

use espectro_core::{BufferedFileWriter, DiskStore, MemoryStore, SampleStore};
use proptest::prelude::*;

fn build_disk_store(samples: &[f64]) -> DiskStore {
    let mut writer = BufferedFileWriter::new(tempfile::tempfile().unwrap());
    for &sample in samples {
        writer.write_buffered(&sample.to_be_bytes()).unwrap();
    }
    writer.flush().unwrap();
    DiskStore::new(writer.into_inner(), samples.len())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The result of `samples(start, length)` always has exactly `length`
    /// entries, for any store contents and any range.
    #[test]
    fn result_length_always_matches_request(
        samples in prop::collection::vec(-1.0f64..=1.0, 0..256),
        start in -512i64..512,
        length in 0usize..256,
    ) {
        let store = MemoryStore::new(samples);
        prop_assert_eq!(store.samples(start, length).len(), length);
    }

    /// In-range samples are copied to the front of the output and all
    /// other positions are zero.
    #[test]
    fn clipped_reads_left_align_and_zero_pad(
        samples in prop::collection::vec(0.001f64..=1.0, 1..128),
        start in -256i64..256,
        length in 1usize..128,
    ) {
        let n = samples.len() as i64;
        let store = MemoryStore::new(samples.clone());
        let got = store.samples(start, length);

        let copy_start = start.max(0);
        let copy_end = (start + length as i64).min(n).max(copy_start);
        let copied = (copy_end - copy_start) as usize;

        for (j, &value) in got.iter().enumerate() {
            if j < copied {
                prop_assert_eq!(value, samples[copy_start as usize + j]);
            } else {
                prop_assert_eq!(value, 0.0);
            }
        }
    }

    /// Disk-backed and in-memory stores built from the same samples agree
    /// on every read.
    #[test]
    fn disk_store_matches_memory_store(
        samples in prop::collection::vec(-1.0f64..=1.0, 1..512),
        start in -128i64..2200,
        length in 0usize..512,
    ) {
        let memory = MemoryStore::new(samples.clone());
        let disk = build_disk_store(&samples);
        prop_assert_eq!(disk.samples(start, length), memory.samples(start, length));
    }
}
