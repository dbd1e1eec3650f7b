//! WAV decoder boundary.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::{Error, MAX_SAMPLES, Result};

/// Scale dividing a signed 16-bit sample down to `[-1, 1)`.
const MAX_SAMPLE: f64 = 32768.0;

/// Decoder for 16-bit signed PCM WAV files.
///
/// The sample count and rate are known up front; samples are produced
/// lazily through [`samples`](Self::samples), with multi-channel sources
/// averaged down to mono. Anything that is not 16-bit signed integer PCM
/// is rejected at open time.
pub struct WavDecoder {
    reader: WavReader<BufReader<File>>,
    sample_rate: u32,
    channels: usize,
    frames: u64,
}

impl WavDecoder {
    /// Opens `path` and validates its format.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let reader = WavReader::open(path)?;
        let spec = reader.spec();

        match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Int, 16) => {}
            (SampleFormat::Int, bits) => {
                return Err(Error::UnsupportedEncoding(format!("{bits}-bit PCM")));
            }
            (SampleFormat::Float, bits) => {
                return Err(Error::UnsupportedEncoding(format!("{bits}-bit float")));
            }
        }

        let channels = usize::from(spec.channels);
        let frames = u64::from(reader.len()) / spec.channels as u64;
        if frames == 0 {
            return Err(Error::Empty);
        }
        if frames > MAX_SAMPLES {
            return Err(Error::TooLong(frames));
        }

        Ok(Self {
            sample_rate: spec.sample_rate,
            channels,
            frames,
            reader,
        })
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channels in the source (averaged away during decode).
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of mono samples the decoder will produce.
    pub fn len(&self) -> usize {
        self.frames as usize
    }

    /// Returns `true` if the decoder would produce no samples (never, by
    /// construction — empty sources fail to open).
    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    /// Consumes the decoder, yielding normalized mono samples.
    pub fn samples(self) -> SampleIter {
        SampleIter {
            channels: self.channels,
            remaining: self.frames as usize,
            samples: self.reader.into_samples(),
        }
    }
}

/// Lazily decoded mono samples in `[-1, 1]`.
///
/// Each item averages one frame's channels; an unreadable frame yields an
/// error and ends iteration.
pub struct SampleIter {
    samples: hound::WavIntoSamples<BufReader<File>, i16>,
    channels: usize,
    remaining: usize,
}

impl SampleIter {
    /// Samples not yet produced.
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl Iterator for SampleIter {
    type Item = Result<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let mut sum = 0.0;
        for _ in 0..self.channels {
            match self.samples.next() {
                Some(Ok(value)) => sum += f64::from(value) / MAX_SAMPLE,
                Some(Err(err)) => {
                    self.remaining = 0;
                    return Some(Err(err.into()));
                }
                None => {
                    self.remaining = 0;
                    return Some(Err(Error::Io(std::io::Error::new(
                        std::io::ErrorKind::UnexpectedEof,
                        "sample data ended early",
                    ))));
                }
            }
        }
        Some(Ok(sum / self.channels as f64))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};
    use std::path::PathBuf;

    fn write_test_wav(spec: WavSpec, samples: &[i16]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.wav");
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for &sample in samples {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
        (dir, path)
    }

    fn int_spec(channels: u16, bits: u16) -> WavSpec {
        WavSpec {
            channels,
            sample_rate: 44100,
            bits_per_sample: bits,
            sample_format: SampleFormat::Int,
        }
    }

    #[test]
    fn decodes_mono_16_bit() {
        let (_dir, path) = write_test_wav(int_spec(1, 16), &[0, 16384, -16384, 32767]);
        let decoder = WavDecoder::open(&path).unwrap();
        assert_eq!(decoder.sample_rate(), 44100);
        assert_eq!(decoder.len(), 4);

        let samples: Vec<f64> = decoder.samples().map(|s| s.unwrap()).collect();
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0], 0.0);
        assert!((samples[1] - 0.5).abs() < 1e-12);
        assert!((samples[2] + 0.5).abs() < 1e-12);
        assert!((samples[3] - 32767.0 / 32768.0).abs() < 1e-12);
    }

    #[test]
    fn averages_stereo_to_mono() {
        let (_dir, path) = write_test_wav(int_spec(2, 16), &[16384, -16384, 8192, 8192]);
        let decoder = WavDecoder::open(&path).unwrap();
        assert_eq!(decoder.len(), 2, "two frames");
        assert_eq!(decoder.channels(), 2);

        let samples: Vec<f64> = decoder.samples().map(|s| s.unwrap()).collect();
        assert_eq!(samples[0], 0.0, "opposite channels cancel");
        assert!((samples[1] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn rejects_float_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("float.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        writer.write_sample(0.5f32).unwrap();
        writer.finalize().unwrap();

        assert!(matches!(
            WavDecoder::open(&path),
            Err(Error::UnsupportedEncoding(_))
        ));
    }

    #[test]
    fn rejects_non_16_bit_pcm() {
        let (_dir, path) = write_test_wav(int_spec(1, 8), &[]);
        // hound encodes 8-bit as Int; only the depth is wrong.
        let result = WavDecoder::open(&path);
        assert!(matches!(
            result,
            Err(Error::UnsupportedEncoding(_)) | Err(Error::Wav(_))
        ));
    }

    #[test]
    fn rejects_empty_wav() {
        let (_dir, path) = write_test_wav(int_spec(1, 16), &[]);
        assert!(matches!(WavDecoder::open(&path), Err(Error::Empty)));
    }
}
