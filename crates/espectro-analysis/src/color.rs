//! Bidirectional mapping between scalar power (or phase) values and 8-bit
//! colors.

const MAX_COLOR: i64 = 0xFF;

/// Four-segment logarithmic gradient between power values and RGB colors.
///
/// The gradient runs black → blue → green → red → white over
/// `k = ln(1 + power)` in `[0, 4·step]`, where `step` is sized so that the
/// loudest representable power for a `B`-bin spectrum (`B²/4`, a full-scale
/// sine) lands exactly at white. Decoding classifies a color by which
/// channels are lit and inverts the ramp, so an encode/decode round trip is
/// exact up to 8-bit quantization.
///
/// Phase values map to plain grayscale.
#[derive(Debug, Clone)]
pub struct ColorCodec {
    bins: usize,
    max_power: f64,
    step: f64,
    cf: f64,
}

impl ColorCodec {
    /// Builds the codec for spectra with `bins` bins.
    ///
    /// # Panics
    ///
    /// Panics if `bins` is 0.
    pub fn new(bins: usize) -> Self {
        assert!(bins > 0, "bins must be > 0");
        let max_power = (bins * bins) as f64 / 4.0;
        let step = max_power.ln_1p() / 4.0;
        let cf = MAX_COLOR as f64 / step;
        Self {
            bins,
            max_power,
            step,
            cf,
        }
    }

    /// Number of bins this codec was derived from.
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// The power that maps to full white.
    pub fn max_power(&self) -> f64 {
        self.max_power
    }

    /// Width of one gradient segment in `ln(1 + power)` units.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Encodes a power value as an RGB color.
    pub fn encode_power(&self, power: f64) -> [u8; 3] {
        let mut k = power.ln_1p();
        let mut r = 0;
        let mut g = 0;
        let mut b = 0;
        if k < self.step {
            // black to blue
            b = (k * self.cf) as i64;
        } else if k < self.step * 2.0 {
            // blue to green
            k -= self.step;
            g = (k * self.cf) as i64;
            b = MAX_COLOR - g;
        } else if k < self.step * 3.0 {
            // green to red
            k -= self.step * 2.0;
            r = (k * self.cf) as i64;
            g = MAX_COLOR - r;
        } else {
            // red to white
            k -= self.step * 3.0;
            r = MAX_COLOR;
            g = (k * self.cf) as i64;
            b = g;
        }
        [channel(r), channel(g), channel(b)]
    }

    /// Recovers a power value from an RGB color.
    ///
    /// The segment is identified by which channels are nonzero; the lit
    /// ramp channel then gives the position within the segment.
    pub fn decode_power(&self, [r, g, b]: [u8; 3]) -> f64 {
        let k = if r > 0 && g > 0 && b > 0 {
            f64::from(g) / self.cf + self.step * 3.0
        } else if r > 0 {
            f64::from(r) / self.cf + self.step * 2.0
        } else if g > 0 {
            f64::from(g) / self.cf + self.step
        } else {
            f64::from(b) / self.cf
        };
        k.exp_m1()
    }

    /// Encodes a phase value in `[0, π]` as a grayscale color.
    pub fn encode_phase(&self, phase: f64) -> [u8; 3] {
        let c = (phase * MAX_COLOR as f64).round().clamp(0.0, MAX_COLOR as f64) as u8;
        [c, c, c]
    }
}

fn channel(value: i64) -> u8 {
    value.clamp(0, MAX_COLOR) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_power_is_black_and_back() {
        let codec = ColorCodec::new(512);
        assert_eq!(codec.encode_power(0.0), [0, 0, 0]);
        assert_eq!(codec.decode_power([0, 0, 0]), 0.0);
    }

    #[test]
    fn max_power_is_white() {
        let codec = ColorCodec::new(512);
        let [r, g, b] = codec.encode_power(codec.max_power());
        assert_eq!(r, 255);
        assert!(g >= 254, "g={g}");
        assert_eq!(g, b);
    }

    #[test]
    fn beyond_max_power_clamps_to_white() {
        let codec = ColorCodec::new(512);
        assert_eq!(codec.encode_power(codec.max_power() * 100.0), [255, 255, 255]);
    }

    #[test]
    fn segment_colors_progress_black_blue_green_red_white() {
        let codec = ColorCodec::new(512);
        let at = |segments: f64| codec.encode_power((segments * codec.step()).exp_m1());

        let [r, g, b] = at(0.5);
        assert!(r == 0 && g == 0 && b > 0, "segment 0 is blue-ish");
        let [r, g, b] = at(1.5);
        assert!(r == 0 && g > 0 && b > 0, "segment 1 blends blue and green");
        let [r, g, b] = at(2.5);
        assert!(r > 0 && g > 0 && b == 0, "segment 2 blends green and red");
        let [r, g, b] = at(3.5);
        assert!(r == 255 && g > 0 && g == b, "segment 3 ramps toward white");
    }

    #[test]
    fn roundtrip_within_quantization_error() {
        let codec = ColorCodec::new(512);
        // One channel count covers step/255 in k; the power error that
        // corresponds to is (power + 1) * (exp(step/255) - 1).
        let quantum = (codec.step() / 255.0).exp_m1();
        let mut power = 0.0;
        while power <= codec.max_power() {
            let decoded = codec.decode_power(codec.encode_power(power));
            let tolerance = (power + 1.0) * quantum * 1.01 + 1e-9;
            assert!(
                (decoded - power).abs() <= tolerance,
                "power={power} decoded={decoded} tolerance={tolerance}"
            );
            power = power * 1.5 + 0.01;
        }
    }

    #[test]
    fn phase_encodes_to_grayscale() {
        let codec = ColorCodec::new(512);
        assert_eq!(codec.encode_phase(0.0), [0, 0, 0]);
        let [r, g, b] = codec.encode_phase(0.5);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(r, 128);
        assert_eq!(codec.encode_phase(std::f64::consts::PI), [255, 255, 255]);
        // Out-of-range phases clamp instead of wrapping.
        assert_eq!(codec.encode_phase(-1.0), [0, 0, 0]);
        assert_eq!(codec.encode_phase(10.0), [255, 255, 255]);
    }
}
