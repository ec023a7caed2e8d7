//! Mapping of spectrum peaks to a packed color, plus the change gate
//! that decides when a color is worth transmitting.

use crate::audio::frame::SAMPLE_RATE;
use crate::audio::spectrum::SpectrumPeaks;

/// Packed 32-bit color. Byte order, low to high: blue, green, red, alpha.
/// Two colors are equal iff their packed values are equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color(0);

    /// Packs three channels with alpha left at 0.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Color {
        Color(u32::from(b) | u32::from(g) << 8 | u32::from(r) << 16)
    }

    pub fn packed(self) -> u32 {
        self.0
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }
}

/// Channel clamp, deliberately asymmetric: anything below `min` maps to
/// 0 and anything above `max` maps to 255, regardless of the bounds
/// themselves. The channel finalization relies on this exact shape.
fn clamp(v: i64, min: i64, max: i64) -> i64 {
    if v < min {
        0
    } else if v > max {
        255
    } else {
        v
    }
}

fn channel(x: f64) -> u8 {
    clamp((x * 255.0).floor() as i64, 0, 255) as u8
}

/// Six-sector HSV to RGB conversion. `h` is in degrees and may exceed
/// [0, 360); `s` and `v` are nominally in [0, 1] but non-finite values
/// flow through the arithmetic and come out clamped to a valid color.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Color {
    let (r, g, b) = if s == 0.0 {
        (v, v, v)
    } else {
        let h = h / 60.0;
        let i = h.floor();
        let f = h - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match (i as i64).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        }
    };
    Color::from_rgb(channel(r), channel(g), channel(b))
}

/// Maps the cycle's peak scalars to a color. The "frequency" here is the
/// peak magnitude scaled by rate/bins, not the peak bin's frequency in
/// Hz; the headset mapping was tuned against that value, so it stays.
pub fn map_peaks(peaks: &SpectrumPeaks) -> Color {
    let freq = peaks.magnitude_max * f64::from(SAMPLE_RATE) / peaks.bins as f64;
    let hue = (freq * 360.0 / (f64::from(SAMPLE_RATE) / 2.0)) * 1.2;
    let brightness = peaks.db_max.ln() / 90.0f64.ln();
    hsv_to_rgb(hue, 1.0, brightness)
}

/// Remembers the last color handed to the transmitter and suppresses
/// redundant sends.
pub struct ColorGate {
    previous: Color,
}

impl ColorGate {
    /// Starts at black, so a silent first cycle does not transmit.
    pub fn new() -> Self {
        Self {
            previous: Color::BLACK,
        }
    }

    /// Returns `true` when `color` differs from the remembered one. The
    /// remembered color updates either way, before any transmission, so
    /// a failed send is not retried until the color changes again.
    pub fn update(&mut self, color: Color) -> bool {
        let changed = color != self.previous;
        self.previous = color;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::frame::{BLOCK_BYTES, BLOCK_SIZE};
    use crate::audio::spectrum::SpectrumAnalyzer;

    #[test]
    fn packed_byte_order() {
        let c = Color::from_rgb(0x11, 0x22, 0x33);
        assert_eq!(c.packed(), 0x0011_2233);
        assert_eq!((c.red(), c.green(), c.blue()), (0x11, 0x22, 0x33));
    }

    #[test]
    fn clamp_is_asymmetric() {
        assert_eq!(clamp(-5, 0, 255), 0);
        assert_eq!(clamp(260, 0, 255), 255);
        assert_eq!(clamp(100, 0, 255), 100);
        // below min always floors to 0, never to min
        assert_eq!(clamp(5, 10, 255), 0);
    }

    #[test]
    fn zero_saturation_is_grey() {
        for hue in [0.0, 90.0, 271.5] {
            let c = hsv_to_rgb(hue, 0.0, 0.5);
            let grey = channel(0.5);
            assert_eq!((c.red(), c.green(), c.blue()), (grey, grey, grey));
        }
    }

    #[test]
    fn primary_hues() {
        let red = hsv_to_rgb(0.0, 1.0, 1.0);
        assert_eq!((red.red(), red.green(), red.blue()), (255, 0, 0));

        let green = hsv_to_rgb(120.0, 1.0, 1.0);
        assert!(green.red() <= 1);
        assert_eq!(green.green(), 255);
        assert!(green.blue() <= 1);
    }

    #[test]
    fn non_finite_brightness_is_black() {
        let c = hsv_to_rgb(45.0, 1.0, f64::NEG_INFINITY);
        assert_eq!(c, Color::BLACK);
    }

    #[test]
    fn gate_sends_once_per_change() {
        let mut gate = ColorGate::new();
        let a = Color::from_rgb(1, 2, 3);
        let b = Color::from_rgb(4, 5, 6);

        assert!(gate.update(a));
        assert!(!gate.update(a));
        assert!(!gate.update(a));
        assert!(gate.update(b));
        assert!(gate.update(a));
    }

    #[test]
    fn gate_stays_quiet_at_rest() {
        let mut gate = ColorGate::new();
        assert!(!gate.update(Color::BLACK));
    }

    #[test]
    fn silent_block_maps_to_black_and_is_gated() {
        let mut analyzer = SpectrumAnalyzer::new();
        let peaks = analyzer.analyze(&[0u8; BLOCK_BYTES]).unwrap();
        assert_eq!(peaks.magnitude_max, 0.0);
        assert_eq!(peaks.db_max, 0.0);
        assert_eq!(peaks.bins, BLOCK_SIZE / 2 + 1);

        let color = map_peaks(&peaks);
        assert_eq!(color.packed(), 0x0000_0000);

        let mut gate = ColorGate::new();
        assert!(!gate.update(color));
    }
}
