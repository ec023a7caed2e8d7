//! Decoding of raw capture blocks into samples.

/// Sample frames per capture block.
pub const BLOCK_SIZE: usize = 2048;
/// Bytes per capture block (16-bit mono).
pub const BLOCK_BYTES: usize = BLOCK_SIZE * 2;
/// Capture sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44100;

/// Returns the `i`-th sample of a block: two consecutive little-endian
/// bytes combined into a signed 16-bit value. The caller guarantees the
/// block holds at least `2 * i + 2` bytes.
pub fn sample_at(block: &[u8], i: usize) -> i16 {
    i16::from_le_bytes([block[2 * i], block[2 * i + 1]])
}

/// Normalizes a raw sample to `2 * sample / 65536`, roughly [-1, 1).
pub fn normalize(sample: i16) -> f64 {
    2.0 * f64::from(sample) / 65536.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_little_endian_extremes() {
        assert_eq!(sample_at(&[0xFF, 0x7F], 0), 32767);
        assert_eq!(sample_at(&[0x00, 0x80], 0), -32768);
        assert_eq!(sample_at(&[0x00, 0x00], 0), 0);
    }

    #[test]
    fn decodes_at_index() {
        let block = [0x00, 0x00, 0x01, 0x00, 0xFE, 0xFF];
        assert_eq!(sample_at(&block, 1), 1);
        assert_eq!(sample_at(&block, 2), -2);
    }

    #[test]
    fn normalization_scale() {
        assert_eq!(normalize(0), 0.0);
        assert_eq!(normalize(16384), 0.5);
        assert_eq!(normalize(-16384), -0.5);
        assert!(normalize(32767) < 1.0);
        assert_eq!(normalize(-32768), -1.0);
    }
}
