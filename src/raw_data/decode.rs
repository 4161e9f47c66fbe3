// src/raw_data/decode.rs
use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::types::{Endianness, SampleWidth};

/// Decode one raw sample entry into its unsigned bit pattern.
///
/// Reads the first `width` bytes of `bytes` in the given byte order.
///
/// # Panics
///
/// Panics if `bytes` is shorter than `width`.
///
/// # Example
///
/// ```
/// use dlog_rs::raw_data::decode;
/// use dlog_rs::types::{Endianness, SampleWidth};
///
/// assert_eq!(decode(&[0x12, 0x34], SampleWidth::W2, Endianness::Little), 0x3412);
/// assert_eq!(decode(&[0x12, 0x34], SampleWidth::W2, Endianness::Big), 0x1234);
/// ```
pub fn decode(bytes: &[u8], width: SampleWidth, endian: Endianness) -> u64 {
    let n = width.bytes();
    match endian {
        Endianness::Little => LittleEndian::read_uint(&bytes[..n], n),
        Endianness::Big => BigEndian::read_uint(&bytes[..n], n),
    }
}

/// Interpret the low `width` bytes of `raw` as a two's complement integer
pub fn sign_extend(raw: u64, width: SampleWidth) -> i64 {
    let shift = 64 - 8 * width.bytes() as u32;
    ((raw << shift) as i64) >> shift
}

/// Decodes fixed-width sample entries of one file into numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleDecoder {
    width: SampleWidth,
    endian: Endianness,
    signed: bool,
}

impl SampleDecoder {
    pub fn new(width: SampleWidth, endian: Endianness, signed: bool) -> Self {
        SampleDecoder { width, endian, signed }
    }

    pub fn width(&self) -> usize {
        self.width.bytes()
    }

    /// Decode `record` as an integer widened to `f64`
    #[inline]
    pub fn value(&self, record: &[u8]) -> f64 {
        let raw = decode(record, self.width, self.endian);
        if self.signed {
            sign_extend(raw, self.width) as f64
        } else {
            raw as f64
        }
    }

    /// Decode `record` and divide by `units` to get a physical value
    #[inline]
    pub fn scaled(&self, record: &[u8], units: f64) -> f64 {
        self.value(record) / units
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WIDTHS: [SampleWidth; 4] = [SampleWidth::W1, SampleWidth::W2, SampleWidth::W4, SampleWidth::W8];

    fn encode(value: u64, width: SampleWidth, endian: Endianness) -> Vec<u8> {
        let n = width.bytes();
        let mut bytes = vec![0u8; n];
        match endian {
            Endianness::Little => LittleEndian::write_uint(&mut bytes, value, n),
            Endianness::Big => BigEndian::write_uint(&mut bytes, value, n),
        }
        bytes
    }

    #[test]
    fn test_decode_widths() {
        assert_eq!(decode(&[0xFE], SampleWidth::W1, Endianness::Big), 0xFE);
        assert_eq!(decode(&[1, 0, 0, 0], SampleWidth::W4, Endianness::Little), 1);
        assert_eq!(decode(&[0, 0, 0, 1], SampleWidth::W4, Endianness::Big), 1);
        assert_eq!(
            decode(&[1, 2, 3, 4, 5, 6, 7, 8], SampleWidth::W8, Endianness::Big),
            0x0102030405060708
        );
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        assert_eq!(decode(&[0x01, 0x02, 0xFF, 0xFF], SampleWidth::W2, Endianness::Little), 0x0201);
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0xFF, SampleWidth::W1), -1);
        assert_eq!(sign_extend(0x7F, SampleWidth::W1), 127);
        assert_eq!(sign_extend(0x8000, SampleWidth::W2), -32768);
        assert_eq!(sign_extend(0xFFFF_FFFE, SampleWidth::W4), -2);
        assert_eq!(sign_extend(u64::MAX, SampleWidth::W8), -1);
    }

    #[test]
    fn test_decoder_scaling() {
        let decoder = SampleDecoder::new(SampleWidth::W2, Endianness::Little, true);
        // -1500 little-endian
        let record = (-1500i16).to_le_bytes();
        assert_eq!(decoder.value(&record), -1500.0);
        assert_eq!(decoder.scaled(&record, 1000.0), -1.5);

        let unsigned = SampleDecoder::new(SampleWidth::W2, Endianness::Little, false);
        assert_eq!(unsigned.value(&record), 64036.0);
    }

    proptest! {
        #[test]
        fn prop_decode_recovers_value(value in any::<u64>(), width_idx in 0usize..4, big in any::<bool>()) {
            let width = WIDTHS[width_idx];
            let endian = if big { Endianness::Big } else { Endianness::Little };
            let mask = if width.bytes() == 8 { u64::MAX } else { (1u64 << (8 * width.bytes())) - 1 };
            let value = value & mask;

            let bytes = encode(value, width, endian);
            prop_assert_eq!(decode(&bytes, width, endian), value);
        }

        #[test]
        fn prop_signed_scaling(value in any::<i16>(), units in 1u64..100_000, big in any::<bool>()) {
            let endian = if big { Endianness::Big } else { Endianness::Little };
            let record = if big { value.to_be_bytes() } else { value.to_le_bytes() };
            let decoder = SampleDecoder::new(SampleWidth::W2, endian, true);

            let expected = value as f64 / units as f64;
            prop_assert!((decoder.scaled(&record, units as f64) - expected).abs() <= expected.abs() * 1e-15);
        }
    }
}
