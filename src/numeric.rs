// src/numeric.rs
//! Fixed-precision decimal rendering of scaled samples.
//!
//! [`format_number`] writes straight into caller-owned memory and never
//! allocates, which matters when a file holds hundreds of millions of samples.
//! The fraction is rounded half away from zero to exactly `precision` digits;
//! there is no exponent form, so magnitudes beyond `u64::MAX` are out of range.

use crate::error::{DlogError, Result};

/// Largest supported number of fraction digits
pub const MAX_PRECISION: u8 = 15;

/// Upper bound on the bytes [`format_number`] writes for any finite value:
/// sign, 20 integer digits, decimal point and [`MAX_PRECISION`] fraction digits.
pub const MAX_FIELD_WIDTH: usize = 1 + 20 + 1 + MAX_PRECISION as usize;

const POW10: [u64; MAX_PRECISION as usize + 1] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
];

/// Render `value` with `precision` fraction digits into the front of `buf`.
///
/// Returns the number of bytes written. Precision above [`MAX_PRECISION`] is
/// clamped. A value that rounds to zero is printed without a sign, and
/// non-finite values are written as `nan`, `inf` or `-inf`.
///
/// Fails with [`DlogError::ValueOutOfRange`] if the rounded magnitude does not
/// fit in a `u64`, and with [`DlogError::BufferOverflow`] if `buf` cannot hold
/// the whole rendering. Nothing is written in either case.
///
/// # Example
///
/// ```
/// use dlog_rs::numeric::format_number;
///
/// let mut buf = [0u8; 32];
/// let n = format_number(-1.5, &mut buf, 2).unwrap();
/// assert_eq!(&buf[..n], b"-1.50");
/// ```
pub fn format_number(value: f64, buf: &mut [u8], precision: u8) -> Result<usize> {
    if !value.is_finite() {
        return write_non_finite(value, buf);
    }

    let precision = precision.min(MAX_PRECISION) as usize;
    let scale = POW10[precision];

    let abs = value.abs();
    let mut whole = abs.trunc();
    let mut fraction = ((abs - whole) * scale as f64).round() as u64;
    if fraction >= scale {
        fraction -= scale;
        whole += 1.0;
    }
    // u64::MAX as f64 rounds up to 2^64
    if whole >= u64::MAX as f64 {
        return Err(DlogError::ValueOutOfRange(value));
    }
    let whole = whole as u64;

    let negative = value.is_sign_negative() && (whole != 0 || fraction != 0);
    let whole_digits = count_digits(whole);
    let len = negative as usize + whole_digits + if precision > 0 { 1 + precision } else { 0 };

    if buf.len() < len {
        return Err(DlogError::BufferOverflow { attempted: len, capacity: buf.len() });
    }

    let mut pos = 0;
    if negative {
        buf[0] = b'-';
        pos = 1;
    }

    write_digits(whole, &mut buf[pos..pos + whole_digits]);
    pos += whole_digits;

    if precision > 0 {
        buf[pos] = b'.';
        pos += 1;
        write_digits(fraction, &mut buf[pos..pos + precision]);
        pos += precision;
    }

    Ok(pos)
}

fn write_non_finite(value: f64, buf: &mut [u8]) -> Result<usize> {
    let text: &[u8] = if value.is_nan() {
        b"nan"
    } else if value.is_sign_negative() {
        b"-inf"
    } else {
        b"inf"
    };

    if buf.len() < text.len() {
        return Err(DlogError::BufferOverflow { attempted: text.len(), capacity: buf.len() });
    }
    buf[..text.len()].copy_from_slice(text);
    Ok(text.len())
}

fn count_digits(mut n: u64) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

// Fills `out` right to left, zero padding on the left.
fn write_digits(mut n: u64, out: &mut [u8]) {
    for slot in out.iter_mut().rev() {
        *slot = b'0' + (n % 10) as u8;
        n /= 10;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn render(value: f64, precision: u8) -> String {
        let mut buf = [0u8; MAX_FIELD_WIDTH];
        let n = format_number(value, &mut buf, precision).unwrap();
        String::from_utf8(buf[..n].to_vec()).unwrap()
    }

    #[test]
    fn test_reference_values() {
        assert_eq!(render(0.0, 3), "0.000");
        assert_eq!(render(-1.5, 2), "-1.50");
        assert_eq!(render(3.14159, 2), "3.14");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(render(0.125, 2), "0.13");
        assert_eq!(render(-0.125, 2), "-0.13");
        assert_eq!(render(2.5, 0), "3");
        assert_eq!(render(-2.5, 0), "-3");
    }

    #[test]
    fn test_carry_into_integer_part() {
        assert_eq!(render(9.999, 2), "10.00");
        assert_eq!(render(-99.9996, 3), "-100.000");
        assert_eq!(render(0.9999999, 6), "1.000000");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(render(-0.0, 3), "0.000");
        assert_eq!(render(-0.0004, 3), "0.000");
        assert_eq!(render(-0.4, 0), "0");
    }

    #[test]
    fn test_zero_precision() {
        assert_eq!(render(0.0, 0), "0");
        assert_eq!(render(42.4, 0), "42");
        assert_eq!(render(-7.0, 0), "-7");
    }

    #[test]
    fn test_precision_is_clamped() {
        assert_eq!(render(1.0, 40), "1.000000000000000");
    }

    #[test]
    fn test_large_magnitudes() {
        assert_eq!(render(9_223_372_036_854_775_807.0, 0), "9223372036854775808");
        assert_eq!(render(-32768.0, 3), "-32768.000");
        assert_eq!(render(1e15, 1), "1000000000000000.0");
    }

    #[test]
    fn test_beyond_u64_is_out_of_range() {
        let mut buf = [b'x'; MAX_FIELD_WIDTH];
        for value in [1e20, -1e20, 18_446_744_073_709_551_616.0, f64::MAX] {
            match format_number(value, &mut buf, 3) {
                Err(DlogError::ValueOutOfRange(v)) => assert_eq!(v, value),
                other => panic!("Expected ValueOutOfRange for {}, got {:?}", value, other),
            }
        }
        assert!(buf.iter().all(|&b| b == b'x'));

        // largest f64 below 2^64 still renders
        assert_eq!(render(18_446_744_073_709_549_568.0, 0), "18446744073709549568");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(render(f64::NAN, 3), "nan");
        assert_eq!(render(f64::INFINITY, 3), "inf");
        assert_eq!(render(f64::NEG_INFINITY, 3), "-inf");
    }

    #[test]
    fn test_exact_length_fits() {
        let mut buf = [0u8; 5];
        assert_eq!(format_number(-1.5, &mut buf, 2).unwrap(), 5);
        assert_eq!(&buf, b"-1.50");
    }

    #[test]
    fn test_short_buffer_is_rejected_untouched() {
        let mut buf = [b'x'; 4];
        let result = format_number(-1.5, &mut buf, 2);
        match result {
            Err(DlogError::BufferOverflow { attempted, capacity }) => {
                assert_eq!(attempted, 5);
                assert_eq!(capacity, 4);
            }
            _ => panic!("Expected BufferOverflow error"),
        }
        assert_eq!(&buf, b"xxxx");
    }

    #[test]
    fn test_count_digits() {
        assert_eq!(count_digits(0), 1);
        assert_eq!(count_digits(9), 1);
        assert_eq!(count_digits(10), 2);
        assert_eq!(count_digits(u64::MAX), 20);
    }

    proptest! {
        #[test]
        fn prop_thousandths_render_exactly(milli in -1_000_000_000_000i64..1_000_000_000_000i64) {
            let value = milli as f64 / 1000.0;
            let sign = if milli < 0 { "-" } else { "" };
            let expected = format!("{}{}.{:03}", sign, milli.unsigned_abs() / 1000, milli.unsigned_abs() % 1000);
            prop_assert_eq!(render(value, 3), expected);
        }

        #[test]
        fn prop_rendering_is_close_to_value(value in -1.0e9f64..1.0e9, precision in 0u8..=9) {
            let text = render(value, precision);
            let parsed: f64 = text.parse().unwrap();
            let tolerance = 0.5 / 10f64.powi(precision as i32) * 1.000_001 + value.abs() * 1e-14;
            prop_assert!((parsed - value).abs() <= tolerance, "{} -> {}", value, text);

            let dot = text.find('.');
            match dot {
                Some(i) => prop_assert_eq!(text.len() - i - 1, precision as usize),
                None => prop_assert_eq!(precision, 0),
            }
        }
    }
}
