//! frexp/ldexp helpers for the `^F` float encoding.

const MANTISSA_BITS: u32 = 52;
const EXPONENT_MASK: u64 = 0x7ff;
const FRACTION_MASK: u64 = (1 << MANTISSA_BITS) - 1;
const IMPLICIT_BIT: u64 = 1 << MANTISSA_BITS;

/// Splits a finite `x` into `(mantissa, exponent)` with
/// `x == mantissa * 2^(exponent - 53)` and `2^52 <= |mantissa| < 2^53`.
///
/// Zero yields `(0, 0)`. Callers must not pass NaN or infinities.
pub(crate) fn frexp(x: f64) -> (i64, i32) {
    let bits = x.to_bits();
    let biased = ((bits >> MANTISSA_BITS) & EXPONENT_MASK) as i32;
    let fraction = bits & FRACTION_MASK;
    let sign = if x.is_sign_negative() { -1 } else { 1 };

    let (mantissa, exponent) = if biased == 0 {
        if fraction == 0 {
            return (0, 0);
        }
        // Subnormal: shift the leading one up to the implicit bit position.
        let shift = fraction.leading_zeros() - (63 - MANTISSA_BITS);
        (fraction << shift, -1021 - shift as i32)
    } else {
        (fraction | IMPLICIT_BIT, biased - 1022)
    };

    (sign * mantissa as i64, exponent)
}

/// Computes `mantissa * 2^(exponent - 53)`.
pub(crate) fn ldexp(mantissa: i64, exponent: i64) -> f64 {
    let shift = exponent.saturating_sub(53).clamp(-4000, 4000) as i32;
    scale(mantissa as f64, shift)
}

/// `x * 2^n` without intermediate overflow or underflow.
fn scale(x: f64, mut n: i32) -> f64 {
    let two_1023 = f64::from_bits(0x7fe0_0000_0000_0000);
    // 2^-1022 * 2^53; keeps subnormal results exact.
    let two_neg_969 = f64::from_bits(0x0360_0000_0000_0000);
    let mut y = x;

    if n > 1023 {
        y *= two_1023;
        n -= 1023;
        if n > 1023 {
            y *= two_1023;
            n -= 1023;
            n = n.min(1023);
        }
    } else if n < -1022 {
        y *= two_neg_969;
        n += 1022 - 53;
        if n < -1022 {
            y *= two_neg_969;
            n += 1022 - 53;
            n = n.max(-1022);
        }
    }

    y * f64::from_bits(((0x3ff + n) as u64) << MANTISSA_BITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frexp_normal() {
        assert_eq!(frexp(1.0), (1 << 52, 1));
        assert_eq!(frexp(3.0), (6755399441055744, 2));
        assert_eq!(frexp(-0.5), (-(1 << 52), 0));
        assert_eq!(frexp(0.0), (0, 0));
    }

    #[test]
    fn test_frexp_mantissa_is_normalized() {
        for x in [0.1, 123.456, -7.25e-300, 1.7976931348623157e308, 5e-324] {
            let (m, _) = frexp(x);
            assert!(m.unsigned_abs() >= 1 << 52, "{x}");
            assert!(m.unsigned_abs() < 1 << 53, "{x}");
        }
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            0.1,
            -0.1,
            123.456,
            1.0 / 3.0,
            f64::MAX,
            f64::MIN,
            f64::MIN_POSITIVE,
            f64::EPSILON,
            5e-324,
            -2.2250738585072e-310,
            1e300,
            2.0,
        ];
        for x in samples {
            let (m, e) = frexp(x);
            assert_eq!(ldexp(m, i64::from(e)).to_bits(), x.to_bits(), "{x}");
        }
    }

    #[test]
    fn test_ldexp_extremes() {
        assert_eq!(ldexp(1, 100_000), f64::INFINITY);
        assert_eq!(ldexp(-1, 100_000), f64::NEG_INFINITY);
        assert_eq!(ldexp(1, -100_000), 0.0);
        assert_eq!(ldexp(0, 17), 0.0);
        assert_eq!(ldexp(1, 54), 2.0);
    }
}
