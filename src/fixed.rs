/* cordicwave | fixed.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Signed fixed-point arithmetic on the [-1, 1 - lsb] grid */

/******************************************************************************/

use alloc::format;
use alloc::string::String;

use crate::error::{Error, Result};

/******************************************************************************/

/// Largest supported fractional bit count
///
/// Above this an `f64` mantissa can no longer hold every grid value exactly.
pub const MAX_FRAC_BITS: u32 = 52;

/// Quantizes a value onto the fixed-point grid of step `lsb`
///
/// The value is truncated toward negative infinity, then wrapped back into `[-1, 1 - lsb]` with a
/// single correction of one period. Values more than one period outside of the range are
/// intentionally not reduced any further: the hardware adder only ever overflows once.
///
/// The sign of `lsb` is ignored.
pub fn quantize(x: f64, lsb: f64) -> f64 {
    let lsb = libm::fabs(lsb);
    let upper_bound = 1.0 - lsb;
    let lower_bound = -1.0;

    let x_q = libm::floor(x / lsb) * lsb;
    if x_q < lower_bound {
        x_q - 2.0 * lower_bound
    } else if x_q > upper_bound {
        x_q + 2.0 * lower_bound
    } else {
        x_q
    }
}

/// Arithmetic right shift of a fixed-point value with `frac_bits` fractional bits
///
/// The value is first converted to its integer code by truncation toward zero, then shifted with
/// sign extension. Keeping these two steps separate matters for values that are not on the grid:
/// `-2.5 lsb >> 1` gives `-1 lsb`, not `-2 lsb`.
pub fn arithmetic_shift_right(x: f64, s: u32, frac_bits: u32) -> f64 {
    if s == 0 {
        return x;
    }
    let scale = libm::ldexp(1.0, frac_bits as i32);
    let code = (x * scale) as i64;
    (code >> s.min(i64::BITS - 1)) as f64 / scale
}

/******************************************************************************/

/// Signed Q-format: one sign bit and `frac_bits` fractional bits, two's complement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QFormat {
    frac_bits: u32,
}

impl QFormat {
    /// Creates a new format
    ///
    /// Fails if `frac_bits` is zero or larger than [`MAX_FRAC_BITS`].
    pub fn new(frac_bits: u32) -> Result<Self> {
        if frac_bits == 0 || frac_bits > MAX_FRAC_BITS {
            return Err(Error::InvalidFracBits { frac_bits, max: MAX_FRAC_BITS });
        }
        Ok(Self { frac_bits })
    }

    /// Number of fractional bits
    pub const fn frac_bits(&self) -> u32 {
        self.frac_bits
    }

    /// Word width, including the sign bit
    pub const fn total_bits(&self) -> u32 {
        self.frac_bits + 1
    }

    /// Value of the least significant bit, `2^-F`
    pub fn lsb(&self) -> f64 {
        libm::ldexp(1.0, -(self.frac_bits as i32))
    }

    /// Most negative representable value
    pub fn min_value(&self) -> f64 {
        -1.0
    }

    /// Most positive representable value
    pub fn max_value(&self) -> f64 {
        1.0 - self.lsb()
    }

    /// See [`quantize()`]
    pub fn quantize(&self, x: f64) -> f64 {
        quantize(x, self.lsb())
    }

    /// See [`arithmetic_shift_right()`]
    pub fn shift_right(&self, x: f64, s: u32) -> f64 {
        arithmetic_shift_right(x, s, self.frac_bits)
    }

    /// Integer code of a value, `floor(v * 2^F)`
    ///
    /// For quantized values this is the exact two's-complement word seen by the hardware.
    pub fn encode(&self, v: f64) -> i64 {
        libm::floor(libm::ldexp(v, self.frac_bits as i32)) as i64
    }

    /// Value of an integer code
    pub fn decode(&self, code: i64) -> f64 {
        libm::ldexp(code as f64, -(self.frac_bits as i32))
    }

    /// Two's-complement bit pattern of a value, MSB first, `F + 1` characters long
    ///
    /// Example: with 7 fractional bits, `-0.5` gives `"11000000"`.
    pub fn to_bits(&self, v: f64) -> String {
        let width = self.total_bits() as usize;
        let mask = (1u64 << width) - 1;
        format!("{:0width$b}", self.encode(v) as u64 & mask, width = width)
    }
}

/******************************************************************************/

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const Q15_LSB: f64 = 3.0517578125e-05;

    #[test]
    fn test_lsb() {
        let fmt = QFormat::new(15).unwrap();
        assert_eq!(fmt.lsb(), Q15_LSB);
        assert_eq!(fmt.total_bits(), 16);
        assert_eq!(fmt.max_value(), 1.0 - Q15_LSB);
        assert_eq!(fmt.min_value(), -1.0);
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(QFormat::new(0), Err(Error::InvalidFracBits { frac_bits: 0, max: MAX_FRAC_BITS }));
        assert!(QFormat::new(53).is_err());
        assert!(QFormat::new(52).is_ok());
    }

    #[test]
    fn test_quantize_on_grid() {
        assert_eq!(quantize(-0.625, Q15_LSB), -0.625);
        assert_eq!(quantize(0.0, Q15_LSB), 0.0);
        assert_eq!(quantize(-1.0, Q15_LSB), -1.0);
        assert_eq!(quantize(1.0 - Q15_LSB, Q15_LSB), 1.0 - Q15_LSB);
    }

    #[test]
    fn test_quantize_truncates_downward() {
        let lsb = 1.0 / 128.0;
        assert_eq!(quantize(0.01, lsb), lsb);
        assert_eq!(quantize(-0.01, lsb), -2.0 * lsb);
        assert_eq!(quantize(0.2, lsb), 25.0 * lsb);
    }

    #[test]
    fn test_quantize_negative_lsb() {
        let lsb = 1.0 / 128.0;
        assert_eq!(quantize(0.2, -lsb), quantize(0.2, lsb));
    }

    #[test]
    fn test_quantize_wraps_once() {
        let lsb = 1.0 / 128.0;
        assert_eq!(quantize(1.0, lsb), -1.0);
        assert_eq!(quantize(1.0 + 3.0 * lsb, lsb), -1.0 + 3.0 * lsb);
        assert_eq!(quantize(-1.0 - lsb, lsb), 1.0 - lsb);
        // More than one period away is left partly unwrapped
        assert_eq!(quantize(3.5, lsb), 1.5);
        assert_eq!(quantize(-3.5, lsb), -1.5);
    }

    #[test]
    fn test_shift_right() {
        assert_eq!(arithmetic_shift_right(-0.625, 2, 15), -0.15625);
        assert_eq!(arithmetic_shift_right(0.625, 2, 15), 0.15625);
        assert_eq!(arithmetic_shift_right(0.3, 0, 15), 0.3);
    }

    #[test]
    fn test_shift_right_sign_extension() {
        let lsb = Q15_LSB;
        assert_eq!(arithmetic_shift_right(-lsb, 1, 15), -lsb);
        assert_eq!(arithmetic_shift_right(-lsb, 14, 15), -lsb);
        assert_eq!(arithmetic_shift_right(lsb, 1, 15), 0.0);
        assert_eq!(arithmetic_shift_right(-1.0, 15, 15), -lsb);
        assert_eq!(arithmetic_shift_right(-0.5, 100, 15), -lsb);
        assert_eq!(arithmetic_shift_right(0.5, 100, 15), 0.0);
    }

    #[test]
    fn test_shift_right_truncates_before_shifting() {
        let lsb = Q15_LSB;
        assert_eq!(arithmetic_shift_right(-2.5 * lsb, 1, 15), -lsb);
        assert_eq!(arithmetic_shift_right(2.5 * lsb, 1, 15), lsb);
    }

    #[test]
    fn test_encode() {
        let fmt = QFormat::new(7).unwrap();
        assert_eq!(fmt.encode(0.5), 64);
        assert_eq!(fmt.encode(-0.5), -64);
        assert_eq!(fmt.encode(-1.0), -128);
        assert_eq!(fmt.encode(fmt.max_value()), 127);
        assert_eq!(fmt.encode(-0.01), -2);
        assert_eq!(fmt.decode(-2), -2.0 / 128.0);
        assert_abs_diff_eq!(fmt.decode(fmt.encode(0.3)), 0.3, epsilon = fmt.lsb());
    }

    #[test]
    fn test_to_bits() {
        let fmt = QFormat::new(7).unwrap();
        assert_eq!(fmt.to_bits(0.5), "01000000");
        assert_eq!(fmt.to_bits(-0.5), "11000000");
        assert_eq!(fmt.to_bits(-1.0), "10000000");
        assert_eq!(fmt.to_bits(fmt.max_value()), "01111111");
        assert_eq!(fmt.to_bits(-fmt.lsb()), "11111111");
    }
}
