/* cordicwave | tables.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Micro-angle tables and gain compensation for the circular rotation mode */

/******************************************************************************/

use alloc::vec::Vec;

use crate::cordic::{Rotation, Seed, Trajectory};
use crate::error::{Error, Result};
use crate::fixed::{quantize, QFormat};

include!(concat!(env!("OUT_DIR"), "/cordic_tables.rs"));

/******************************************************************************/

/// Shift amounts for `n` iterations: `0, 1, ..., n - 1`
pub fn shift_vector(n: usize) -> Vec<u32> {
    (0..n as u32).collect()
}

/// Quantized micro-angles `atan(2^-s) / PI` for every shift value `s`
///
/// Angles are expressed in half turns, the same convention used for the phase: `1.0` is 180
/// degrees.
pub fn angle_table(shift_vector: &[u32], lsb: f64) -> Result<Vec<f64>> {
    shift_vector
        .iter()
        .map(|&s| {
            ATAN_TABLE
                .get(s as usize)
                .map(|&angle| quantize(angle, lsb))
                .ok_or(Error::ShiftOutOfRange { shift: s, max: MAX_ITERATIONS })
        })
        .collect()
}

/// Quantized CORDIC gain compensation `K = prod(1 / sqrt(1 + 2^-2s))`
pub fn scale_constant(shift_vector: &[u32], lsb: f64) -> Result<f64> {
    let mut k = 1.0;
    for &s in shift_vector {
        k *= GAIN_TABLE
            .get(s as usize)
            .ok_or(Error::ShiftOutOfRange { shift: s, max: MAX_ITERATIONS })?;
    }
    Ok(quantize(k, lsb))
}

/******************************************************************************/

/// Immutable CORDIC configuration
///
/// Bundles the number format, the shift vector, the angle table and the scale constant, so that
/// the three tables always agree with the iteration count. Build it once per configuration and
/// share it between generators.
#[derive(Debug, Clone, PartialEq)]
pub struct CordicTables {
    format: QFormat,
    shifts: Vec<u32>,
    angles: Vec<f64>,
    scale: f64,
}

impl CordicTables {
    /// Generates the tables for `iterations` iterations with `frac_bits` fractional bits
    pub fn new(iterations: usize, frac_bits: u32) -> Result<Self> {
        let format = QFormat::new(frac_bits)?;
        if iterations == 0 {
            return Err(Error::ZeroIterations);
        }
        if iterations > MAX_ITERATIONS {
            return Err(Error::TooManyIterations { iterations, max: MAX_ITERATIONS });
        }

        let shifts = shift_vector(iterations);
        let angles = angle_table(&shifts, format.lsb())?;
        let scale = scale_constant(&shifts, format.lsb())?;
        log::debug!("cordic tables: {} iterations, Q{} format, K = {}", iterations, frac_bits, scale);

        Ok(Self { format, shifts, angles, scale })
    }

    /// Number of CORDIC iterations
    pub fn iterations(&self) -> usize {
        self.shifts.len()
    }

    /// Number format shared by all values
    pub fn format(&self) -> QFormat {
        self.format
    }

    pub fn shift_vector(&self) -> &[u32] {
        &self.shifts
    }

    pub fn angle_table(&self) -> &[f64] {
        &self.angles
    }

    /// Gain compensation constant K
    pub fn scale_constant(&self) -> f64 {
        self.scale
    }

    /// Angle table as integer codes, ready to be embedded in a hardware description
    pub fn angle_codes(&self) -> Vec<i64> {
        self.angles.iter().map(|&angle| self.format.encode(angle)).collect()
    }

    /// Largest seed magnitude, `(1 - lsb) * K`
    pub fn max_amplitude(&self) -> f64 {
        let fmt = self.format;
        fmt.quantize(fmt.quantize(fmt.max_value()) * self.scale)
    }

    /// Seed magnitude with one extra lsb of headroom against overflow
    pub fn safe_amplitude(&self) -> f64 {
        let fmt = self.format;
        fmt.quantize(self.max_amplitude() - fmt.lsb())
    }

    /// Runs a complete rotation, see [`crate::cordic::rotate()`]
    pub fn rotate(&self, seed: Seed) -> Trajectory {
        Rotation::new(self, seed).finish()
    }

    /// Rotates the maximum amplitude vector by `phase`
    ///
    /// Returns `(cos, sin)`. No range reduction is applied, so `phase` should lie in
    /// `[-0.5, 0.5]`.
    pub fn rotated_vector(&self, phase: f64) -> (f64, f64) {
        let fmt = self.format;
        let seed = Seed::new(self.max_amplitude(), fmt.quantize(0.0), fmt.quantize(phase));
        let trajectory = self.rotate(seed);
        (trajectory.cos(), trajectory.sin())
    }
}

/******************************************************************************/

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_shift_vector() {
        assert_eq!(shift_vector(5), [0u32, 1, 2, 3, 4]);
        assert!(shift_vector(0).is_empty());
    }

    #[test]
    fn test_q15_tables() {
        let tables = CordicTables::new(15, 15).unwrap();
        assert_eq!(tables.iterations(), 15);
        assert_eq!(tables.scale_constant(), 0.60723876953125);
        assert_eq!(tables.angle_table()[0], 0.25);
        assert_eq!(tables.angle_table()[12], 6.103515625e-05);
        assert_eq!(tables.angle_table()[13], 3.0517578125e-05);
        assert_eq!(tables.angle_table()[14], 0.0);
        assert_eq!(
            tables.angle_codes(),
            [8192i64, 4836, 2555, 1297, 651, 325, 162, 81, 40, 20, 10, 5, 2, 1, 0]
        );
    }

    #[test]
    fn test_q7_tables() {
        let tables = CordicTables::new(6, 7).unwrap();
        assert_eq!(tables.angle_codes(), [32i64, 18, 9, 5, 2, 1]);
        assert_eq!(tables.format().encode(tables.scale_constant()), 77);
    }

    #[test]
    fn test_angles_match_arctangent() {
        let tables = CordicTables::new(20, 24).unwrap();
        let lsb = tables.format().lsb();
        for (i, &angle) in tables.angle_table().iter().enumerate() {
            let exact = libm::atan(libm::ldexp(1.0, -(i as i32))) / core::f64::consts::PI;
            assert!(exact - angle > -1e-15 && exact - angle < lsb);
        }
    }

    #[test]
    fn test_scale_converges() {
        let tables = CordicTables::new(40, 52).unwrap();
        assert_abs_diff_eq!(tables.scale_constant(), 0.6072529350088813, epsilon = 1e-14);
    }

    #[test]
    fn test_amplitudes() {
        let tables = CordicTables::new(15, 15).unwrap();
        assert_eq!(tables.max_amplitude(), 0.607208251953125);
        assert_eq!(tables.safe_amplitude(), 0.607177734375);
    }

    #[test]
    fn test_invalid_configuration() {
        assert_eq!(CordicTables::new(0, 15), Err(Error::ZeroIterations));
        assert_eq!(
            CordicTables::new(65, 15),
            Err(Error::TooManyIterations { iterations: 65, max: MAX_ITERATIONS })
        );
        assert!(matches!(CordicTables::new(15, 0), Err(Error::InvalidFracBits { .. })));
    }

    #[test]
    fn test_shift_out_of_range() {
        assert_eq!(
            angle_table(&[0, 1, 64], 1.0 / 128.0),
            Err(Error::ShiftOutOfRange { shift: 64, max: MAX_ITERATIONS })
        );
        assert!(scale_constant(&[99], 1.0 / 128.0).is_err());
    }

    #[test]
    fn test_rotated_vector() {
        let tables = CordicTables::new(15, 15).unwrap();
        let (cos, sin) = tables.rotated_vector(0.25);
        assert_abs_diff_eq!(cos, core::f64::consts::FRAC_1_SQRT_2, epsilon = 2e-3);
        assert_abs_diff_eq!(sin, core::f64::consts::FRAC_1_SQRT_2, epsilon = 2e-3);
    }
}
