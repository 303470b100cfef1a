/* cordicwave | cordic.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Iterative CORDIC, rotation mode, circular coordinate system */

/******************************************************************************/

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::fixed::QFormat;
use crate::tables::CordicTables;

/******************************************************************************/

/// Rotator input: vector `(x, y)` and the angle `z` left to rotate by
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Seed {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Seed {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Every intermediate value of a rotation
///
/// Index 0 holds the seed, index `iterations` the converged result.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl Trajectory {
    fn with_seed(seed: Seed, iterations: usize) -> Self {
        let mut trajectory = Self {
            x: Vec::with_capacity(iterations + 1),
            y: Vec::with_capacity(iterations + 1),
            z: Vec::with_capacity(iterations + 1),
        };
        trajectory.push(seed);
        trajectory
    }

    fn push(&mut self, point: Seed) {
        self.x.push(point.x);
        self.y.push(point.y);
        self.z.push(point.z);
    }

    /// Number of stored points, `iterations + 1` once the rotation is complete
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false, a trajectory holds at least its seed
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn z(&self) -> &[f64] {
        &self.z
    }

    /// Point at index `i`
    pub fn point(&self, i: usize) -> Option<Seed> {
        Some(Seed::new(*self.x.get(i)?, *self.y.get(i)?, *self.z.get(i)?))
    }

    /// Last point
    pub fn result(&self) -> Seed {
        let last = self.len() - 1;
        Seed::new(self.x[last], self.y[last], self.z[last])
    }

    /// Sine output, the final y value
    pub fn sin(&self) -> f64 {
        self.result().y
    }

    /// Cosine output, the final x value
    ///
    /// [`CordicTables::safe_amplitude()`] only keeps the sine in range: for angles just below zero
    /// the cosine can still exceed `1 - lsb` and wrap around.
    pub fn cos(&self) -> f64 {
        self.result().x
    }
}

/******************************************************************************/

/// Non-blocking CORDIC rotation
///
/// Each call to [`Rotation::iterate()`] performs exactly one micro-rotation, the same amount of
/// work the hardware core performs per clock cycle. For example:
/// ```
/// let tables = cordicwave::CordicTables::new(15, 15).unwrap();
/// let seed = cordicwave::Seed::new(tables.safe_amplitude(), 0.0, 0.25);
///
/// let mut rotation = cordicwave::Rotation::new(&tables, seed);
/// while !rotation.is_done() {
///     rotation.iterate();
///     // Other actions can be performed here between two iterations
/// }
/// let trajectory = rotation.finish();
/// assert_eq!(trajectory.len(), 16);
/// ```
pub struct Rotation<'a> {
    format: QFormat,
    angles: &'a [f64],
    shifts: &'a [u32],
    trajectory: Trajectory,
}

impl<'a> Rotation<'a> {
    /// Starts a new rotation of `seed`
    ///
    /// The angle `seed.z` should lie in `[-0.5, 0.5]`. Other values are rotated all the same, but
    /// the result does not converge.
    pub fn new(tables: &'a CordicTables, seed: Seed) -> Self {
        Self::from_parts(tables.format(), tables.angle_table(), tables.shift_vector(), seed)
    }

    fn from_parts(format: QFormat, angles: &'a [f64], shifts: &'a [u32], seed: Seed) -> Self {
        Self {
            format,
            angles,
            shifts,
            trajectory: Trajectory::with_seed(seed, angles.len()),
        }
    }

    /// Number of iterations performed so far
    pub fn step(&self) -> usize {
        self.trajectory.len() - 1
    }

    /// Checks if all the iterations have been performed
    pub fn is_done(&self) -> bool {
        self.step() >= self.angles.len()
    }

    /// Latest point of the rotation
    pub fn current(&self) -> Seed {
        self.trajectory.result()
    }

    /// Performs one micro-rotation, does nothing once the rotation is done
    pub fn iterate(&mut self) {
        if self.is_done() {
            return;
        }

        let i = self.step();
        let fmt = self.format;
        let Seed { x, y, z } = self.current();

        let sigma = if z >= 0.0 { 1.0 } else { -1.0 };
        let y_shift = fmt.quantize(fmt.shift_right(y, self.shifts[i]));
        let x_shift = fmt.quantize(fmt.shift_right(x, self.shifts[i]));

        self.trajectory.push(Seed {
            x: fmt.quantize(x - sigma * y_shift),
            y: fmt.quantize(y + sigma * x_shift),
            z: fmt.quantize(z - sigma * self.angles[i]),
        });
    }

    /// Blocking version of [`Rotation::iterate()`], runs all the remaining iterations
    pub fn run(&mut self) {
        while !self.is_done() {
            self.iterate();
        }
    }

    /// Completes the rotation and returns its trajectory
    pub fn finish(mut self) -> Trajectory {
        self.run();
        self.trajectory
    }
}

/******************************************************************************/

/// Rotates `seed` with explicitly provided tables
///
/// Both tables must hold exactly `iterations` entries, anything else is reported as
/// [`Error::LengthMismatch`]. Prefer [`CordicTables::rotate()`], whose tables are consistent by
/// construction.
pub fn rotate(
    seed: Seed,
    angle_table: &[f64],
    shift_vector: &[u32],
    iterations: usize,
    frac_bits: u32,
) -> Result<Trajectory> {
    let format = QFormat::new(frac_bits)?;
    if angle_table.len() != iterations {
        return Err(Error::LengthMismatch {
            what: "angle table",
            expected: iterations,
            actual: angle_table.len(),
        });
    }
    if shift_vector.len() != iterations {
        return Err(Error::LengthMismatch {
            what: "shift vector",
            expected: iterations,
            actual: shift_vector.len(),
        });
    }
    Ok(Rotation::from_parts(format, angle_table, shift_vector, seed).finish())
}

/******************************************************************************/
