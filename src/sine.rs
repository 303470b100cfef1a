/* cordicwave | sine.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Phase accumulator + convergence unit + CORDIC rotator */

/******************************************************************************/

use crate::convergence::converge;
use crate::cordic::{Seed, Trajectory};
use crate::tables::CordicTables;

/******************************************************************************/

/// Everything computed for one sine sample
#[derive(Debug, Clone, PartialEq)]
pub struct SineStep {
    /// Seed before the convergence unit, `z` is the accumulated phase
    pub accumulated: Seed,
    /// Seed after the convergence unit, as fed to the rotator
    pub reduced: Seed,
    /// Complete rotation
    pub trajectory: Trajectory,
}

impl SineStep {
    pub fn sin(&self) -> f64 {
        self.trajectory.sin()
    }

    pub fn cos(&self) -> f64 {
        self.trajectory.cos()
    }
}

/******************************************************************************/

/// Continuous sine sample stream
///
/// Every sample advances the phase by the phase increment, then rotates the seed vector
/// `(amplitude, 0)` by the accumulated phase. For example:
/// ```
/// let tables = cordicwave::CordicTables::new(6, 7).unwrap();
/// let mut sine = cordicwave::SineGenerator::new(tables, 0.25);
///
/// // 0.25 half turn per sample: 45, 90, 135, 180 degrees...
/// let samples: Vec<f64> = sine.by_ref().take(4).collect();
/// assert!(samples[1] > samples[0] && samples[1] > samples[2]);
/// ```
#[derive(Debug, Clone)]
pub struct SineGenerator {
    tables: CordicTables,
    amplitude: f64,
    phase_increment: f64,
    phase: f64,
}

impl SineGenerator {
    /// Creates a sine generator with the largest amplitude that cannot overflow
    pub fn new(tables: CordicTables, phase_increment: f64) -> Self {
        let amplitude = tables.safe_amplitude();
        let phase = tables.format().quantize(0.0);
        Self { tables, amplitude, phase_increment, phase }
    }

    /// Replaces the seed magnitude
    ///
    /// The output amplitude is `amplitude / K`, keep it below [`CordicTables::safe_amplitude()`]
    /// to avoid overflows.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.set_amplitude(amplitude);
        self
    }

    pub fn tables(&self) -> &CordicTables {
        &self.tables
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn set_amplitude(&mut self, amplitude: f64) {
        self.amplitude = amplitude;
    }

    pub fn phase_increment(&self) -> f64 {
        self.phase_increment
    }

    pub fn set_phase_increment(&mut self, phase_increment: f64) {
        self.phase_increment = phase_increment;
    }

    /// Current accumulated phase
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Restarts the stream from phase zero
    pub fn reset(&mut self) {
        self.phase = self.tables.format().quantize(0.0);
    }

    /// Advances the phase and computes the next sample, with all intermediate values
    pub fn next_step(&mut self) -> SineStep {
        let fmt = self.tables.format();
        self.phase = fmt.quantize(self.phase + self.phase_increment);

        let accumulated = Seed::new(self.amplitude, fmt.quantize(0.0), self.phase);
        let reduced = converge(accumulated, fmt);
        let trajectory = self.tables.rotate(reduced);

        SineStep { accumulated, reduced, trajectory }
    }

    /// Advances the phase and computes the next sine sample
    pub fn next_sample(&mut self) -> f64 {
        self.next_step().sin()
    }
}

impl Iterator for SineGenerator {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_sample())
    }
}

/******************************************************************************/

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use approx::assert_abs_diff_eq;
    use core::f64::consts::PI;

    #[test]
    fn test_q7_first_samples() {
        let tables = CordicTables::new(6, 7).unwrap();
        let fmt = tables.format();
        let sine = SineGenerator::new(tables, 0.308807373046875);
        let codes: Vec<i64> = sine.take(12).map(|v| fmt.encode(v)).collect();
        assert_eq!(codes, [101i64, 118, 29, -82, -123, -64, 51, 121, 86, -12, -110, -107]);
    }

    #[test]
    fn test_debug_step() {
        let tables = CordicTables::new(6, 7).unwrap();
        let mut sine = SineGenerator::new(tables, 0.308807373046875);
        assert_eq!(sine.amplitude(), 75.0 / 128.0);

        let step = sine.next_step();
        assert_eq!(step.accumulated, Seed::new(75.0 / 128.0, 0.0, 39.0 / 128.0));
        assert_eq!(step.reduced, step.accumulated);
        assert_eq!(step.trajectory.len(), 7);

        // 78 lsb is beyond +90 degrees, the convergence unit steps in
        let step = sine.next_step();
        assert_eq!(step.accumulated.z, 78.0 / 128.0);
        assert_eq!(step.reduced, Seed::new(0.0, 75.0 / 128.0, 14.0 / 128.0));

        let mut replay = sine.clone();
        replay.reset();
        assert_eq!(replay.nth(1), Some(step.sin()));
    }

    #[test]
    fn test_q15_tracks_sine() {
        let tables = CordicTables::new(15, 15).unwrap();
        let mut sine = SineGenerator::new(tables, 1.0 / 64.0);
        for n in 1..=512 {
            let step = sine.next_step();
            let expected = n as f64 / 64.0 * PI;
            assert_abs_diff_eq!(step.sin(), libm::sin(expected), epsilon = 2e-3);
            assert_abs_diff_eq!(step.cos(), libm::cos(expected), epsilon = 2e-3);
        }
    }

    #[test]
    fn test_phase_wraps() {
        let tables = CordicTables::new(15, 15).unwrap();
        let mut sine = SineGenerator::new(tables, 0.5);
        let phases: Vec<f64> = (0..4).map(|_| sine.next_step().accumulated.z).collect();
        assert_eq!(phases, [0.5, -1.0, -0.5, 0.0]);
    }

    #[test]
    fn test_amplitude_and_reset() {
        let tables = CordicTables::new(15, 15).unwrap();
        let mut sine = SineGenerator::new(tables, 0.5).with_amplitude(0.25);
        assert_abs_diff_eq!(sine.next_sample(), 0.25 / 0.60723876953125, epsilon = 1e-3);
        assert_eq!(sine.phase(), 0.5);

        sine.reset();
        assert_eq!(sine.phase(), 0.0);
        sine.set_phase_increment(0.0);
        assert_abs_diff_eq!(sine.next_sample(), 0.0, epsilon = 1e-3);
    }
}
