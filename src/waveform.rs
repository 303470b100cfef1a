/* cordicwave | waveform.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Sawtooth, triangle and square pulse generators, and waveform selection */

/******************************************************************************/

use crate::error::{Error, Result};
use crate::fixed::QFormat;
use crate::sine::SineGenerator;
use crate::tables::{CordicTables, MAX_ITERATIONS};

/******************************************************************************/

/// Phase accumulator which folds back once it passes the amplitude
///
/// Shared by the sawtooth and triangle generators. The counter starts at the phase increment, and
/// that initial value is the first emitted sample.
#[derive(Debug, Clone, PartialEq)]
struct FoldingCounter {
    format: QFormat,
    phase_increment: f64,
    amplitude: f64,
    counter: f64,
    started: bool,
}

impl FoldingCounter {
    fn new(format: QFormat, phase_increment: f64, amplitude: f64) -> Self {
        Self {
            format,
            phase_increment,
            amplitude,
            counter: format.quantize(phase_increment),
            started: false,
        }
    }

    fn reset(&mut self) {
        self.counter = self.format.quantize(self.phase_increment);
        self.started = false;
    }

    /// Returns false on the very first call, when the counter is emitted as is
    fn advance(&mut self) -> bool {
        if !self.started {
            self.started = true;
            return false;
        }
        self.counter = if self.counter <= self.amplitude {
            self.format.quantize(self.counter + self.phase_increment)
        } else {
            // Negation, not a wrap to the opposite rail
            self.format.quantize(-self.counter)
        };
        true
    }
}

/******************************************************************************/

/// Sawtooth generator
///
/// Ramps up by the phase increment until the counter exceeds the amplitude, then jumps to the
/// negated counter value.
#[derive(Debug, Clone, PartialEq)]
pub struct Sawtooth {
    ramp: FoldingCounter,
}

impl Sawtooth {
    pub fn new(format: QFormat, phase_increment: f64, amplitude: f64) -> Self {
        Self { ramp: FoldingCounter::new(format, phase_increment, amplitude) }
    }

    pub fn next_sample(&mut self) -> f64 {
        self.ramp.advance();
        self.ramp.counter
    }

    pub fn reset(&mut self) {
        self.ramp.reset();
    }
}

impl Iterator for Sawtooth {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_sample())
    }
}

/******************************************************************************/

/// Triangle generator
///
/// Runs the sawtooth accumulator and negates every other ramp. Each change of the counter sign
/// marks a ramp boundary, but the fold-back produces two sign changes per sawtooth period: only
/// every second one toggles the output direction.
///
/// The sign is inspected once per sample, a phase increment large enough to change the sign twice
/// in a single step is not detected.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    ramp: FoldingCounter,
    previous: f64,
    reverse: bool,
    skip_next: bool,
}

impl Triangle {
    pub fn new(format: QFormat, phase_increment: f64, amplitude: f64) -> Self {
        let ramp = FoldingCounter::new(format, phase_increment, amplitude);
        let previous = ramp.counter;
        Self { ramp, previous, reverse: false, skip_next: false }
    }

    pub fn next_sample(&mut self) -> f64 {
        let fmt = self.ramp.format;
        if !self.ramp.advance() {
            self.previous = self.ramp.counter;
            return fmt.quantize(self.ramp.counter);
        }

        let counter = self.ramp.counter;
        if counter.is_sign_negative() != self.previous.is_sign_negative() {
            if self.skip_next {
                self.skip_next = false;
            } else {
                self.reverse = !self.reverse;
                self.skip_next = true;
                log::trace!("triangle direction toggled at counter {}", counter);
            }
        }
        self.previous = counter;

        if self.reverse {
            fmt.quantize(-counter)
        } else {
            fmt.quantize(counter)
        }
    }

    pub fn reset(&mut self) {
        self.ramp.reset();
        self.previous = self.ramp.counter;
        self.reverse = false;
        self.skip_next = false;
    }
}

impl Iterator for Triangle {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_sample())
    }
}

/******************************************************************************/

/// Square pulse generator
///
/// The accumulator wraps around freely. The output is `1 - lsb` while the counter is at or above
/// the threshold and `-1 + lsb` otherwise, so the threshold sets the duty cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct SquarePulse {
    format: QFormat,
    phase_increment: f64,
    threshold: f64,
    counter: f64,
}

impl SquarePulse {
    pub fn new(format: QFormat, phase_increment: f64, threshold: f64) -> Self {
        Self { format, phase_increment, threshold, counter: format.quantize(0.0) }
    }

    pub fn next_sample(&mut self) -> f64 {
        let fmt = self.format;
        self.counter = fmt.quantize(self.counter + self.phase_increment);
        if self.counter >= self.threshold {
            fmt.quantize(1.0 - fmt.lsb())
        } else {
            fmt.quantize(-1.0 + fmt.lsb())
        }
    }

    pub fn reset(&mut self) {
        self.counter = self.format.quantize(0.0);
    }
}

impl Iterator for SquarePulse {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_sample())
    }
}

/******************************************************************************/

/// Waveform selection, with the mode codes used by the hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum Waveform {
    Sine = 0,
    SquarePulse = 1,
    Sawtooth = 2,
    Triangle = 3,
}

impl TryFrom<u8> for Waveform {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Waveform::Sine),
            1 => Ok(Waveform::SquarePulse),
            2 => Ok(Waveform::Sawtooth),
            3 => Ok(Waveform::Triangle),
            _ => Err(Error::UnknownWaveform(code)),
        }
    }
}

impl From<Waveform> for u8 {
    fn from(waveform: Waveform) -> Self {
        waveform as u8
    }
}

/// One of the four sample sources
#[derive(Debug, Clone)]
pub enum WaveGenerator {
    Sine(SineGenerator),
    SquarePulse(SquarePulse),
    Sawtooth(Sawtooth),
    Triangle(Triangle),
}

impl WaveGenerator {
    pub fn mode(&self) -> Waveform {
        match self {
            WaveGenerator::Sine(_) => Waveform::Sine,
            WaveGenerator::SquarePulse(_) => Waveform::SquarePulse,
            WaveGenerator::Sawtooth(_) => Waveform::Sawtooth,
            WaveGenerator::Triangle(_) => Waveform::Triangle,
        }
    }

    pub fn next_sample(&mut self) -> f64 {
        match self {
            WaveGenerator::Sine(g) => g.next_sample(),
            WaveGenerator::SquarePulse(g) => g.next_sample(),
            WaveGenerator::Sawtooth(g) => g.next_sample(),
            WaveGenerator::Triangle(g) => g.next_sample(),
        }
    }

    pub fn reset(&mut self) {
        match self {
            WaveGenerator::Sine(g) => g.reset(),
            WaveGenerator::SquarePulse(g) => g.reset(),
            WaveGenerator::Sawtooth(g) => g.reset(),
            WaveGenerator::Triangle(g) => g.reset(),
        }
    }
}

impl Iterator for WaveGenerator {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_sample())
    }
}

/******************************************************************************/

/// Generator settings as written by a driver
///
/// `phase_increment` and `amplitude` are quantized to the format by [`WaveformConfig::build()`].
/// The meaning of `amplitude` depends on the mode:
/// - sine: seed magnitude, defaults to [`CordicTables::safe_amplitude()`]
/// - sawtooth and triangle: fold-back level, defaults to `1 - lsb`
/// - square pulse: threshold, defaults to 0 (50% duty cycle)
///
/// `iterations` only matters for the sine and defaults to one iteration per fractional bit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveformConfig {
    pub mode: Waveform,
    pub frac_bits: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub iterations: Option<usize>,
    pub phase_increment: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub amplitude: Option<f64>,
}

impl WaveformConfig {
    pub fn new(mode: Waveform, frac_bits: u32, phase_increment: f64) -> Self {
        Self { mode, frac_bits, iterations: None, phase_increment, amplitude: None }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = Some(amplitude);
        self
    }

    /// Validates the settings and creates the selected generator
    pub fn build(&self) -> Result<WaveGenerator> {
        let fmt = QFormat::new(self.frac_bits)?;
        let phase_increment = fmt.quantize(self.phase_increment);
        let amplitude = self.amplitude.map(|a| fmt.quantize(a));

        let generator = match self.mode {
            Waveform::Sine => {
                let iterations = self
                    .iterations
                    .unwrap_or_else(|| (self.frac_bits as usize).min(MAX_ITERATIONS));
                let tables = CordicTables::new(iterations, self.frac_bits)?;
                let mut sine = SineGenerator::new(tables, phase_increment);
                if let Some(amplitude) = amplitude {
                    sine.set_amplitude(amplitude);
                }
                WaveGenerator::Sine(sine)
            }
            Waveform::SquarePulse => WaveGenerator::SquarePulse(SquarePulse::new(
                fmt,
                phase_increment,
                amplitude.unwrap_or(0.0),
            )),
            Waveform::Sawtooth => WaveGenerator::Sawtooth(Sawtooth::new(
                fmt,
                phase_increment,
                amplitude.unwrap_or_else(|| fmt.max_value()),
            )),
            Waveform::Triangle => WaveGenerator::Triangle(Triangle::new(
                fmt,
                phase_increment,
                amplitude.unwrap_or_else(|| fmt.max_value()),
            )),
        };

        log::debug!(
            "{:?} generator, Q{} format, phase increment {}",
            self.mode,
            self.frac_bits,
            phase_increment
        );
        Ok(generator)
    }
}

/******************************************************************************/
