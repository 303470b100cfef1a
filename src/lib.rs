/* cordicwave | lib.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Bit-exact fixed-point model of a CORDIC waveform generator */

/******************************************************************************/

#![no_std]
#![doc = include_str!("../README.md")]

extern crate alloc;

/******************************************************************************/

pub mod convergence;
pub mod cordic;
pub mod error;
pub mod fixed;
pub mod sine;
pub mod tables;
pub mod waveform;

/******************************************************************************/

pub use convergence::converge;
pub use cordic::{rotate, Rotation, Seed, Trajectory};
pub use error::{Error, Result};
pub use fixed::{arithmetic_shift_right, quantize, QFormat, MAX_FRAC_BITS};
pub use sine::{SineGenerator, SineStep};
pub use tables::{angle_table, scale_constant, shift_vector, CordicTables, MAX_ITERATIONS};
pub use waveform::{Sawtooth, SquarePulse, Triangle, WaveGenerator, Waveform, WaveformConfig};
