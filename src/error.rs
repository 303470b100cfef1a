/* cordicwave | error.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/******************************************************************************/

use thiserror::Error;

/******************************************************************************/

/// Result type used throughout the crate
pub type Result<T> = core::result::Result<T, Error>;

/// Configuration errors
///
/// The numeric core never fails at run time: out-of-domain values are a caller precondition, just
/// as they are for the hardware being modelled. Only mismatched or unsupported configurations are
/// reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A CORDIC configuration needs at least one iteration
    #[error("the iteration count must be at least 1")]
    ZeroIterations,

    /// More iterations than the generated tables provide
    #[error("{iterations} iterations requested, at most {max} are supported")]
    TooManyIterations { iterations: usize, max: usize },

    /// Unsupported fractional bit count
    #[error("invalid fractional bit count {frac_bits}, expected 1..={max}")]
    InvalidFracBits { frac_bits: u32, max: u32 },

    /// Shift value without a matching micro-angle
    #[error("shift value {shift} exceeds the table size ({max} entries)")]
    ShiftOutOfRange { shift: u32, max: usize },

    /// Table length does not match the iteration count
    #[error("{what} has {actual} entries, expected {expected}")]
    LengthMismatch { what: &'static str, expected: usize, actual: usize },

    /// Waveform mode code outside of the known set
    #[error("unknown waveform mode {0}")]
    UnknownWaveform(u8),
}
