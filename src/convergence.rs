/* cordicwave | convergence.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/******************************************************************************/

use crate::cordic::Seed;
use crate::fixed::QFormat;

/******************************************************************************/

/// Brings an accumulated phase back into the CORDIC convergence window
///
/// The rotator only converges for angles in `[-0.5, 0.5]` (+/- 90 degrees). A phase outside of
/// this window is handled by rotating the seed vector by a fixed 90 degrees first:
/// - `z < -0.5`: `(y, -x, z + 0.5)`
/// - `z > 0.5`: `(-y, x, z - 0.5)`
/// - otherwise the seed is kept as is.
///
/// A single correction is applied, which is enough for any phase in `[-1, 1)`. All three outputs
/// are quantized.
pub fn converge(seed: Seed, format: QFormat) -> Seed {
    let Seed { x, y, z } = seed;
    let (x, y, z) = if z < -0.5 {
        log::trace!("phase {} below the convergence window, rotating by -90 degrees", z);
        (y, -x, z + 0.5)
    } else if z > 0.5 {
        log::trace!("phase {} above the convergence window, rotating by +90 degrees", z);
        (-y, x, z - 0.5)
    } else {
        (x, y, z)
    };

    Seed::new(format.quantize(x), format.quantize(y), format.quantize(z))
}

/******************************************************************************/
