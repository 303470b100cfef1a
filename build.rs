use std::env;
use std::f64::consts::PI;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const TABLE_SIZE: usize = 64;

/// Micro-angles `atan(2^-i)`, expressed in half turns (1.0 = 180 degrees)
fn compute_atan_table() -> [f64; TABLE_SIZE] {
    (0..TABLE_SIZE)
        .map(|i| f64::atan(f64::powf(2.0, -(i as f64))) / PI)
        .collect::<Vec<f64>>()
        .try_into()
        .unwrap()
}

/// Per-stage gain compensation `1 / sqrt(1 + 2^-2i)`
fn compute_gain_table() -> [f64; TABLE_SIZE] {
    (0..TABLE_SIZE)
        .map(|i| 1.0 / f64::sqrt(1.0 + f64::powf(2.0, -2.0 * i as f64)))
        .collect::<Vec<f64>>()
        .try_into()
        .unwrap()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("cordic_tables.rs");
    let mut f = File::create(dest_path).unwrap();

    writeln!(&mut f, "/// Number of entries in the generated CORDIC tables").unwrap();
    writeln!(&mut f, "pub const MAX_ITERATIONS: usize = {};", TABLE_SIZE).unwrap();
    let atan_table = compute_atan_table();
    writeln!(&mut f, "#[allow(clippy::approx_constant)]").unwrap();
    writeln!(&mut f, "const ATAN_TABLE: [f64; {}] = {:?};", atan_table.len(), atan_table).unwrap();
    let gain_table = compute_gain_table();
    writeln!(&mut f, "const GAIN_TABLE: [f64; {}] = {:?};", gain_table.len(), gain_table).unwrap();
}
