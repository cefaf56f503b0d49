#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

//! Binary entry point for the transform benchmark.
//!
//! The run is fixed at compile time by `BenchConfig::default()`. The report goes to stdout,
//! diagnostics go to stderr.

use std::io::{self, BufWriter};
use std::process::ExitCode;

use tracing::Level;
use transform_bench::{BenchConfig, run};

// Binary entry point - mutations would require subprocess testing which is impractical.
#[cfg_attr(test, mutants::skip)]
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_writer(io::stderr)
        .init();

    let config = BenchConfig::default();
    let mut out = BufWriter::new(io::stdout().lock());

    match run(&config, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
