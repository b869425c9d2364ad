//! Main binary entry point for the `pystylint` style checker.
//!
//! This binary simply delegates to the shared `entry_point::run_with_args()`
//! function to ensure consistent behavior across all entry points.

use anyhow::Result;

fn main() -> Result<()> {
    let code = pystylint::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
