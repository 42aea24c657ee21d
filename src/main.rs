//! Uniform catalog CLI entry point
//!
//! Parses arguments and dispatches to the CLI module; errors are printed to
//! stderr and end the process with a non-zero exit code.

use uniform_catalog::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("[{}] {}", e.code(), e);
        std::process::exit(1);
    }
}
