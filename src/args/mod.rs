// Public modules
pub mod types;
mod validators;

// Re-export everything from the submodules
pub use types::*;
pub use validators::*;

use clap::Parser;
use std::process;

/// Parse command line arguments and validate mode requirements
///
/// Exits the process with code 1 if validation fails.
#[must_use]
pub fn args_checks() -> Args {
    let args = Args::parse();

    if let Err(e) = args.validate() {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    args
}
