//! Command-line layer: argument parsing, detection, output

mod check;
mod context;
mod style;

pub use check::{CheckArgs, CheckOutcome, run_check};

use anstream::eprintln;
use ready_or_not::error::Error;
use style::Stylize;

/// Print an operational error to stderr
pub fn print_error(err: &Error) {
    eprintln!("{} {err}", "error:".error());
    if let Error::Auth(_) = err {
        eprintln!(
            "{}",
            "  Set GITHUB_TOKEN (or GH_TOKEN), or authenticate with `gh auth login`.".muted()
        );
    }
}
