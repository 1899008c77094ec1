use clap::Parser;

pub mod types;
pub mod validation;

pub use types::*;

#[must_use]
pub fn args_checks() -> Cli {
    Cli::parse()
}
