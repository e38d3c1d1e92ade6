// CLI module
// Command-line interface, argument parsing and command execution

mod args;
mod commands;
pub mod validate;

pub use args::{AddressArgs, CliArgs, Command, Credentials, OpenArgs};
pub use commands::{format_money, run};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing required arguments, or
/// `--help`), clap prints the error or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
