//! Entry point for the `littlebound` command-line interface.
#![forbid(unsafe_code)]

use std::process::ExitCode;

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr before exiting"
)]
fn main() -> ExitCode {
    match littlebound_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(littlebound_cli::CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("littlebound: {err}");
            ExitCode::FAILURE
        }
    }
}
