//! CLI entry point for the pipe-rotation level tooling

use clap::Parser;
use std::process::ExitCode;
use tiletwist::PuzzleError;
use tiletwist::io::cli::{Cli, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            report(&error);
            ExitCode::FAILURE
        }
    }
}

// Allow print for the final error message
#[allow(clippy::print_stderr)]
fn report(error: &PuzzleError) {
    eprintln!("error: {error}");
}
