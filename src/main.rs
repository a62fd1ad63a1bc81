//! Command-line entry point for the AVR template fix-up.

use std::process::ExitCode;

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<ExitCode> {
    cli::Cli::parse().run()
}
