use std::{path::PathBuf, process::ExitCode};

mod check;
mod fix;
mod inspect;
mod terminal;

use anyhow::Context;
use avrfix::Config;
use clap::ArgAction;

/// Exit code for `check` and `inspect` when the template needs attention.
const NEEDS_ATTENTION: u8 = 2;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (ignored if it does not exist)
    #[arg(long, default_value = "avr-fix.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<ExitCode> {
        Self::setup_logging(self.verbose);
        self.dispatch()
    }

    /// Loads the configuration and runs the selected command, `fix` if none.
    fn dispatch(self) -> anyhow::Result<ExitCode> {
        let config = Config::load_or_default(&self.config)
            .with_context(|| format!("invalid configuration in {}", self.config.display()))?;

        self.command
            .unwrap_or_else(|| Command::Fix(fix::Command::default()))
            .run(config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Rewrite the template in place (default)
    ///
    /// Moves descriptions into the `required` column and fills empty
    /// `proposedGuaranteed` values with the placeholder.
    Fix(fix::Command),

    /// Report what a fix would change without writing
    ///
    /// Exits with code 2 if the template would change.
    Check(check::Command),

    /// Check data rows for missing columns and unconverged values
    ///
    /// Exits with code 2 if any findings are reported.
    Inspect(inspect::Command),
}

impl Command {
    fn run(self, config: Config) -> anyhow::Result<ExitCode> {
        match self {
            Self::Fix(command) => command.run(config),
            Self::Check(command) => command.run(config),
            Self::Inspect(command) => command.run(config),
        }
    }
}

/// Applies a `--file` override to the configured template path.
fn resolve(mut config: Config, file: Option<PathBuf>) -> Config {
    if let Some(file) = file {
        config.set_path(file);
    }
    config
}
