//! Command-line interface and orchestration.

mod common;
mod validation;

pub use common::Host;
pub use validation::{ValidationArgs, validate};

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::ffi::OsString;
use std::io::Write;

/// Validate npm packages against the corp-check service.
#[derive(Parser, Debug)]
#[command(name = "corp-check", version, about, long_about = None)]
pub struct Cli {
    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_name = "LEVEL")]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a local project or a registry package
    #[command(visible_alias = "validate")]
    Validation(ValidationArgs),
}

/// Parse `args`, run the selected command, and report the exit code to `host`.
pub async fn run<H, I, T>(host: &mut H, args: I)
where
    H: Host,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let rendered = e.render().to_string();
            let _ = if e.use_stderr() {
                write!(host.error(), "{rendered}")
            } else {
                write!(host.output(), "{rendered}")
            };
            host.exit(e.exit_code());
            return;
        }
    };

    common::init_logging(cli.log_level);

    let result = match &cli.command {
        Commands::Validation(args) => validate(host, args).await,
    };

    match result {
        Ok(code) => host.exit(code),
        Err(e) => {
            log::debug!(target: common::LOG_TARGET, "Command failed: {e:?}");
            let _ = writeln!(host.error(), "error: {e:#}");
            host.exit(1);
        }
    }
}
