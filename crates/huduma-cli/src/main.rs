mod commands;
mod error;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{dates, migrate, phone, status, Context};
use crate::error::{exit_code_for, report_error};
use huduma_config as config;

#[derive(Debug, Parser)]
#[command(name = "huduma", version, about = "huduma formatting and normalization CLI")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize phone numbers to the 254XXXXXXXXX form
    Normalize(phone::NormalizeArgs),
    /// Check a phone number against the configured validation policy
    Validate(phone::ValidateArgs),
    /// Render a phone number as +254 XXX XXX XXX
    Display(phone::DisplayArgs),
    /// Print the badge class for a status
    Status(status::StatusArgs),
    /// Render a stored date for display
    #[command(name = "format-date")]
    FormatDate(dates::FormatDateArgs),
    /// Normalize the phone field of every record in a JSON file
    Migrate(migrate::MigrateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    let ctx = Context {
        json,
        config: &app_config,
    };

    match command {
        Command::Normalize(args) => phone::normalize(&ctx, args),
        Command::Validate(args) => phone::validate(&ctx, args),
        Command::Display(args) => phone::display(&ctx, args),
        Command::Status(args) => status::status(&ctx, args),
        Command::FormatDate(args) => dates::format_date(&ctx, args),
        Command::Migrate(args) => migrate::migrate(&ctx, args),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
