//! TDengine exporter configuration tool.
//!
//! Loads an exporter configuration file, reports every validation problem
//! in one pass, and renders the DSN the exporter would hand to the driver.
//!
//! # Security Guarantees
//! - DSNs are printed redacted unless `--show-password` is given
//! - Passwords can be read from the terminal instead of the config file

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tdexporter_core::{
    ExporterConfig, Password, Protocol, build_dsn, build_redacted_dsn, driver_for, init_logging,
    resolve_database, validate,
};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "tdexporter")]
#[command(about = "TDengine exporter configuration tool")]
#[command(version)]
#[command(long_about = "
tdexporter - TDengine exporter configuration tool

Validates exporter configuration files and renders the DSN used to reach
TDengine:

  username[:password]@protocol(host:port)/database[?params]

SUPPORTED PROTOCOLS:
- ws   (taosWS driver)       params: read_timeout, write_timeout
- http (taosRestful driver)  params: read_buffer_size, disable_compression

EXAMPLES:
  tdexporter validate --config exporter.toml
  tdexporter dsn --config exporter.toml --database otel
  tdexporter dsn --config exporter.json --ask-password --show-password
")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a configuration file and list every violation
    Validate(ConfigArgs),
    /// Print the DSN built from a configuration file
    Dsn(DsnArgs),
    /// List supported protocols and their drivers
    Drivers,
}

#[derive(Args)]
struct ConfigArgs {
    /// Configuration file path
    #[arg(
        short,
        long,
        env = "TDEXPORTER_CONFIG",
        help = "Exporter configuration file (.toml or .json)"
    )]
    config: PathBuf,
}

#[derive(Args)]
struct DsnArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Database name override
    #[arg(
        short,
        long,
        default_value = "",
        help = "Database to target instead of the configured one"
    )]
    database: String,

    /// Prompt for the password
    #[arg(
        long,
        help = "Read the password from the terminal, overriding the file"
    )]
    ask_password: bool,

    /// Print the password in clear text
    #[arg(long, help = "Print the DSN with the password in clear text")]
    show_password: bool,
}

#[derive(Args)]
struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    verbose: u8,

    /// Suppress output
    #[arg(
        short,
        long,
        global = true,
        help = "Suppress all log output except errors"
    )]
    quiet: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)?;

    match cli.command {
        Command::Validate(args) => {
            if validate_config(&args.config)? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Dsn(args) => print_dsn(&args),
        Command::Drivers => {
            print!("{}", render_drivers());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(path: &Path) -> anyhow::Result<ExporterConfig> {
    debug!(path = %path.display(), "loading configuration");
    ExporterConfig::from_file(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Prints the validation report; returns `true` when there are no violations.
fn validate_config(path: &Path) -> anyhow::Result<bool> {
    let config = load_config(path)?;
    let violations = validate(&config.connection);

    if violations.is_empty() {
        info!("Configuration is valid");
        println!("{}: ok ({})", path.display(), config.connection);
        return Ok(true);
    }

    println!("{}: {} violation(s)", path.display(), violations.len());
    for violation in &violations {
        println!("  - {violation}");
    }
    Ok(false)
}

fn print_dsn(args: &DsnArgs) -> anyhow::Result<ExitCode> {
    let mut config = load_config(&args.config.config)?;
    config.validate()?;

    if args.ask_password {
        config.connection.password = prompt_password()?;
    }

    let dsn = render_dsn(&config, &args.database, args.show_password);
    println!("{dsn}");
    Ok(ExitCode::SUCCESS)
}

fn prompt_password() -> anyhow::Result<Password> {
    let password =
        rpassword::prompt_password("TDengine password: ").context("Failed to read password")?;
    Ok(Password::new(password))
}

/// Renders the DSN the connection factory would open, database fallback
/// included.
fn render_dsn(config: &ExporterConfig, database: &str, show_password: bool) -> String {
    let database = resolve_database(&config.connection, database);
    if show_password {
        build_dsn(&config.connection, database)
    } else {
        build_redacted_dsn(&config.connection, database)
    }
}

fn render_drivers() -> String {
    Protocol::ALL
        .iter()
        .map(|protocol| format!("{protocol:<6}{}\n", driver_for(*protocol)))
        .collect()
}
