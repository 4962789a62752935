//! Command-line interface for fsaudit
//!
//! Uses clap for argument parsing. With no subcommand the interactive
//! prompt loop starts.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

pub use commands::interactive::Session;
pub use commands::scan::ScanArgs;
pub use output::Output;

use crate::config::AuditConfig;

/// fsaudit - parallel directory auditor for file types, sizes, and permissions
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write log output to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true, env = "FSAUDIT_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze one directory and print the report
    Scan(ScanArgs),
    /// Prompt for directories and thresholds until told to exit
    Interactive,
    /// Show the effective configuration
    Config,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = AuditConfig::load_with_custom_config(self.config.as_deref())?;

        let log_file = self.log_file.or_else(|| config.logging.file.clone());
        setup_logging(self.verbose, self.quiet, log_file.as_deref())?;

        let output = Output::new(self.verbose > 0, self.quiet);

        match self.command {
            Some(Commands::Scan(args)) => commands::scan::execute(args, &config, &output),
            Some(Commands::Config) => commands::config::execute(&config),
            Some(Commands::Interactive) | None => commands::interactive::execute(&config),
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    if quiet && log_file.is_none() {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info,ignore=warn"),
        2 => EnvFilter::new("debug,ignore=warn"),
        _ => EnvFilter::new("trace"), // -vvv shows everything including the walker
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|err| anyhow::anyhow!("Failed to initialise logging: {err}"))
}
