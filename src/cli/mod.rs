use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mztab_m::error::ErrorLevel;

mod config;
mod info;
mod validate;

/// mzTab-M document reader and validator
#[derive(Parser)]
#[command(name = "mztab-validate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an mzTab-M document and print the error report
    Validate {
        /// Input mzTab-M file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Minimum level of reported errors (info, warn, error)
        #[arg(short = 'l', long)]
        level: Option<ErrorLevel>,

        /// Stop after this many reported errors
        #[arg(short = 'm', long)]
        max_errors: Option<usize>,

        /// Load error settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Display a summary of an mzTab-M document
    Info {
        /// Input mzTab-M file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the summary and the full metadata as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Validate {
            file,
            level,
            max_errors,
            config,
        } => validate::run(file, level, max_errors, config),
        Commands::Info { file, json } => info::run(file, json),
    }
}
