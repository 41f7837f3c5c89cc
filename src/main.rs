//! # mzTab-M Validator
//!
//! Command-line front end for the `mztab_m` library.
//!
//! ## Usage
//!
//! ```bash
//! # Validate a document, reporting warnings too
//! mztab-validate validate study.mztab --level warn
//!
//! # Summarize a document's metadata and tables
//! mztab-validate info study.mztab --json
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
