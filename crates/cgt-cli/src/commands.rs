use clap::{Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Load a trade history CSV and print the per-FY tax-optimal result.
    Report {
        /// Input CSV path.
        file: PathBuf,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,

        /// Allow short selling instead of failing the run when a
        /// symbol-year has insufficient BUY coverage.
        #[arg(long)]
        allow_short_selling: bool,

        /// Truncate matched quantities to an integer at the presentation
        /// boundary (legacy behaviour; see the design notes on integer
        /// truncation).
        #[arg(long)]
        truncate_quantities: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}
