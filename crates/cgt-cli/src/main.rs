use anyhow::Result;
use cgt_core::corporate_actions::NoopAdjuster;
use cgt_core::{Config, TradeLedger, orchestrator};
use clap::Parser;
mod commands;
use commands::{Commands, OutputFormat};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Report {
            file,
            format,
            allow_short_selling,
            truncate_quantities,
        } => {
            let ledger = TradeLedger::load(file)?;
            let config = Config {
                allow_short_selling: *allow_short_selling,
                truncate_quantities: *truncate_quantities,
                ..Config::load_with_overrides()
            };
            let results = orchestrator::run(ledger, &NoopAdjuster, config)?;

            match format {
                OutputFormat::Plain => {
                    print!("{}", cgt_formatter_plain::format(&results, &config));
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&results)?);
                }
            }
        }
    }

    Ok(())
}
