mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::payments::{RecordArgs, TrackArgs};
use commands::schedule::ScheduleArgs;

/// Loan repayment tracking against an investment parity curve
#[derive(Parser)]
#[command(
    name = "lpt",
    version,
    about = "Loan repayment tracking against an investment parity curve",
    long_about = "Builds flat installment schedules over a compounding benchmark \
                  investment, merges persisted payments, and reports payoff and \
                  deviation figures with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the installment schedule for a loan
    Schedule(ScheduleArgs),
    /// Merge persisted payments into a schedule and recompute payoff
    Track(TrackArgs),
    /// Record a single payment edit and recompute
    Record(RecordArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Track(args) => commands::payments::run_track(args),
        Commands::Record(args) => commands::payments::run_record(args),
        Commands::Version => {
            println!("lpt {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
