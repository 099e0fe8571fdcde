use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_parity_core::schedule::{self, LoanInput};

use crate::input;

/// Arguments for schedule construction
#[derive(Args)]
pub struct ScheduleArgs {
    /// Amount financed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Benchmark rate per month as a percentage (e.g. 1.385)
    #[arg(long, alias = "rate")]
    pub monthly_rate: Option<Decimal>,

    /// Number of installments
    #[arg(long)]
    pub term_count: Option<u32>,

    /// Due date of installment 1 (YYYY-MM-DD); the day is pinned to the 10th
    #[arg(long)]
    pub first_due_date: Option<NaiveDate>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Resolve loan parameters from a JSON file, piped stdin, or flags.
pub fn loan_input_from(args: &ScheduleArgs) -> Result<LoanInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Ok(LoanInput {
        principal: args
            .principal
            .ok_or("--principal is required (or provide --input)")?,
        monthly_rate_pct: args
            .monthly_rate
            .ok_or("--monthly-rate is required (or provide --input)")?,
        term_count: args
            .term_count
            .ok_or("--term-count is required (or provide --input)")?,
        first_due_date: args
            .first_due_date
            .ok_or("--first-due-date is required (or provide --input)")?,
    })
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = loan_input_from(&args)?;
    let result = schedule::build_schedule(&loan)?;
    Ok(serde_json::to_value(result)?)
}
