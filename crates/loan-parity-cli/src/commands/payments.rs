use clap::Args;
use serde_json::Value;

use loan_parity_core::schedule::{self, PaymentRecord};

use crate::input;

use super::schedule::{loan_input_from, ScheduleArgs};

/// Arguments for merging persisted payments into a schedule
#[derive(Args)]
pub struct TrackArgs {
    #[command(flatten)]
    pub loan: ScheduleArgs,

    /// Path to a JSON array of payment records
    /// ([{"installmentNumber": 1, "actualPaid": "1550.00"|null}, ...])
    #[arg(long)]
    pub payments: Option<String>,
}

/// Arguments for recording one payment edit
#[derive(Args)]
pub struct RecordArgs {
    #[command(flatten)]
    pub track: TrackArgs,

    /// Installment number to edit
    #[arg(long)]
    pub number: u32,

    /// Payment amount as currency-masked text (e.g. "150050" or "R$ 1.500,50")
    #[arg(long)]
    pub amount: String,
}

pub fn run_track(args: TrackArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = loan_input_from(&args.loan)?;
    let mut built = schedule::build_schedule(&loan)?;

    let mut applied = 0;
    if let Some(ref path) = args.payments {
        let records: Vec<PaymentRecord> = input::file::read_json(path)?;
        applied = schedule::apply_payment_records(&mut built.result, &records);
        schedule::recompute_payoff(&mut built.result);
    }

    let totals = schedule::compute_totals(&built.result);
    Ok(serde_json::json!({
        "schedule": built.result,
        "totals": totals,
        "applied_payments": applied,
        "warnings": built.warnings,
        "metadata": built.metadata,
    }))
}

pub fn run_record(args: RecordArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = loan_input_from(&args.track.loan)?;
    let mut built = schedule::build_schedule(&loan)?;
    let plan = &mut built.result;

    if let Some(ref path) = args.track.payments {
        let records: Vec<PaymentRecord> = input::file::read_json(path)?;
        schedule::apply_payment_records(plan, &records);
    }

    match plan
        .installments
        .iter_mut()
        .find(|p| p.number == args.number)
    {
        Some(installment) => schedule::record_payment(installment, &args.amount),
        None => {
            return Err(format!(
                "Installment {} does not exist (term is {})",
                args.number, plan.term_count
            )
            .into())
        }
    }
    schedule::recompute_payoff(plan);

    let totals = schedule::compute_totals(plan);
    let edited = plan
        .installments
        .iter()
        .find(|p| p.number == args.number)
        .cloned();
    Ok(serde_json::json!({
        "installment": edited,
        "totals": totals,
        "schedule": plan,
        "warnings": built.warnings,
    }))
}
