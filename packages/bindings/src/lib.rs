use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use loan_parity_core::schedule::{self, LoanInput, PaymentRecord};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Loan parameters plus the persisted payments to merge into the schedule.
#[derive(Debug, Deserialize)]
struct TrackInput {
    loan: LoanInput,
    #[serde(default)]
    payments: Vec<PaymentRecord>,
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let input: LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = schedule::build_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

#[napi]
pub fn track_payments(input_json: String) -> NapiResult<String> {
    let input: TrackInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let mut output = schedule::build_schedule(&input.loan).map_err(to_napi_error)?;

    let applied = schedule::apply_payment_records(&mut output.result, &input.payments);
    schedule::recompute_payoff(&mut output.result);
    let totals = schedule::compute_totals(&output.result);

    serde_json::to_string(&serde_json::json!({
        "schedule": output.result,
        "totals": totals,
        "applied_payments": applied,
        "warnings": output.warnings,
    }))
    .map_err(to_napi_error)
}

#[napi]
pub fn loan_totals(input_json: String) -> NapiResult<String> {
    let input: TrackInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let mut output = schedule::build_schedule(&input.loan).map_err(to_napi_error)?;

    schedule::apply_payment_records(&mut output.result, &input.payments);
    schedule::recompute_payoff(&mut output.result);
    let totals = schedule::compute_totals(&output.result);

    serde_json::to_string(&totals).map_err(to_napi_error)
}
