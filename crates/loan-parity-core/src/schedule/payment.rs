//! Payment recording and the edit/recompute loop.
//!
//! Editing an installment's actual payment never recomputes the payoff curve
//! by itself; callers run [`recompute_payoff`] once after a batch of edits.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schedule::build::{Installment, LoanSchedule};
use crate::types::Money;

// ---------------------------------------------------------------------------
// Currency text parsing
// ---------------------------------------------------------------------------

/// Parse currency-masked text into a decimal amount.
///
/// Digits-only extraction with implied two decimal places, matching the
/// masked input the UI produces: `"150050"` and `"R$ 1.500,50"` both parse
/// to `1500.50`. Text with no digits parses to zero rather than failing.
pub fn parse_currency_amount(raw: &str) -> Money {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Decimal::ZERO;
    }
    digits
        .parse::<i128>()
        .ok()
        .and_then(|cents| Decimal::try_from_i128_with_scale(cents, 2).ok())
        .unwrap_or(Decimal::ZERO)
}

// ---------------------------------------------------------------------------
// Edits
// ---------------------------------------------------------------------------

/// Record an explicit payment against one installment.
///
/// Marks the installment edited and refreshes its difference. The payoff
/// curve of later installments is stale until [`recompute_payoff`] runs.
pub fn record_payment(installment: &mut Installment, raw: &str) {
    let amount = parse_currency_amount(raw);
    installment.actual_paid = amount;
    installment.was_edited = true;
    installment.difference = amount - installment.installment_amount;
}

/// Reset an installment to the unconfirmed state: nothing paid, not edited.
pub fn clear_payment(installment: &mut Installment) {
    installment.actual_paid = Decimal::ZERO;
    installment.was_edited = false;
    installment.difference = -installment.installment_amount;
}

// ---------------------------------------------------------------------------
// Recomputation
// ---------------------------------------------------------------------------

/// Recompute every installment's payoff balance from the current payments.
///
/// `payoff_balance(i) = investment_value(i) - sum of actual_paid over j < i`,
/// so installment k only ever depends on earlier installments. Idempotent.
pub fn recompute_payoff(schedule: &mut LoanSchedule) {
    let mut prior_paid = Decimal::ZERO;
    for installment in &mut schedule.installments {
        installment.payoff_balance = installment.investment_value - prior_paid;
        prior_paid += installment.actual_paid;
    }
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

/// Aggregates over a schedule.
///
/// Interest and principal sum over every installment; paid and difference
/// sum over confirmed installments only. An unconfirmed installment is
/// absent from the paid aggregates, not a zero contribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTotals {
    pub interest_total: Money,
    pub principal_total: Money,
    pub paid_total: Money,
    pub difference_total: Money,
}

pub fn compute_totals(schedule: &LoanSchedule) -> ScheduleTotals {
    let mut totals = ScheduleTotals::default();
    for installment in &schedule.installments {
        totals.interest_total += installment.interest_portion;
        totals.principal_total += installment.principal_portion;
        if installment.was_edited {
            totals.paid_total += installment.actual_paid;
            totals.difference_total += installment.difference;
        }
    }
    totals
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
