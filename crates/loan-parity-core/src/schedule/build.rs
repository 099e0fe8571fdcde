//! Installment schedule construction from a compound-interest parity curve.
//!
//! The schedule amortizes the *compounded future value* of the principal, not
//! the principal itself: every installment is equal, and the interest portion
//! of period `i` is the benchmark investment's incremental yield for that
//! period. All math uses `rust_decimal::Decimal`.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanParityError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::LoanParityResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Residual above which rounding drift is absorbed into the final installment.
const DRIFT_TOLERANCE: Decimal = dec!(0.01);

/// Outstanding balances below this are reported as fully amortized.
const BALANCE_EPSILON: Decimal = dec!(0.01);

/// Every due date is pinned to the 10th of its month.
const DUE_DAY: u32 = 10;

// ---------------------------------------------------------------------------
// Input / Output Types
// ---------------------------------------------------------------------------

/// Parameters for building a loan schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount financed.
    pub principal: Money,
    /// Benchmark rate per period as a percentage (1.385 = 1.385% per month).
    pub monthly_rate_pct: Rate,
    /// Number of installments.
    pub term_count: u32,
    /// Due date of installment 1. The day of month is re-pinned to the 10th.
    pub first_due_date: NaiveDate,
}

/// A single installment period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based position, contiguous.
    pub number: u32,
    pub due_date: NaiveDate,
    /// Incremental investment growth this period.
    pub monthly_yield: Money,
    /// Investment growth since period 0.
    pub cumulative_yield: Money,
    /// Compounded investment balance at this period: principal * (1+r)^number.
    pub investment_value: Money,
    /// Flat payment due. Equals the plan-level amount except possibly on the
    /// final installment, which absorbs rounding drift.
    pub installment_amount: Money,
    /// Equal to `monthly_yield`; interest is the parity curve's yield, not
    /// interest on a declining balance.
    pub interest_portion: Money,
    pub principal_portion: Money,
    /// Amount actually paid. Defaults to the scheduled amount at creation;
    /// 0 when unset or cleared.
    pub actual_paid: Money,
    /// True only once an explicit value has been assigned (user edit or
    /// backend-confirmed). False means "not yet confirmed".
    pub was_edited: bool,
    pub difference: Money,
    /// Early-termination payoff: investment value at this period minus all
    /// actual payments on earlier installments.
    pub payoff_balance: Money,
    /// Total investment value minus cumulative scheduled amounts, floored at 0.
    pub outstanding_balance: Money,
}

/// A full loan schedule with its parity-curve aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSchedule {
    pub principal: Money,
    pub monthly_rate_pct: Rate,
    pub term_count: u32,
    pub first_due_date: NaiveDate,
    /// Flat amount per installment: total_investment_value / term_count.
    pub installment_amount: Money,
    /// principal * (1+r)^term_count.
    pub total_investment_value: Money,
    /// total_investment_value - principal.
    pub total_yield: Money,
    /// Ordered by `number` ascending, length = term_count.
    pub installments: Vec<Installment>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the installment schedule for a loan tracked against a compounding
/// benchmark investment.
///
/// The flat installment amount divides the compounded future value evenly, so
/// the sum of all installments equals the total investment value to the cent.
/// Sub-cent drift from rounding the flat amount is absorbed into the final
/// installment.
pub fn build_schedule(input: &LoanInput) -> LoanParityResult<ComputationOutput<LoanSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_loan_input(input)?;

    let rate = input.monthly_rate_pct / dec!(100);
    let growth = Decimal::ONE + rate;
    let term = input.term_count;

    let total_investment_value = round_currency(input.principal * growth.powi(i64::from(term)));
    let total_yield = total_investment_value - input.principal;
    let installment_amount = round_currency(total_investment_value / Decimal::from(term));

    if rate.is_zero() {
        warnings.push(
            "Monthly rate is zero; the parity curve is flat and every interest portion is zero"
                .to_string(),
        );
    }

    let mut installments: Vec<Installment> = Vec::with_capacity(term as usize);
    let mut running_balance = total_investment_value;
    let mut scheduled_total = Decimal::ZERO;
    let mut prior_actual_paid = Decimal::ZERO;
    let mut previous_value = input.principal;

    for number in 1..=term {
        let due_date = due_date_for_period(input.first_due_date, number)?;

        let investment_value = round_currency(input.principal * growth.powi(i64::from(number)));
        let monthly_yield = investment_value - previous_value;
        let cumulative_yield = investment_value - input.principal;

        let interest_portion = monthly_yield;
        let principal_portion = installment_amount - interest_portion;

        // Pre-edit default: the scheduled amount counts as paid.
        let actual_paid = installment_amount;
        let payoff_balance = investment_value - prior_actual_paid;

        running_balance -= installment_amount;
        let outstanding_balance = floor_balance(running_balance);

        installments.push(Installment {
            number,
            due_date,
            monthly_yield,
            cumulative_yield,
            investment_value,
            installment_amount,
            interest_portion,
            principal_portion,
            actual_paid,
            was_edited: false,
            difference: Decimal::ZERO,
            payoff_balance,
            outstanding_balance,
        });

        scheduled_total += installment_amount;
        prior_actual_paid += actual_paid;
        previous_value = investment_value;
    }

    // Rounding reconciliation: the flat amount is rounded to cents, so the
    // schedule can drift from the compounded total by up to term/2 cents.
    let drift = total_investment_value - scheduled_total;
    if drift.abs() > DRIFT_TOLERANCE {
        if let Some(last) = installments.last_mut() {
            let prior_paid = prior_actual_paid - last.actual_paid;
            last.installment_amount += drift;
            last.principal_portion += drift;
            last.actual_paid += drift;
            last.difference = last.actual_paid - last.installment_amount;
            last.payoff_balance = last.investment_value - prior_paid;
            last.outstanding_balance = Decimal::ZERO;
            warnings.push(format!(
                "Rounding drift of {} absorbed into installment {}",
                drift, term
            ));
        }
    }

    // Re-derive outstanding balances over the adjusted amounts.
    let mut remaining = total_investment_value;
    for installment in &mut installments {
        remaining -= installment.installment_amount;
        installment.outstanding_balance = floor_balance(remaining);
    }

    let schedule = LoanSchedule {
        principal: input.principal,
        monthly_rate_pct: input.monthly_rate_pct,
        term_count: input.term_count,
        first_due_date: input.first_due_date,
        installment_amount,
        total_investment_value,
        total_yield,
        installments,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Investment-parity flat amortization: equal installments over the compounded \
         future value, interest defined as the parity curve's periodic yield",
        input,
        warnings,
        elapsed,
        schedule,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_loan_input(input: &LoanInput) -> LoanParityResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(LoanParityError::InvalidLoanParameters {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if input.term_count == 0 {
        return Err(LoanParityError::InvalidLoanParameters {
            field: "term_count".into(),
            reason: "Term count must be at least 1".into(),
        });
    }
    if input.monthly_rate_pct < Decimal::ZERO {
        return Err(LoanParityError::InvalidLoanParameters {
            field: "monthly_rate_pct".into(),
            reason: "Monthly rate cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Due date of period `number`: first due date advanced by (number-1) months,
/// day pinned to the 10th. Every calendar month has a 10th, so the pin cannot
/// fail; month arithmetic can still leave chrono's representable range.
fn due_date_for_period(first_due_date: NaiveDate, number: u32) -> LoanParityResult<NaiveDate> {
    first_due_date
        .checked_add_months(Months::new(number - 1))
        .and_then(|date| date.with_day(DUE_DAY))
        .ok_or_else(|| {
            LoanParityError::DateError(format!(
                "Due date for installment {} is out of range (first due {})",
                number, first_due_date
            ))
        })
}

fn round_currency(value: Decimal) -> Money {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn floor_balance(value: Decimal) -> Money {
    if value < BALANCE_EPSILON {
        Decimal::ZERO
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// Helper: a 24-month loan benchmarked at 120% of CDI.
    fn reference_loan() -> LoanInput {
        LoanInput {
            principal: dec!(31400),
            monthly_rate_pct: dec!(1.385),
            term_count: 24,
            first_due_date: NaiveDate::from_ymd_opt(2025, 10, 10).unwrap(),
        }
    }

    fn build(input: &LoanInput) -> LoanSchedule {
        build_schedule(input).unwrap().result
    }

    // -----------------------------------------------------------------------
    // 1. Parameter validation
    // -----------------------------------------------------------------------
    #[test]
    fn test_rejects_non_positive_principal() {
        let mut input = reference_loan();
        input.principal = Decimal::ZERO;
        let err = build_schedule(&input).unwrap_err();
        assert!(matches!(
            err,
            LoanParityError::InvalidLoanParameters { ref field, .. } if field == "principal"
        ));
    }

    #[test]
    fn test_rejects_zero_term() {
        let mut input = reference_loan();
        input.term_count = 0;
        let err = build_schedule(&input).unwrap_err();
        assert!(matches!(
            err,
            LoanParityError::InvalidLoanParameters { ref field, .. } if field == "term_count"
        ));
    }

    #[test]
    fn test_rejects_negative_rate() {
        let mut input = reference_loan();
        input.monthly_rate_pct = dec!(-0.5);
        assert!(build_schedule(&input).is_err());
    }

    // -----------------------------------------------------------------------
    // 2. Parity curve values
    // -----------------------------------------------------------------------
    #[test]
    fn test_first_period_investment_value() {
        let schedule = build(&reference_loan());
        let first = &schedule.installments[0];

        // 31400 * 1.01385 = 31834.89
        assert_eq!(first.investment_value, dec!(31834.89));
        assert_eq!(first.monthly_yield, dec!(434.89));
        assert_eq!(first.cumulative_yield, dec!(434.89));
        assert_eq!(first.interest_portion, first.monthly_yield);
    }

    #[test]
    fn test_total_investment_value_compounds_over_full_term() {
        let schedule = build(&reference_loan());
        let expected = round_currency(dec!(31400) * dec!(1.01385).powi(24));
        assert_eq!(schedule.total_investment_value, expected);
        assert_eq!(
            schedule.total_yield,
            schedule.total_investment_value - dec!(31400)
        );
    }

    #[test]
    fn test_monthly_yields_sum_to_cumulative() {
        let schedule = build(&reference_loan());
        let mut acc = Decimal::ZERO;
        for installment in &schedule.installments {
            acc += installment.monthly_yield;
            assert_eq!(installment.cumulative_yield, acc);
        }
    }

    // -----------------------------------------------------------------------
    // 3. Rounding reconciliation
    // -----------------------------------------------------------------------
    #[test]
    fn test_installments_sum_exactly_to_total() {
        let schedule = build(&reference_loan());
        let sum: Decimal = schedule
            .installments
            .iter()
            .map(|p| p.installment_amount)
            .sum();
        assert_eq!(sum, schedule.total_investment_value);
    }

    #[test]
    fn test_drift_lands_on_final_installment_only() {
        let schedule = build(&reference_loan());
        let flat = schedule.installment_amount;
        for installment in &schedule.installments[..schedule.installments.len() - 1] {
            assert_eq!(installment.installment_amount, flat);
        }
        let last = schedule.installments.last().unwrap();
        let drift = last.installment_amount - flat;
        assert!(drift.abs() <= dec!(0.13), "unexpected drift {}", drift);
        assert_eq!(last.difference, Decimal::ZERO);
        assert_eq!(last.outstanding_balance, Decimal::ZERO);
    }

    // -----------------------------------------------------------------------
    // 4. Balances
    // -----------------------------------------------------------------------
    #[test]
    fn test_outstanding_balance_monotone_and_non_negative() {
        let schedule = build(&reference_loan());
        let mut previous = schedule.total_investment_value;
        for installment in &schedule.installments {
            assert!(installment.outstanding_balance <= previous);
            assert!(installment.outstanding_balance >= Decimal::ZERO);
            previous = installment.outstanding_balance;
        }
        assert_eq!(previous, Decimal::ZERO);
    }

    #[test]
    fn test_initial_payoff_uses_prior_scheduled_amounts() {
        let schedule = build(&reference_loan());
        // Installment 1 has no prior payments: payoff equals its parity value.
        assert_eq!(
            schedule.installments[0].payoff_balance,
            schedule.installments[0].investment_value
        );
        // Installment 2 nets out one scheduled payment.
        assert_eq!(
            schedule.installments[1].payoff_balance,
            schedule.installments[1].investment_value - schedule.installment_amount
        );
    }

    // -----------------------------------------------------------------------
    // 5. Due dates
    // -----------------------------------------------------------------------
    #[test]
    fn test_due_dates_advance_monthly_pinned_to_day_10() {
        let schedule = build(&reference_loan());
        assert_eq!(
            schedule.installments[0].due_date,
            NaiveDate::from_ymd_opt(2025, 10, 10).unwrap()
        );
        // Installment 13 is 12 months after the first due date.
        assert_eq!(
            schedule.installments[12].due_date,
            NaiveDate::from_ymd_opt(2026, 10, 10).unwrap()
        );
        assert_eq!(
            schedule.installments[23].due_date,
            NaiveDate::from_ymd_opt(2027, 9, 10).unwrap()
        );
    }

    #[test]
    fn test_due_day_pinned_even_when_first_due_is_not_the_10th() {
        let input = LoanInput {
            first_due_date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            term_count: 3,
            ..reference_loan()
        };
        let schedule = build(&input);
        for (i, installment) in schedule.installments.iter().enumerate() {
            assert_eq!(installment.due_date.day(), 10);
            assert_eq!(installment.due_date.month(), 1 + i as u32);
        }
    }

    // -----------------------------------------------------------------------
    // 6. Zero-rate edge
    // -----------------------------------------------------------------------
    #[test]
    fn test_zero_rate_amortizes_principal_only() {
        let input = LoanInput {
            principal: dec!(1200),
            monthly_rate_pct: Decimal::ZERO,
            term_count: 12,
            first_due_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        };
        let output = build_schedule(&input).unwrap();
        let schedule = &output.result;

        assert_eq!(schedule.total_investment_value, dec!(1200));
        assert_eq!(schedule.total_yield, Decimal::ZERO);
        assert_eq!(schedule.installment_amount, dec!(100));
        for installment in &schedule.installments {
            assert_eq!(installment.interest_portion, Decimal::ZERO);
            assert_eq!(installment.principal_portion, dec!(100));
        }
        assert!(!output.warnings.is_empty());
    }

    // -----------------------------------------------------------------------
    // 7. Single-installment term
    // -----------------------------------------------------------------------
    #[test]
    fn test_single_installment_term() {
        let input = LoanInput {
            principal: dec!(1000),
            monthly_rate_pct: dec!(2),
            term_count: 1,
            first_due_date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
        };
        let schedule = build(&input);
        assert_eq!(schedule.installments.len(), 1);
        let only = &schedule.installments[0];
        assert_eq!(only.installment_amount, dec!(1020));
        assert_eq!(only.interest_portion, dec!(20));
        assert_eq!(only.principal_portion, dec!(1000));
        assert_eq!(only.outstanding_balance, Decimal::ZERO);
    }
}
