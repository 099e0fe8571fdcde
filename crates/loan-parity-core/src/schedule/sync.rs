//! Merging externally persisted payments and tallying batch saves.
//!
//! The backend stores one record per installment with a nullable amount:
//! `null` means the installment was never confirmed, a number (including 0)
//! means an administrator confirmed that amount. In memory the two states
//! are an explicit tagged value, never a nullable number.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schedule::build::LoanSchedule;
use crate::types::Money;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Confirmation state of one installment's payment.
///
/// Serializes as the REST wire's nullable number: `null` for `Unset`, the
/// amount for `Confirmed`. A stored zero is a confirmed zero payment and is
/// distinct from `Unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Money>", into = "Option<Money>")]
pub enum PaymentValue {
    Unset,
    Confirmed(Money),
}

impl Default for PaymentValue {
    fn default() -> Self {
        PaymentValue::Unset
    }
}

impl From<Option<Money>> for PaymentValue {
    fn from(value: Option<Money>) -> Self {
        match value {
            Some(amount) => PaymentValue::Confirmed(amount),
            None => PaymentValue::Unset,
        }
    }
}

impl From<PaymentValue> for Option<Money> {
    fn from(value: PaymentValue) -> Self {
        match value {
            PaymentValue::Confirmed(amount) => Some(amount),
            PaymentValue::Unset => None,
        }
    }
}

/// One persisted payment, as exchanged with `GET/PUT /pagamentos/...`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub installment_number: u32,
    #[serde(default)]
    pub actual_paid: PaymentValue,
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Merge backend payment records into a schedule, best effort.
///
/// `Confirmed` overwrites the installment's payment and marks it edited;
/// `Unset` resets it to zero/unconfirmed. Records for unknown installment
/// numbers are skipped and installments without a record keep their current
/// state. Returns the number of records applied. The payoff curve is stale
/// afterwards; run [`recompute_payoff`](crate::schedule::recompute_payoff)
/// once after the whole batch.
pub fn apply_payment_records(schedule: &mut LoanSchedule, records: &[PaymentRecord]) -> usize {
    let mut applied = 0;
    for record in records {
        if let Some(installment) = schedule
            .installments
            .iter_mut()
            .find(|p| p.number == record.installment_number)
        {
            match record.actual_paid {
                PaymentValue::Confirmed(amount) => {
                    installment.actual_paid = amount;
                    installment.was_edited = true;
                }
                PaymentValue::Unset => {
                    installment.actual_paid = Decimal::ZERO;
                    installment.was_edited = false;
                }
            }
            installment.difference = installment.actual_paid - installment.installment_amount;
            applied += 1;
        }
    }
    applied
}

/// Build the per-installment save payload for a schedule: the confirmed
/// amount for edited installments, `Unset` for everything else.
pub fn outgoing_records(schedule: &LoanSchedule) -> Vec<PaymentRecord> {
    schedule
        .installments
        .iter()
        .map(|installment| PaymentRecord {
            installment_number: installment.number,
            actual_paid: if installment.was_edited {
                PaymentValue::Confirmed(installment.actual_paid)
            } else {
                PaymentValue::Unset
            },
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Batch save report
// ---------------------------------------------------------------------------

/// Result of persisting one installment's record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveOutcome {
    pub installment_number: u32,
    pub saved: bool,
}

/// Tally of a whole save batch. Saves are independent per installment, so a
/// batch can partially fail; the report carries the failures instead of
/// dropping them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub saved: u32,
    pub failed: u32,
    pub failed_installments: Vec<u32>,
}

impl SyncReport {
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = SaveOutcome>) -> Self {
        let mut report = SyncReport::default();
        for outcome in outcomes {
            if outcome.saved {
                report.saved += 1;
            } else {
                report.failed += 1;
                report.failed_installments.push(outcome.installment_number);
            }
        }
        report
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
