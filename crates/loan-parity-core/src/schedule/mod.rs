pub mod build;
pub mod payment;
pub mod sync;

pub use build::{build_schedule, Installment, LoanInput, LoanSchedule};
pub use payment::{
    clear_payment, compute_totals, parse_currency_amount, recompute_payoff, record_payment,
    ScheduleTotals,
};
pub use sync::{
    apply_payment_records, outgoing_records, PaymentRecord, PaymentValue, SaveOutcome, SyncReport,
};
