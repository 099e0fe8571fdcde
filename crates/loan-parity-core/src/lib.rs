pub mod error;
pub mod locale;
pub mod schedule;
pub mod types;

pub use error::LoanParityError;
pub use types::*;

/// Standard result type for all loan-parity operations
pub type LoanParityResult<T> = Result<T, LoanParityError>;
