use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanParityError {
    #[error("Invalid loan parameters: {field}: {reason}")]
    InvalidLoanParameters { field: String, reason: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanParityError {
    fn from(e: serde_json::Error) -> Self {
        LoanParityError::SerializationError(e.to_string())
    }
}
