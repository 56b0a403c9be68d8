//! I/O adapter errors.

use thiserror::Error;

pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// Failure while exchanging tabular data with a collaborator.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A row parsed as CSV but violated the contract. The message carries
    /// the 1-based line number so the offending row can be found upstream.
    #[error("invalid row at line {line}: {message}")]
    InvalidRow { line: usize, message: String },
}

impl ExchangeError {
    pub fn invalid_row(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidRow {
            line,
            message: message.into(),
        }
    }
}
