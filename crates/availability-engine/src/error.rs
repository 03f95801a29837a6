//! Error types for availability queries.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("End date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("Date range spans {days} days, maximum is {max}")]
    RangeTooLong { days: i64, max: i64 },

    #[error("Unknown query intent: {0}")]
    UnknownIntent(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid calendar snapshot: {0}")]
    InvalidSnapshot(String),
}

impl EngineError {
    /// Whether the error came from validating the query's range or intent,
    /// as opposed to decoding an input document.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidDate(_)
                | EngineError::EndBeforeStart { .. }
                | EngineError::RangeTooLong { .. }
                | EngineError::UnknownIntent(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
