use thiserror::Error;

use crate::scoring::ValidationError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("instrument '{0}' has no questions")]
    EmptyInstrument(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("assessment already completed")]
    AlreadyCompleted,

    #[error("results submission failed: {0}")]
    Submission(String),
}
