use thiserror::Error;

use crate::models::progress::ProgramWeek;
use crate::models::user::Role;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("date arithmetic failed: {0}")]
    Date(#[from] jiff::Error),

    #[error("program week must be between 1 and 4, got {0}")]
    InvalidWeek(u8),

    #[error("unknown user: {0}")]
    UnknownUser(String),

    #[error("user already exists: {0}")]
    DuplicateUser(String),

    #[error("no users with role {0:?} in roster")]
    EmptyRole(Role),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("client {client_id}: week {week} {reason}")]
    ProgressInvariant {
        client_id: String,
        week: ProgramWeek,
        reason: &'static str,
    },

    #[error("client profile {0} must carry the CLIENT role")]
    ClientRole(String),
}
