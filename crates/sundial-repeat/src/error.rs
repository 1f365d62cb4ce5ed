use thiserror::Error;

/// Recurrence engine errors. Both kinds are user-input errors: callers
/// surface the message and never retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepeatError {
    #[error("Invalid repeat rule: {0}")]
    InvalidRule(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

pub type RepeatResult<T> = std::result::Result<T, RepeatError>;
