use thiserror::Error;

/// Rejection of a change request or placement before it leaves the client.
///
/// Always recoverable: the caller shows the message inline and lets the user
/// correct the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("schedules cover {combined}% of the week, expected 100%")]
    InvalidSplit { combined: u16 },

    #[error("days assigned to both kindergartens: {0:?}")]
    ConflictingDays(Vec<crate::schedule::Weekday>),

    #[error("reason must be longer than {min} characters (got {actual})")]
    ReasonTooShort { min: usize, actual: usize },

    #[error("primary and secondary kindergarten must differ")]
    SameKindergarten,

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("policy file not found: {0}")]
    NotFound(std::path::PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid policy: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown weekday: {0:?}")]
    UnknownWeekday(String),

    #[error("invalid schedule pattern {0:?} (expected e.g. \"MT--F\" or \"mon,tue,fri\")")]
    InvalidPattern(String),
}
