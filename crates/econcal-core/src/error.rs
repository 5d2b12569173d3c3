use thiserror::Error;

/// Validation and contract errors exposed by `econcal-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("date must be a calendar date in YYYY-MM-DD form: '{value}'")]
    InvalidDate { value: String },
    #[error("time must be a clock time in HH:MM form: '{value}'")]
    InvalidTime { value: String },

    #[error("importance tier must be one of 5, 3, 2: {value}")]
    InvalidImportance { value: u8 },

    #[error("release name cannot be empty")]
    EmptyReleaseName,

    #[error("invalid range preset '{value}', expected one of thisweek, nextweek, month, next30")]
    InvalidPreset { value: String },
    #[error("window end {end} precedes start {start}")]
    InvalidWindow { start: String, end: String },

    #[error("invalid proxy '{value}', expected one of local, corsproxy, allorigins-get, allorigins-raw")]
    InvalidProxy { value: String },
    #[error("api key cannot be empty")]
    EmptyApiKey,

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("proxy_chain must contain at least one proxy")]
    EmptyProxyChain,

    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
