//! Error types for the homework notifier

/// Errors that can occur while polling the review API or delivering messages
#[derive(Debug, thiserror::Error)]
pub enum HomeworkBotError {
    #[error("API request failed: {0}")]
    FetchFailed(String),

    #[error("HTTP {status}: {reason}")]
    HttpError { status: u16, reason: String },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid response shape: {0}")]
    InvalidShape(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Notifier error: {0}")]
    Notifier(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for homework notifier operations
pub type Result<T> = std::result::Result<T, HomeworkBotError>;
