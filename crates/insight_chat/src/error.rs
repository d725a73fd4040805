//! Error types for the conversation core.

use thiserror::Error;

/// Result type alias for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// Errors that can occur while driving a conversation.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Assistant has been disposed")]
    Disposed,

    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    #[error("Quick suggestion not found: {0}")]
    SuggestionNotFound(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
