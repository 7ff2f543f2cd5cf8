//! Common error types for Blockfall

use thiserror::Error;

/// Common result type for Blockfall operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the client crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Known event arrived with a payload that does not decode
    #[error("Malformed payload for event '{event}': {source}")]
    EventPayload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}
