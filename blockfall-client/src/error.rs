//! Error types for blockfall-client
//!
//! Defines client-specific error types using thiserror for clear error
//! propagation.

use thiserror::Error;

/// Main error type for the blockfall client
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Audio decoding errors
    #[error("Audio decode error: {0}")]
    Decode(String),

    /// Sample-rate conversion errors
    #[error("Resample error: {0}")]
    Resample(String),

    /// Audio output device errors
    #[error("Audio output error: {0}")]
    AudioOutput(String),

    /// Live-connection transport errors
    #[error("Connection error: {0}")]
    Connection(#[from] reqwest::Error),

    /// Session handshake errors (CSRF token fetch)
    #[error("Session error: {0}")]
    Session(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the shared crate
    #[error(transparent)]
    Common(#[from] blockfall_common::Error),
}

/// Convenience Result type using blockfall-client Error
pub type Result<T> = std::result::Result<T, Error>;
