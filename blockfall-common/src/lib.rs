//! # Blockfall Common Library
//!
//! Shared code for the Blockfall client:
//! - Event vocabulary (LiveEvent enum) and wire mapping
//! - Configuration file loading and defaults
//! - Common error types

pub mod config;
pub mod error;
pub mod events;

pub use error::{Error, Result};
pub use events::LiveEvent;
