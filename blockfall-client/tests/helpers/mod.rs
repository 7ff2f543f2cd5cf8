//! Test helper modules for Blockfall client integration tests
//!
//! Provides reusable test infrastructure components:
//! - StubServer: in-process game server with a programmatic push side
//! - fixtures: deterministic WAV generation for clip-loading tests

pub mod fixtures;
pub mod stub_server;

// Re-export commonly used items
pub use fixtures::write_sine_wav;
pub use stub_server::{next_event, wait_for, StubServer, TEST_CSRF_TOKEN};
