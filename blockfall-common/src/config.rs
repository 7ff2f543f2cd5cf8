//! Configuration file loading and built-in defaults
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Built-in default (fallback)
//!
//! Layers 1 and 2 live in the client's clap definitions; this module provides
//! layer 3 (the file) and layer 4 (the defaults).

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

/// Default game server base URL
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:4000";

/// Default directory holding the sound-effect clips
pub const DEFAULT_SOUNDS_DIR: &str = "sounds";

/// Default wait between live-connection attempts, in milliseconds
pub const DEFAULT_POLL_FALLBACK_MS: u64 = 2500;

/// Default master volume (0.0 = silent, 1.0 = full)
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Settings read from `config.toml`. Every field is optional; anything absent
/// falls through to the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: Option<String>,
    pub sounds_dir: Option<PathBuf>,
    pub poll_fallback_ms: Option<u64>,
    pub audio_device: Option<String>,
    pub volume: Option<f32>,
}

impl FileConfig {
    /// Load from the platform config path. A missing file yields an empty
    /// config; a file that exists but does not parse is an error.
    pub fn load() -> Result<FileConfig> {
        let Some(path) = config_file_path() else {
            debug!("No config file found, using defaults");
            return Ok(FileConfig::default());
        };
        debug!("Loading config file: {}", path.display());
        let text = std::fs::read_to_string(&path)?;
        FileConfig::parse(&text).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Parse config file contents
    pub fn parse(text: &str) -> Result<FileConfig> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }
}

/// Find the config file for this platform, if one exists.
///
/// Linux checks `~/.config/blockfall/config.toml` first, then the system-wide
/// `/etc/blockfall/config.toml`. Other platforms use the user config dir only.
pub fn config_file_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("blockfall").join("config.toml"));

    if let Some(path) = &user_config {
        if path.exists() {
            return user_config;
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/blockfall/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}
