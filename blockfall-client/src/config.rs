//! Client configuration
//!
//! Command-line definitions plus the resolved settings bundle. Each setting
//! resolves CLI flag first, then environment variable (clap's env fallback),
//! then the config file, then the built-in default.

use blockfall_common::config::{self, FileConfig};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Command-line arguments for blockfall-client
#[derive(Parser, Debug, Default)]
#[command(name = "blockfall-client")]
#[command(about = "Sound effects and loading feedback for the Blockfall server")]
#[command(version)]
pub struct Args {
    /// Game server base URL
    #[arg(short, long, env = "BLOCKFALL_SERVER")]
    pub server: Option<String>,

    /// Directory containing the sound clips
    #[arg(long, env = "BLOCKFALL_SOUNDS_DIR")]
    pub sounds_dir: Option<PathBuf>,

    /// Wait between live-connection attempts, in milliseconds
    #[arg(long, env = "BLOCKFALL_POLL_FALLBACK_MS")]
    pub poll_fallback_ms: Option<u64>,

    /// Audio output device name (system default when omitted)
    #[arg(long, env = "BLOCKFALL_AUDIO_DEVICE")]
    pub device: Option<String>,

    /// Master volume, 0.0 to 1.0
    #[arg(long, env = "BLOCKFALL_VOLUME")]
    pub volume: Option<f32>,

    /// Start with sound effects off
    #[arg(long)]
    pub muted: bool,
}

/// Fully resolved settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
    pub sounds_dir: PathBuf,
    pub poll_fallback: Duration,
    pub device: Option<String>,
    pub volume: f32,
    pub muted: bool,
}

impl Settings {
    /// Resolve settings from the parsed CLI and the platform config file.
    pub fn resolve(args: Args) -> Self {
        let file = match FileConfig::load() {
            Ok(file) => file,
            Err(e) => {
                warn!("Ignoring config file: {}", e);
                FileConfig::default()
            }
        };
        Self::from_layers(args, file)
    }

    /// Combine the CLI/env layer with the file layer and defaults.
    fn from_layers(args: Args, file: FileConfig) -> Self {
        Settings {
            server_url: args
                .server
                .or(file.server)
                .unwrap_or_else(|| config::DEFAULT_SERVER_URL.to_string()),
            sounds_dir: args
                .sounds_dir
                .or(file.sounds_dir)
                .unwrap_or_else(|| PathBuf::from(config::DEFAULT_SOUNDS_DIR)),
            poll_fallback: Duration::from_millis(
                args.poll_fallback_ms
                    .or(file.poll_fallback_ms)
                    .unwrap_or(config::DEFAULT_POLL_FALLBACK_MS),
            ),
            device: args.device.or(file.audio_device),
            volume: args
                .volume
                .or(file.volume)
                .unwrap_or(config::DEFAULT_VOLUME)
                .clamp(0.0, 1.0),
            muted: args.muted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let settings = Settings::from_layers(Args::default(), FileConfig::default());

        assert_eq!(settings.server_url, "http://127.0.0.1:4000");
        assert_eq!(settings.sounds_dir, PathBuf::from("sounds"));
        assert_eq!(settings.poll_fallback, Duration::from_millis(2500));
        assert!(settings.device.is_none());
        assert_eq!(settings.volume, 1.0);
        assert!(!settings.muted);
    }

    #[test]
    fn file_layer_fills_missing_cli_values() {
        let file = FileConfig {
            server: Some("http://game.example:4000".to_string()),
            poll_fallback_ms: Some(1000),
            ..FileConfig::default()
        };
        let settings = Settings::from_layers(Args::default(), file);

        assert_eq!(settings.server_url, "http://game.example:4000");
        assert_eq!(settings.poll_fallback, Duration::from_millis(1000));
        assert_eq!(settings.sounds_dir, PathBuf::from("sounds"));
    }

    #[test]
    fn cli_wins_over_file() {
        let args = Args {
            server: Some("http://cli.example:4000".to_string()),
            volume: Some(0.25),
            ..Args::default()
        };
        let file = FileConfig {
            server: Some("http://file.example:4000".to_string()),
            volume: Some(0.9),
            ..FileConfig::default()
        };
        let settings = Settings::from_layers(args, file);

        assert_eq!(settings.server_url, "http://cli.example:4000");
        assert_eq!(settings.volume, 0.25);
    }

    #[test]
    fn volume_is_clamped() {
        let args = Args {
            volume: Some(2.5),
            ..Args::default()
        };
        let settings = Settings::from_layers(args, FileConfig::default());
        assert_eq!(settings.volume, 1.0);
    }
}
