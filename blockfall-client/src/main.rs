//! Blockfall client - Main entry point
//!
//! Connects to the game server's live event stream and reacts natively:
//! sound effects through the audio pipeline, loading feedback on the
//! terminal.
//!
//! Startup order mirrors a page boot: session handshake, warm the clip
//! cache, then subscribe and dispatch until a shutdown signal.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blockfall_client::app::App;
use blockfall_client::config::{Args, Settings};
use blockfall_client::live::{self, LiveClient, LiveConfig};
use blockfall_client::progress::{ProgressIndicator, ProgressStyle};
use blockfall_client::sfx::SoundSystem;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blockfall_client=debug,blockfall_common=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let settings = Settings::resolve(args);

    info!("Starting Blockfall client");
    info!("Server: {}", settings.server_url);
    info!("Sounds dir: {}", settings.sounds_dir.display());

    // Nothing works without the session token, so failure here is fatal
    let http = reqwest::Client::new();
    let csrf_token = live::fetch_csrf_token(&http, &settings.server_url)
        .await
        .context("Failed to fetch session token")?;

    // Appearance is configured once, here
    let progress = ProgressIndicator::new(ProgressStyle::default());

    let mut sound = SoundSystem::new(
        settings.sounds_dir.clone(),
        settings.device.clone(),
        settings.volume,
    );
    if settings.muted {
        sound.set_enabled(false);
    }
    // Load clips up front so the first play is instant
    sound.init();

    let client = LiveClient::new(LiveConfig {
        server_url: settings.server_url.clone(),
        csrf_token,
        poll_fallback: settings.poll_fallback,
    });
    let events = client.connect();

    let mut app = App::new(sound, progress);

    tokio::select! {
        _ = app.run(events) => {
            info!("Event stream closed");
        }
        _ = shutdown_signal() => {}
    }

    app.progress().hide();
    app.sound_mut().stop();
    info!("Client shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
