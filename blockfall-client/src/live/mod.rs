//! Live connection to the game server
//!
//! Subscribes to the server's event stream and feeds typed [`LiveEvent`]s to
//! the dispatch loop over a bounded channel. The connection task owns the
//! whole lifecycle: CSRF-authenticated subscription, incremental frame
//! parsing, and reconnect-forever with the configured fallback wait.
//!
//! The task also synthesizes the loading events around each connection
//! attempt, so the progress indicator reflects connection churn the same way
//! it reflects server-driven navigation.

pub mod sse;

pub use sse::{SseFrame, SseParser};

use crate::error::{Error, Result};
use blockfall_common::LiveEvent;
use futures::StreamExt;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// How the client reaches the server
#[derive(Debug, Clone)]
pub struct LiveConfig {
    /// Base URL, e.g. `http://127.0.0.1:4000`
    pub server_url: String,
    /// Token from the session handshake, sent with the subscription
    pub csrf_token: String,
    /// Wait between connection attempts
    pub poll_fallback: Duration,
}

/// Session handshake response
#[derive(Debug, Deserialize)]
struct SessionResponse {
    csrf_token: String,
}

/// Fetch the CSRF token the event-stream subscription requires.
///
/// The client cannot subscribe without it, so callers treat failure here as a
/// startup error.
pub async fn fetch_csrf_token(http: &reqwest::Client, server_url: &str) -> Result<String> {
    let url = format!("{}/live/session", server_url.trim_end_matches('/'));
    debug!("Fetching session token from {}", url);

    let response = http.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(Error::Session(format!(
            "Session endpoint returned {}",
            response.status()
        )));
    }

    let session: SessionResponse = response.json().await?;
    if session.csrf_token.is_empty() {
        return Err(Error::Session("Session returned an empty CSRF token".to_string()));
    }

    Ok(session.csrf_token)
}

/// Streaming client for the server's live events.
pub struct LiveClient {
    config: LiveConfig,
    http: reqwest::Client,
}

impl LiveClient {
    pub fn new(config: LiveConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Spawn the connection task.
    ///
    /// Events arrive on the returned channel for as long as the receiver
    /// lives; dropping it stops the task. The task reconnects indefinitely,
    /// sleeping the poll-fallback interval after a failed attempt or a closed
    /// stream. There is no replay: events from outages are simply missed.
    pub fn connect(self) -> mpsc::Receiver<LiveEvent> {
        let (tx, rx) = mpsc::channel(64);
        tokio::spawn(self.run(tx));
        rx
    }

    async fn run(self, tx: mpsc::Sender<LiveEvent>) {
        loop {
            // The attempt begins: progress indicator may appear
            if tx.send(LiveEvent::PageLoadedStart).await.is_err() {
                return;
            }

            if let Err(e) = self.stream_events(&tx).await {
                warn!("Live connection failed: {}", e);
            }

            if tx.is_closed() {
                return;
            }

            debug!("Reconnecting in {:?}", self.config.poll_fallback);
            tokio::time::sleep(self.config.poll_fallback).await;
        }
    }

    /// One subscription: connect, then pump frames until the stream ends.
    async fn stream_events(&self, tx: &mpsc::Sender<LiveEvent>) -> Result<()> {
        let url = format!(
            "{}/live/events",
            self.config.server_url.trim_end_matches('/')
        );
        info!("Subscribing to live events at {}", url);

        let response = self
            .http
            .get(&url)
            .query(&[("_csrf_token", self.config.csrf_token.as_str())])
            .header("Accept", "text/event-stream")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Session(format!(
                "Event stream returned {}",
                response.status()
            )));
        }

        // Connected: loading ends
        if tx.send(LiveEvent::PageLoadedStop).await.is_err() {
            return Ok(());
        }

        let mut stream = response.bytes_stream();
        let mut parser = SseParser::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            for frame in parser.push(&chunk) {
                match LiveEvent::from_wire(&frame.event, &frame.data) {
                    Ok(Some(event)) => {
                        debug!("Live event: {}", event.event_type());
                        if tx.send(event).await.is_err() {
                            return Ok(());
                        }
                    }
                    Ok(None) => {
                        debug!("Skipping unknown event '{}'", frame.event);
                    }
                    Err(e) => {
                        warn!("Dropping malformed event frame: {}", e);
                    }
                }
            }
        }

        warn!("Live event stream ended");
        Ok(())
    }
}
