//! Stub game server for integration tests
//!
//! Serves the two live endpoints the client talks to, with a programmatic
//! push side so tests control exactly which frames go out:
//! - GET /live/session returns the CSRF token
//! - GET /live/events streams server-sent events to token-bearing clients

use std::convert::Infallible;
use std::time::{Duration, Instant};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::get;
use axum::{Json, Router};
use futures::stream::{Stream, StreamExt};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::BroadcastStream;

use blockfall_common::LiveEvent;

/// Token the stub hands out and then requires on the stream subscription
pub const TEST_CSRF_TOKEN: &str = "test-csrf-token";

/// One outgoing wire frame
#[derive(Debug, Clone)]
pub enum StubFrame {
    /// A typed event, encoded the way the real server encodes it
    Event(LiveEvent),
    /// An arbitrary frame, for unknown names and broken payloads
    Raw { event: String, data: String },
    /// Ends every open stream, as a dropped connection would
    Close,
}

#[derive(Clone)]
struct StubContext {
    csrf_token: String,
    frames: broadcast::Sender<StubFrame>,
}

/// In-process game server covering the live endpoints
pub struct StubServer {
    base_url: String,
    frames: broadcast::Sender<StubFrame>,
    server_task: JoinHandle<()>,
}

impl StubServer {
    /// Bind an ephemeral port and start serving with the standard token
    pub async fn start() -> Self {
        Self::start_with_token(TEST_CSRF_TOKEN).await
    }

    /// Bind an ephemeral port and start serving with the given token
    pub async fn start_with_token(csrf_token: &str) -> Self {
        let (frames, _) = broadcast::channel(64);
        let ctx = StubContext {
            csrf_token: csrf_token.to_string(),
            frames: frames.clone(),
        };

        let app = Router::new()
            .route("/live/session", get(session))
            .route("/live/events", get(events))
            .with_state(ctx);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub server");
        let addr = listener.local_addr().expect("Failed to read stub address");
        let server_task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        StubServer {
            base_url: format!("http://{}", addr),
            frames,
            server_task,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Push a typed event to every connected client
    pub fn push(&self, event: LiveEvent) {
        let _ = self.frames.send(StubFrame::Event(event));
    }

    /// Push an arbitrary frame (unknown names, broken payloads)
    pub fn push_raw(&self, event: &str, data: &str) {
        let _ = self.frames.send(StubFrame::Raw {
            event: event.to_string(),
            data: data.to_string(),
        });
    }

    /// End every open event stream while the server keeps accepting, as a
    /// dropped connection would
    pub fn close_streams(&self) {
        let _ = self.frames.send(StubFrame::Close);
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.server_task.abort();
    }
}

async fn session(State(ctx): State<StubContext>) -> Json<serde_json::Value> {
    Json(json!({ "csrf_token": ctx.csrf_token }))
}

#[derive(Deserialize)]
struct EventsQuery {
    #[serde(rename = "_csrf_token")]
    csrf_token: Option<String>,
}

async fn events(
    State(ctx): State<StubContext>,
    Query(query): Query<EventsQuery>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, StatusCode> {
    if query.csrf_token.as_deref() != Some(ctx.csrf_token.as_str()) {
        return Err(StatusCode::FORBIDDEN);
    }

    let stream = BroadcastStream::new(ctx.frames.subscribe())
        .take_while(|result| {
            std::future::ready(!matches!(result, Ok(StubFrame::Close)))
        })
        .filter_map(|result| async move {
            match result {
                Ok(StubFrame::Event(event)) => Some(Ok(Event::default()
                    .event(event.event_type())
                    .data(event.payload_json().to_string()))),
                Ok(StubFrame::Raw { event, data }) => {
                    Some(Ok(Event::default().event(event).data(data)))
                }
                Ok(StubFrame::Close) => None,
                // Lagged receiver; tests never push that fast
                Err(_) => None,
            }
        });

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_millis(500))
            .text("keep-alive"),
    ))
}

/// Receive the next event, or None if the timeout passes first
pub async fn next_event(
    rx: &mut mpsc::Receiver<LiveEvent>,
    timeout: Duration,
) -> Option<LiveEvent> {
    tokio::time::timeout(timeout, rx.recv()).await.ok().flatten()
}

/// Receive events until one satisfies the predicate, discarding the rest.
///
/// Returns None if the timeout passes or the channel closes first.
pub async fn wait_for<F>(
    rx: &mut mpsc::Receiver<LiveEvent>,
    timeout: Duration,
    predicate: F,
) -> Option<LiveEvent>
where
    F: Fn(&LiveEvent) -> bool,
{
    let deadline = Instant::now() + timeout;
    loop {
        let remaining = deadline.checked_duration_since(Instant::now())?;
        match tokio::time::timeout(remaining, rx.recv()).await {
            Ok(Some(event)) if predicate(&event) => return Some(event),
            Ok(Some(_)) => continue,
            _ => return None,
        }
    }
}
