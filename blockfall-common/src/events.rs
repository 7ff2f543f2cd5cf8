//! Event types for the Blockfall client
//!
//! The server pushes named events over the live connection; this module is
//! the typed vocabulary shared by the connection layer and the dispatch loop.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Events the client reacts to
///
/// Each variant corresponds to one wire event name (see [`LiveEvent::event_type`]).
/// The loading pair is also synthesized locally by the connection layer around
/// connection attempts, so the progress indicator tracks reconnects the same
/// way it tracks server-driven navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LiveEvent {
    /// Loading work began; the progress indicator should appear (after a delay)
    PageLoadedStart,

    /// Loading work finished; the progress indicator should disappear
    PageLoadedStop,

    /// Play the named sound effect
    PlaySound {
        /// Clip name, e.g. "line_clear"
        name: String,
    },

    /// Turn sound effects on or off
    ToggleSound {
        /// New state of the sound-effects gate
        enabled: bool,
    },
}

/// Payload shape of the `play-sound` wire event
#[derive(Debug, Deserialize, Serialize)]
struct PlaySoundPayload {
    name: String,
}

/// Payload shape of the `toggle-sound` wire event
#[derive(Debug, Deserialize, Serialize)]
struct ToggleSoundPayload {
    enabled: bool,
}

impl LiveEvent {
    /// Get the wire event name for this event
    pub fn event_type(&self) -> &'static str {
        match self {
            LiveEvent::PageLoadedStart => "page-loaded-start",
            LiveEvent::PageLoadedStop => "page-loaded-stop",
            LiveEvent::PlaySound { .. } => "play-sound",
            LiveEvent::ToggleSound { .. } => "toggle-sound",
        }
    }

    /// Decode a wire event into a typed event.
    ///
    /// Returns `Ok(None)` for event names this client does not know (they are
    /// skipped, not errors). A known name with a payload that does not decode
    /// is an error; the caller logs and drops the frame.
    ///
    /// The loading events carry no payload; whatever data accompanies them is
    /// ignored.
    pub fn from_wire(event: &str, data: &str) -> Result<Option<LiveEvent>> {
        let payload_err = |source| Error::EventPayload {
            event: event.to_string(),
            source,
        };

        match event {
            "page-loaded-start" => Ok(Some(LiveEvent::PageLoadedStart)),
            "page-loaded-stop" => Ok(Some(LiveEvent::PageLoadedStop)),
            "play-sound" => {
                let payload: PlaySoundPayload =
                    serde_json::from_str(data).map_err(payload_err)?;
                Ok(Some(LiveEvent::PlaySound { name: payload.name }))
            }
            "toggle-sound" => {
                let payload: ToggleSoundPayload =
                    serde_json::from_str(data).map_err(payload_err)?;
                Ok(Some(LiveEvent::ToggleSound {
                    enabled: payload.enabled,
                }))
            }
            _ => Ok(None),
        }
    }

    /// Encode this event's payload as JSON (the `data:` side of a wire frame)
    pub fn payload_json(&self) -> serde_json::Value {
        match self {
            LiveEvent::PageLoadedStart | LiveEvent::PageLoadedStop => serde_json::json!({}),
            LiveEvent::PlaySound { name } => serde_json::json!({ "name": name }),
            LiveEvent::ToggleSound { enabled } => serde_json::json!({ "enabled": enabled }),
        }
    }
}
