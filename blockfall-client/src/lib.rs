//! # Blockfall Client Library (blockfall-client)
//!
//! Native companion for the server-rendered Blockfall game: plays the sound
//! effects the server announces and shows loading feedback while the live
//! connection is (re)established.
//!
//! **Architecture:** SSE event stream (reqwest) feeding a dispatch loop that
//! drives a symphonia + rubato + cpal audio pipeline and a terminal progress
//! indicator.

pub mod app;
pub mod audio;
pub mod config;
pub mod error;
pub mod live;
pub mod progress;
pub mod sfx;

pub use app::App;
pub use error::{Error, Result};
pub use progress::{ProgressIndicator, ProgressStyle};
pub use sfx::SoundSystem;
