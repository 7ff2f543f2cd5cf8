//! Event dispatch
//!
//! Bridges inbound live events to the sound system and the progress
//! indicator. The server decides *when* things happen; everything here is
//! reaction.

use crate::progress::ProgressIndicator;
use crate::sfx::SoundSystem;
use blockfall_common::LiveEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Delay before the loading indicator appears
pub const LOADING_INDICATOR_DELAY: Duration = Duration::from_millis(300);

/// Owns the reactions to live events.
pub struct App {
    sound: SoundSystem,
    progress: ProgressIndicator,
}

impl App {
    pub fn new(sound: SoundSystem, progress: ProgressIndicator) -> Self {
        Self { sound, progress }
    }

    /// Consume events until the channel closes.
    pub async fn run(&mut self, mut events: mpsc::Receiver<LiveEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event);
        }
        debug!("Event channel closed");
    }

    /// React to one inbound event.
    pub fn handle_event(&mut self, event: LiveEvent) {
        match event {
            LiveEvent::PageLoadedStart => self.progress.show(LOADING_INDICATOR_DELAY),
            LiveEvent::PageLoadedStop => self.progress.hide(),
            LiveEvent::PlaySound { name } => self.sound.play(&name),
            LiveEvent::ToggleSound { enabled } => self.sound.set_enabled(enabled),
        }
    }

    pub fn sound(&self) -> &SoundSystem {
        &self.sound
    }

    pub fn sound_mut(&mut self) -> &mut SoundSystem {
        &mut self.sound
    }

    pub fn progress(&self) -> &ProgressIndicator {
        &self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressStyle;
    use std::path::PathBuf;

    fn app() -> App {
        // Empty clip table: these tests never trigger audio
        let sound = SoundSystem::with_clips(PathBuf::from("sounds"), Vec::new(), None, 1.0);
        App::new(sound, ProgressIndicator::new(ProgressStyle::default()))
    }

    #[tokio::test]
    async fn loading_events_drive_the_indicator() {
        let mut app = app();

        app.handle_event(LiveEvent::PageLoadedStart);
        assert!(app.progress().is_pending());

        // Stop inside the delay: never shown
        app.handle_event(LiveEvent::PageLoadedStop);
        assert!(!app.progress().is_pending());
        assert!(!app.progress().is_visible());
    }

    #[tokio::test]
    async fn toggle_event_flips_the_gate() {
        let mut app = app();
        assert!(app.sound().is_enabled());

        app.handle_event(LiveEvent::ToggleSound { enabled: false });
        assert!(!app.sound().is_enabled());

        app.handle_event(LiveEvent::ToggleSound { enabled: true });
        assert!(app.sound().is_enabled());
    }
}
