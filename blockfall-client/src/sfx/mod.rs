//! Sound effects
//!
//! [`SoundSystem`] owns everything sound-related: the named clip registry,
//! the on/off gate, the mixer, and the output device. It is constructed once
//! and handed to the dispatch loop; nothing here is a process-wide global, so
//! tests build as many instances as they need.
//!
//! Lifecycle: clips load once (lazily on the first play, or eagerly at
//! startup), stay resident for the process lifetime, and are triggered by
//! name. Loading problems never fail startup; they resurface as warnings when
//! the affected clip is triggered.

pub mod clips;
pub mod mixer;

pub use clips::{default_clips, ClipSpec};
pub use mixer::{Mixer, VoiceId};

use crate::audio::{self, AudioOutput};
use crate::error::Result;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, trace, warn};

/// Clip-load lifecycle of the system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Uninitialized,
    Ready,
}

/// One entry in the name registry
#[derive(Debug)]
enum ClipSlot {
    /// Decoded and registered with the mixer
    Loaded(VoiceId),
    /// Load failed; the reason resurfaces on each play attempt
    Failed(String),
}

/// Controller for named sound-effect playback.
pub struct SoundSystem {
    sounds_dir: PathBuf,
    clip_table: Vec<ClipSpec>,
    device: Option<String>,
    volume: f32,
    /// Name registry, populated by `init`
    sounds: HashMap<String, ClipSlot>,
    state: LoadState,
    /// Gates the start of new playback only; in-flight audio keeps draining
    enabled: bool,
    mixer: Arc<Mutex<Mixer>>,
    output: Option<AudioOutput>,
}

impl SoundSystem {
    /// Create a system over the default gameplay clip set.
    ///
    /// Nothing is loaded yet; see [`SoundSystem::init`].
    pub fn new(sounds_dir: PathBuf, device: Option<String>, volume: f32) -> Self {
        Self::with_clips(sounds_dir, default_clips(), device, volume)
    }

    /// Create a system over a custom clip table.
    pub fn with_clips(
        sounds_dir: PathBuf,
        clip_table: Vec<ClipSpec>,
        device: Option<String>,
        volume: f32,
    ) -> Self {
        Self {
            sounds_dir,
            clip_table,
            device,
            volume,
            sounds: HashMap::new(),
            state: LoadState::Uninitialized,
            enabled: true,
            mixer: Arc::new(Mutex::new(Mixer::new())),
            output: None,
        }
    }

    /// Load all clips and open the output device. Idempotent: a `Ready`
    /// system returns immediately, so clips load exactly once per instance.
    ///
    /// Never fails: a clip that does not load is registered as unavailable
    /// and reported when triggered, and a system without a usable output
    /// device still tracks playback state (every trigger warns).
    pub fn init(&mut self) {
        if self.state == LoadState::Ready {
            return;
        }

        info!(
            "Loading {} sound clips from {}",
            self.clip_table.len(),
            self.sounds_dir.display()
        );

        for spec in &self.clip_table {
            let path = self.sounds_dir.join(&spec.file);
            match audio::load_clip(&spec.name, &path) {
                Ok(buffer) => {
                    let voice = self.mixer.lock().unwrap().add_clip(Arc::new(buffer));
                    self.sounds.insert(spec.name.clone(), ClipSlot::Loaded(voice));
                }
                Err(e) => {
                    debug!("Clip '{}' failed to load: {}", spec.name, e);
                    self.sounds
                        .insert(spec.name.clone(), ClipSlot::Failed(e.to_string()));
                }
            }
        }

        match self.open_output() {
            Ok(output) => {
                info!(
                    "Audio output open: {} @ {}Hz, {} channels, volume {:.2}",
                    output.device_name(),
                    output.sample_rate(),
                    output.channels(),
                    output.volume()
                );
                self.output = Some(output);
            }
            Err(e) => {
                warn!("Audio output unavailable, sounds will be silent: {}", e);
            }
        }

        self.state = LoadState::Ready;

        let loaded = self
            .sounds
            .values()
            .filter(|slot| matches!(slot, ClipSlot::Loaded(_)))
            .count();
        info!(
            "Sound system ready: {}/{} clips loaded",
            loaded,
            self.clip_table.len()
        );
    }

    /// Open the device and start the stream pulling from the mixer.
    fn open_output(&self) -> Result<AudioOutput> {
        let mut output = AudioOutput::new(self.device.clone())?;
        output.set_volume(self.volume);

        let mixer = Arc::clone(&self.mixer);
        output.start(move || mixer.lock().unwrap().next_frame())?;

        Ok(output)
    }

    /// Trigger the named clip.
    ///
    /// Initializes the system first if nothing has yet. When the gate is off
    /// nothing starts. An unknown name is a silent no-op. A clip the system
    /// knows but could not load warns with the stored reason.
    ///
    /// Triggering a clip that is already sounding restarts it from the
    /// beginning; other sounding clips are unaffected and mix with it.
    /// Fire-and-forget: playback trouble is logged, never returned.
    pub fn play(&mut self, name: &str) {
        if self.state != LoadState::Ready {
            self.init();
        }

        if !self.enabled {
            trace!("Sound disabled, skipping '{}'", name);
            return;
        }

        match self.sounds.get(name) {
            None => {
                // Names outside the clip table are tolerated
                trace!("No clip named '{}'", name);
            }
            Some(ClipSlot::Failed(reason)) => {
                warn!("Sound '{}' unavailable: {}", name, reason);
            }
            Some(ClipSlot::Loaded(voice)) => {
                let voice = *voice;
                self.mixer.lock().unwrap().restart(voice);
                debug!("Playing '{}'", name);

                match &self.output {
                    None => warn!("Sound '{}' triggered with no audio output", name),
                    Some(output) if output.has_error() => {
                        warn!("Sound '{}' playback degraded: audio stream error", name);
                    }
                    Some(_) => {}
                }
            }
        }
    }

    /// Turn the sound-effects gate on or off.
    ///
    /// Only affects plays that arrive afterwards; anything already sounding
    /// drains naturally.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        debug!(
            "Sound effects {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    /// Stop the output stream (shutdown path).
    pub fn stop(&mut self) {
        if let Some(output) = &mut self.output {
            if let Err(e) = output.stop() {
                warn!("Failed to stop audio output: {}", e);
            }
        }
    }

    /// Whether clips have been loaded
    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// Current state of the sound-effects gate
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of clips that loaded successfully
    pub fn clip_count(&self) -> usize {
        self.sounds
            .values()
            .filter(|slot| matches!(slot, ClipSlot::Loaded(_)))
            .count()
    }

    /// Names of the clips currently sounding
    pub fn active_sounds(&self) -> Vec<String> {
        self.mixer.lock().unwrap().active_names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::path::Path;

    /// Write a short 44.1kHz mono sine clip
    fn write_wav(path: &Path, frames: usize) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..frames {
            let t = i as f32 / 44100.0;
            let sample = (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.1;
            writer.write_sample((sample * i16::MAX as f32) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn test_system(dir: &Path) -> SoundSystem {
        // Clips last a full second so they cannot drain between a play call
        // and the assertion that follows when a real device is consuming
        write_wav(&dir.join("move.wav"), 44100);
        write_wav(&dir.join("drop.wav"), 44100);
        let table = vec![
            ClipSpec::new("move", "move.wav"),
            ClipSpec::new("drop", "drop.wav"),
            ClipSpec::new("broken", "missing.wav"),
        ];
        SoundSystem::with_clips(dir.to_path_buf(), table, None, 0.1)
    }

    #[test]
    #[serial(audio)]
    fn init_is_idempotent_and_keeps_clip_handles() {
        let dir = tempfile::tempdir().unwrap();
        let mut system = test_system(dir.path());

        system.init();
        assert!(system.is_ready());
        assert_eq!(system.clip_count(), 2);

        let voice = match system.sounds.get("move") {
            Some(ClipSlot::Loaded(v)) => *v,
            other => panic!("move not loaded: {:?}", other),
        };
        let before = Arc::clone(system.mixer.lock().unwrap().clip(voice).unwrap());

        // Second init must not reload anything
        system.init();
        let after = Arc::clone(system.mixer.lock().unwrap().clip(voice).unwrap());
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(system.clip_count(), 2);
    }

    #[test]
    #[serial(audio)]
    fn failed_clip_is_registered_and_does_not_block_others() {
        let dir = tempfile::tempdir().unwrap();
        let mut system = test_system(dir.path());

        system.init();
        assert!(matches!(
            system.sounds.get("broken"),
            Some(ClipSlot::Failed(_))
        ));

        // Triggering the broken clip activates nothing; a good one still plays
        system.play("broken");
        assert!(system.active_sounds().is_empty());

        system.play("move");
        assert_eq!(system.active_sounds(), vec!["move".to_string()]);
    }

    #[test]
    #[serial(audio)]
    fn disabled_gate_blocks_new_plays_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut system = test_system(dir.path());
        system.init();

        system.play("move");
        assert_eq!(system.active_sounds(), vec!["move".to_string()]);

        system.set_enabled(false);
        system.play("drop");
        // move keeps draining, drop never started
        assert_eq!(system.active_sounds(), vec!["move".to_string()]);

        system.set_enabled(true);
        system.play("drop");
        let mut active = system.active_sounds();
        active.sort();
        assert_eq!(active, vec!["drop".to_string(), "move".to_string()]);
    }
}
