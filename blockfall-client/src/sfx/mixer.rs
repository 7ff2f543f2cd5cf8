//! Clip mixer
//!
//! Holds one voice per registered clip. The audio callback pulls one frame at
//! a time: active voices sum and advance, a voice reaching the end of its
//! clip deactivates. Restarting a voice rewinds it to frame zero, so a clip
//! never layers over itself; different clips mix freely.

use crate::audio::{AudioFrame, ClipBuffer};
use std::sync::Arc;

/// Identifier of a registered voice (index into the mixer's voice table)
pub type VoiceId = usize;

/// Playhead over one clip's buffer
#[derive(Debug)]
struct Voice {
    clip: Arc<ClipBuffer>,
    position: usize,
    active: bool,
}

/// Sums the active voices into the frame stream the output device consumes.
#[derive(Debug, Default)]
pub struct Mixer {
    voices: Vec<Voice>,
}

impl Mixer {
    pub fn new() -> Self {
        Self { voices: Vec::new() }
    }

    /// Register a clip and get the voice id used to trigger it.
    ///
    /// Voices start inactive; nothing sounds until [`Mixer::restart`].
    pub fn add_clip(&mut self, clip: Arc<ClipBuffer>) -> VoiceId {
        self.voices.push(Voice {
            clip,
            position: 0,
            active: false,
        });
        self.voices.len() - 1
    }

    /// Start the voice from frame zero.
    ///
    /// If the voice is already sounding this rewinds it; other voices are
    /// untouched.
    pub fn restart(&mut self, id: VoiceId) {
        if let Some(voice) = self.voices.get_mut(id) {
            voice.position = 0;
            voice.active = true;
        }
    }

    /// Produce the next output frame: sum of all active voices, clamped.
    ///
    /// Advances every active voice by one frame; voices that hit the end of
    /// their clip deactivate.
    pub fn next_frame(&mut self) -> AudioFrame {
        let mut frame = AudioFrame::zero();

        for voice in &mut self.voices {
            if !voice.active {
                continue;
            }

            match voice.clip.get_frame(voice.position) {
                Some(voice_frame) => {
                    frame.add(&voice_frame);
                    voice.position += 1;
                    if voice.position >= voice.clip.frame_count {
                        voice.active = false;
                    }
                }
                None => {
                    voice.active = false;
                }
            }
        }

        frame.clamp();
        frame
    }

    /// Whether the voice is currently sounding
    pub fn is_active(&self, id: VoiceId) -> bool {
        self.voices.get(id).is_some_and(|v| v.active)
    }

    /// Current playhead of the voice, in frames
    pub fn position(&self, id: VoiceId) -> usize {
        self.voices.get(id).map_or(0, |v| v.position)
    }

    /// The clip buffer behind a voice
    pub fn clip(&self, id: VoiceId) -> Option<&Arc<ClipBuffer>> {
        self.voices.get(id).map(|v| &v.clip)
    }

    /// Names of the clips currently sounding
    pub fn active_names(&self) -> Vec<String> {
        self.voices
            .iter()
            .filter(|v| v.active)
            .map(|v| v.clip.name.clone())
            .collect()
    }
}
