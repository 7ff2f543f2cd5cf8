//! Core audio data types
//!
//! Structures for decoded clips and single frames used throughout the audio
//! pipeline.

/// ClipBuffer holds one decoded and resampled sound effect, ready for playback.
///
/// **Format:**
/// - Samples are f32 (floating point -1.0 to 1.0)
/// - Stereo interleaved: [L, R, L, R, ...]
/// - Sample rate always 44100 Hz after resampling
#[derive(Debug, Clone)]
pub struct ClipBuffer {
    /// Clip name ("move", "line_clear", ...)
    pub name: String,

    /// PCM audio samples (interleaved stereo)
    /// Index pattern: 0=left, 1=right, 2=left, 3=right, etc.
    pub samples: Vec<f32>,

    /// Sample rate (always 44100 after resampling)
    pub sample_rate: u32,

    /// Number of stereo frames (samples.len() / 2)
    pub frame_count: usize,
}

impl ClipBuffer {
    /// Create a new ClipBuffer from decoded and resampled audio data
    pub fn new(name: impl Into<String>, samples: Vec<f32>, sample_rate: u32) -> Self {
        let frame_count = samples.len() / 2;

        Self {
            name: name.into(),
            samples,
            sample_rate,
            frame_count,
        }
    }

    /// Get duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        (self.frame_count as u64 * 1000) / self.sample_rate as u64
    }

    /// Get audio frame at specific frame index
    pub fn get_frame(&self, frame_index: usize) -> Option<AudioFrame> {
        let sample_index = frame_index * 2;
        if sample_index + 1 < self.samples.len() {
            Some(AudioFrame {
                left: self.samples[sample_index],
                right: self.samples[sample_index + 1],
            })
        } else {
            None
        }
    }
}

/// AudioFrame represents a single stereo sample (one frame of audio).
///
/// Used for passing audio data between mixer and output device.
#[derive(Debug, Clone, Copy)]
pub struct AudioFrame {
    /// Left channel sample
    pub left: f32,

    /// Right channel sample
    pub right: f32,
}

impl AudioFrame {
    /// Create a silent frame (0.0, 0.0)
    pub fn zero() -> Self {
        AudioFrame {
            left: 0.0,
            right: 0.0,
        }
    }

    /// Create a frame from mono sample (duplicate to both channels)
    pub fn from_mono(sample: f32) -> Self {
        AudioFrame {
            left: sample,
            right: sample,
        }
    }

    /// Create a frame from left and right samples
    pub fn from_stereo(left: f32, right: f32) -> Self {
        AudioFrame { left, right }
    }

    /// Add another frame to this frame (for mixing)
    pub fn add(&mut self, other: &AudioFrame) {
        self.left += other.left;
        self.right += other.right;
    }

    /// Clamp samples to valid range [-1.0, 1.0] to prevent clipping
    pub fn clamp(&mut self) {
        self.left = self.left.clamp(-1.0, 1.0);
        self.right = self.right.clamp(-1.0, 1.0);
    }
}
