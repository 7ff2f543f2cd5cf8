//! Audio pipeline
//!
//! Turns a clip file into a playback-ready buffer and pushes mixed frames to
//! the output device:
//! - ClipDecoder: decode MP3/OGG/FLAC/WAV with symphonia
//! - Resampler: normalize to 44.1kHz with rubato
//! - ClipBuffer/AudioFrame: decoded PCM containers
//! - AudioOutput: cross-platform device output using cpal

pub mod decoder;
pub mod output;
pub mod resampler;
pub mod types;

pub use decoder::ClipDecoder;
pub use output::AudioOutput;
pub use resampler::{Resampler, TARGET_SAMPLE_RATE};
pub use types::{AudioFrame, ClipBuffer};

use crate::error::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Load one clip file into a playback-ready buffer.
///
/// Decodes the file, widens mono to stereo, and resamples to 44.1kHz so the
/// mixer never has to care about source formats.
pub fn load_clip(name: &str, path: &Path) -> Result<ClipBuffer> {
    let (samples, sample_rate, channels) = ClipDecoder::decode_file(path)?;

    let stereo = match channels {
        1 => widen_mono(&samples),
        2 => samples,
        n => {
            return Err(Error::Decode(format!(
                "Unsupported channel count {} in {}",
                n,
                path.display()
            )))
        }
    };

    let resampled = Resampler::resample(&stereo, sample_rate, 2)?;
    let buffer = ClipBuffer::new(name, resampled, TARGET_SAMPLE_RATE);

    debug!(
        "Loaded clip '{}': {} frames ({}ms)",
        name,
        buffer.frame_count,
        buffer.duration_ms()
    );

    Ok(buffer)
}

/// Duplicate mono samples into interleaved stereo.
fn widen_mono(samples: &[f32]) -> Vec<f32> {
    let mut widened = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        widened.push(*sample);
        widened.push(*sample);
    }
    widened
}
