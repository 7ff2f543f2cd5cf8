//! Audio test file generation utilities
//!
//! Generates deterministic WAV files with known characteristics so the
//! decode path can be exercised without shipping binary fixtures.

use hound::{SampleFormat, WavSpec, WavWriter};
use std::f32::consts::PI;
use std::path::Path;

/// Standard fixture sample rate (matches the output side, so no resampling)
pub const FIXTURE_SAMPLE_RATE: u32 = 44100;

/// Generate a mono 16-bit sine WAV
///
/// # Arguments
/// * `path` - Output file path
/// * `frames` - Length in frames (44100 = one second)
/// * `frequency_hz` - Sine frequency
/// * `amplitude` - 0.0-1.0; keep low to avoid clipping when clips mix
pub fn write_sine_wav(
    path: &Path,
    frames: usize,
    frequency_hz: f32,
    amplitude: f32,
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: FIXTURE_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for i in 0..frames {
        let t = i as f32 / FIXTURE_SAMPLE_RATE as f32;
        let sample = (2.0 * PI * frequency_hz * t).sin() * amplitude;
        writer.write_sample((sample * i16::MAX as f32) as i16)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Standard gameplay-length clip: one second, quiet 440 Hz
///
/// One second is long enough that a clip cannot fully drain between a play
/// call and the assertion that follows while a real device is consuming.
pub fn write_clip(path: &Path) -> Result<(), hound::Error> {
    write_sine_wav(path, FIXTURE_SAMPLE_RATE as usize, 440.0, 0.1)
}
