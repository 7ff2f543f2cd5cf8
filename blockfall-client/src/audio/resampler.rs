//! Audio resampling using rubato
//!
//! Converts decoded clips to the standard 44.1kHz playback rate.

use crate::error::{Error, Result};
use rubato::{FastFixedIn, Resampler as RubatoResampler};
use tracing::debug;

/// Standard output sample rate for all audio
pub const TARGET_SAMPLE_RATE: u32 = 44100;

/// Clip resampler using rubato for sample rate conversion.
pub struct Resampler;

impl Resampler {
    /// Resample a whole clip to the target sample rate (44.1kHz).
    ///
    /// # Arguments
    /// - `input`: Interleaved audio samples
    /// - `input_rate`: Input sample rate
    /// - `channels`: Number of channels (1 or 2 for clip sources)
    ///
    /// # Returns
    /// Resampled interleaved audio at 44.1kHz
    ///
    /// # Notes
    /// If input is already at 44.1kHz, returns a copy without resampling.
    /// Clips are short enough to process as a single chunk.
    pub fn resample(input: &[f32], input_rate: u32, channels: u16) -> Result<Vec<f32>> {
        let output_rate = TARGET_SAMPLE_RATE;

        if input_rate == output_rate {
            debug!("Sample rate already at {}Hz, skipping resample", output_rate);
            return Ok(input.to_vec());
        }

        debug!(
            "Resampling from {}Hz to {}Hz ({} channels)",
            input_rate, output_rate, channels
        );

        // Rubato expects planar format
        let planar_input = Self::deinterleave(input, channels);
        let input_frames = planar_input[0].len();

        let mut resampler = FastFixedIn::<f32>::new(
            output_rate as f64 / input_rate as f64,
            1.0, // max_relative_ratio (no runtime changes)
            rubato::PolynomialDegree::Septic,
            input_frames,
            channels as usize,
        )
        .map_err(|e| Error::Resample(format!("Failed to create resampler: {}", e)))?;

        let planar_output = resampler
            .process(&planar_input, None)
            .map_err(|e| Error::Resample(format!("Resampling failed: {}", e)))?;

        let interleaved_output = Self::interleave(planar_output);

        debug!(
            "Resampled {} input frames to {} output frames",
            input_frames,
            interleaved_output.len() / channels as usize
        );

        Ok(interleaved_output)
    }

    /// Convert interleaved samples to planar format.
    ///
    /// Input:  [L, R, L, R, L, R, ...]
    /// Output: [[L, L, L, ...], [R, R, R, ...]]
    fn deinterleave(samples: &[f32], channels: u16) -> Vec<Vec<f32>> {
        let num_channels = channels as usize;
        let num_frames = samples.len() / num_channels;

        let mut planar = vec![Vec::with_capacity(num_frames); num_channels];

        for frame_idx in 0..num_frames {
            for ch_idx in 0..num_channels {
                planar[ch_idx].push(samples[frame_idx * num_channels + ch_idx]);
            }
        }

        planar
    }

    /// Convert planar samples to interleaved format.
    ///
    /// Input:  [[L, L, L, ...], [R, R, R, ...]]
    /// Output: [L, R, L, R, L, R, ...]
    fn interleave(planar: Vec<Vec<f32>>) -> Vec<f32> {
        if planar.is_empty() {
            return Vec::new();
        }

        let num_channels = planar.len();
        let num_frames = planar[0].len();
        let mut interleaved = Vec::with_capacity(num_frames * num_channels);

        for frame_idx in 0..num_frames {
            for ch_idx in 0..num_channels {
                interleaved.push(planar[ch_idx][frame_idx]);
            }
        }

        interleaved
    }
}
