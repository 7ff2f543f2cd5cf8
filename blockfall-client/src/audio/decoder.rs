//! Audio decoder using symphonia
//!
//! Decodes the clip formats the client ships with (MP3, OGG/Vorbis, FLAC,
//! WAV) to PCM samples.

use crate::error::{Error, Result};
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

/// Whole-file clip decoder using symphonia.
///
/// Sound effects are short, so decode is a single pass with no seeking and no
/// incremental buffering.
pub struct ClipDecoder;

impl ClipDecoder {
    /// Decode entire audio file to PCM samples.
    ///
    /// # Returns
    /// - `samples`: Interleaved f32 samples in the source channel layout
    /// - `sample_rate`: Original sample rate (before resampling)
    /// - `channels`: Number of channels in source (1=mono, 2=stereo)
    ///
    /// # Errors
    /// - Failed to open file
    /// - Unsupported audio format
    /// - No decodable audio track
    pub fn decode_file(path: &Path) -> Result<(Vec<f32>, u32, u16)> {
        debug!("Decoding clip: {}", path.display());

        let file = std::fs::File::open(path)
            .map_err(|e| Error::Decode(format!("Failed to open file {}: {}", path.display(), e)))?;

        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        // Hint the format registry with the file extension
        let mut hint = Hint::new();
        if let Some(extension) = path.extension() {
            if let Some(ext_str) = extension.to_str() {
                hint.with_extension(ext_str);
            }
        }

        let format_opts = FormatOptions::default();
        let metadata_opts = MetadataOptions::default();

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &format_opts, &metadata_opts)
            .map_err(|e| Error::Decode(format!("Failed to probe format: {}", e)))?;

        let mut format = probed.format;

        // Get the default audio track
        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| Error::Decode("No audio track found".to_string()))?;

        let track_id = track.id;
        let codec_params = track.codec_params.clone();

        let sample_rate = codec_params
            .sample_rate
            .ok_or_else(|| Error::Decode("Sample rate not found".to_string()))?;

        let channels = codec_params
            .channels
            .map(|c| c.count() as u16)
            .ok_or_else(|| Error::Decode("Channel count not found".to_string()))?;

        debug!(
            "Clip format: sample_rate={}, channels={}",
            sample_rate, channels
        );

        let decoder_opts = DecoderOptions::default();
        let mut decoder = symphonia::default::get_codecs()
            .make(&codec_params, &decoder_opts)
            .map_err(|e| Error::Decode(format!("Failed to create decoder: {}", e)))?;

        // Decode all packets, copying each decoded buffer out interleaved
        let mut samples = Vec::new();
        let mut sample_buf: Option<SampleBuffer<f32>> = None;

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(symphonia::core::errors::Error::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    // End of stream
                    break;
                }
                Err(e) => {
                    warn!("Error reading packet: {}", e);
                    break;
                }
            };

            // Skip packets for other tracks
            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    let spec = *decoded.spec();

                    // The staging buffer must hold the whole packet; codecs
                    // with variable block sizes can outgrow the first
                    // allocation
                    let needed = decoded.capacity() * spec.channels.count();
                    if sample_buf.as_ref().map_or(true, |buf| buf.capacity() < needed) {
                        sample_buf = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
                    }

                    if let Some(buf) = &mut sample_buf {
                        buf.copy_interleaved_ref(decoded);
                        samples.extend_from_slice(buf.samples());
                    }
                }
                Err(e) => {
                    warn!("Decode error: {}", e);
                    continue;
                }
            }
        }

        if samples.is_empty() {
            return Err(Error::Decode(format!(
                "No samples decoded from {}",
                path.display()
            )));
        }

        debug!(
            "Decoded {} samples ({} frames)",
            samples.len(),
            samples.len() / channels as usize
        );

        Ok((samples, sample_rate, channels))
    }
}
