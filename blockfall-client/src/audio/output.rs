//! Audio output using cpal
//!
//! Manages audio device output with callback-based playback.

use crate::audio::AudioFrame;
use crate::error::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};

/// Audio output manager using cpal.
///
/// Owns the device stream and the master volume. A stream error flips
/// `error_flag`; the sound system reports it on the next play attempt.
pub struct AudioOutput {
    device: Device,
    config: StreamConfig,
    sample_format: SampleFormat,
    stream: Option<Stream>,
    volume: Arc<Mutex<f32>>,
    /// Stream error flag - set by audio callback on error
    error_flag: Arc<AtomicBool>,
}

impl AudioOutput {
    /// Open audio device for output.
    ///
    /// # Arguments
    /// - `device_name`: Optional device name (None = default device)
    ///
    /// # Errors
    /// - Device not found and default device unavailable
    /// - Failed to get device configuration
    ///
    /// # Fallback Behavior
    /// If the requested device is missing, the default device is used instead.
    pub fn new(device_name: Option<String>) -> Result<Self> {
        let host = cpal::default_host();

        let device = if let Some(name) = device_name.as_ref() {
            let mut devices = host
                .output_devices()
                .map_err(|e| Error::AudioOutput(format!("Failed to enumerate devices: {}", e)))?;

            match devices.find(|d| d.name().ok().as_ref() == Some(name)) {
                Some(dev) => {
                    info!("Found requested audio device: {}", name);
                    dev
                }
                None => {
                    warn!(
                        "Requested device '{}' not found, falling back to default device",
                        name
                    );
                    host.default_output_device().ok_or_else(|| {
                        Error::AudioOutput(format!(
                            "Device '{}' not found and no default device available",
                            name
                        ))
                    })?
                }
            }
        } else {
            host.default_output_device()
                .ok_or_else(|| Error::AudioOutput("No default output device found".to_string()))?
        };

        let (config, sample_format) = Self::get_best_config(&device)?;

        debug!(
            "Audio config: sample_rate={}, channels={}, format={:?}",
            config.sample_rate.0, config.channels, sample_format
        );

        Ok(Self {
            device,
            config,
            sample_format,
            stream: None,
            volume: Arc::new(Mutex::new(1.0)),
            error_flag: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get the best supported configuration for playback.
    ///
    /// Prefers 44.1kHz, stereo, f32 samples (matching the internal clip format).
    fn get_best_config(device: &Device) -> Result<(StreamConfig, SampleFormat)> {
        let mut supported_configs = device
            .supported_output_configs()
            .map_err(|e| Error::AudioOutput(format!("Failed to get device configs: {}", e)))?;

        let preferred = supported_configs.find(|config| {
            config.channels() == 2
                && config.min_sample_rate().0 <= 44100
                && config.max_sample_rate().0 >= 44100
                && config.sample_format() == SampleFormat::F32
        });

        if let Some(supported_config) = preferred {
            let sample_format = supported_config.sample_format();
            let config = supported_config
                .with_sample_rate(cpal::SampleRate(44100))
                .config();
            return Ok((config, sample_format));
        }

        // Fallback: use default config
        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::AudioOutput(format!("Failed to get default config: {}", e)))?;

        let sample_format = supported_config.sample_format();
        let config = supported_config.config();
        Ok((config, sample_format))
    }

    /// Start audio playback with callback.
    ///
    /// # Arguments
    /// - `callback`: Closure called by the audio thread to fetch the next frame
    ///
    /// The callback runs on a real-time audio thread; it should return
    /// `AudioFrame::zero()` when nothing is sounding. Volume is applied here,
    /// after the callback.
    pub fn start<F>(&mut self, callback: F) -> Result<()>
    where
        F: FnMut() -> AudioFrame + Send + 'static,
    {
        info!("Starting audio stream");

        let callback = Arc::new(Mutex::new(callback));

        let stream = match self.sample_format {
            SampleFormat::F32 => self.build_stream_f32(callback)?,
            SampleFormat::I16 => self.build_stream_i16(callback)?,
            SampleFormat::U16 => self.build_stream_u16(callback)?,
            sample_format => {
                return Err(Error::AudioOutput(format!(
                    "Unsupported sample format: {:?}",
                    sample_format
                )));
            }
        };

        stream
            .play()
            .map_err(|e| Error::AudioOutput(format!("Failed to start stream: {}", e)))?;

        self.stream = Some(stream);

        info!("Audio stream started successfully");
        Ok(())
    }

    /// Build audio stream for f32 samples
    fn build_stream_f32(
        &self,
        callback: Arc<Mutex<dyn FnMut() -> AudioFrame + Send + 'static>>,
    ) -> Result<Stream> {
        let channels = self.config.channels as usize;
        let volume = Arc::clone(&self.volume);
        let error_flag = Arc::clone(&self.error_flag);

        let stream = self
            .device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let mut callback = callback.lock().unwrap();
                    let current_volume = *volume.lock().unwrap();

                    for frame in data.chunks_mut(channels) {
                        let audio_frame = callback();

                        let left = audio_frame.left * current_volume;
                        let right = audio_frame.right * current_volume;

                        // Clamp to prevent clipping
                        frame[0] = left.clamp(-1.0, 1.0);
                        if channels > 1 {
                            frame[1] = right.clamp(-1.0, 1.0);
                        }
                    }
                },
                move |err| {
                    error!("Audio stream error: {}", err);
                    error_flag.store(true, Ordering::SeqCst);
                },
                None, // No timeout
            )
            .map_err(|e| Error::AudioOutput(format!("Failed to build stream: {}", e)))?;

        Ok(stream)
    }

    /// Build audio stream for i16 samples
    fn build_stream_i16(
        &self,
        callback: Arc<Mutex<dyn FnMut() -> AudioFrame + Send + 'static>>,
    ) -> Result<Stream> {
        let channels = self.config.channels as usize;
        let volume = Arc::clone(&self.volume);
        let error_flag = Arc::clone(&self.error_flag);

        let stream = self
            .device
            .build_output_stream(
                &self.config,
                move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                    let mut callback = callback.lock().unwrap();
                    let current_volume = *volume.lock().unwrap();

                    for frame in data.chunks_mut(channels) {
                        let audio_frame = callback();

                        let left = (audio_frame.left * current_volume).clamp(-1.0, 1.0);
                        let right = (audio_frame.right * current_volume).clamp(-1.0, 1.0);

                        frame[0] = (left * i16::MAX as f32) as i16;
                        if channels > 1 {
                            frame[1] = (right * i16::MAX as f32) as i16;
                        }
                    }
                },
                move |err| {
                    error!("Audio stream error: {}", err);
                    error_flag.store(true, Ordering::SeqCst);
                },
                None,
            )
            .map_err(|e| Error::AudioOutput(format!("Failed to build stream: {}", e)))?;

        Ok(stream)
    }

    /// Build audio stream for u16 samples
    fn build_stream_u16(
        &self,
        callback: Arc<Mutex<dyn FnMut() -> AudioFrame + Send + 'static>>,
    ) -> Result<Stream> {
        let channels = self.config.channels as usize;
        let volume = Arc::clone(&self.volume);
        let error_flag = Arc::clone(&self.error_flag);

        let stream = self
            .device
            .build_output_stream(
                &self.config,
                move |data: &mut [u16], _: &cpal::OutputCallbackInfo| {
                    let mut callback = callback.lock().unwrap();
                    let current_volume = *volume.lock().unwrap();

                    for frame in data.chunks_mut(channels) {
                        let audio_frame = callback();

                        let left = (audio_frame.left * current_volume).clamp(-1.0, 1.0);
                        let right = (audio_frame.right * current_volume).clamp(-1.0, 1.0);

                        // Convert from [-1.0, 1.0] to [0, 65535]
                        frame[0] = ((left + 1.0) * 32767.5) as u16;
                        if channels > 1 {
                            frame[1] = ((right + 1.0) * 32767.5) as u16;
                        }
                    }
                },
                move |err| {
                    error!("Audio stream error: {}", err);
                    error_flag.store(true, Ordering::SeqCst);
                },
                None,
            )
            .map_err(|e| Error::AudioOutput(format!("Failed to build stream: {}", e)))?;

        Ok(stream)
    }

    /// Stop audio playback.
    ///
    /// Pauses the stream and drops the stream reference.
    pub fn stop(&mut self) -> Result<()> {
        info!("Stopping audio stream");

        if let Some(stream) = self.stream.take() {
            stream
                .pause()
                .map_err(|e| Error::AudioOutput(format!("Failed to pause stream: {}", e)))?;
            drop(stream);
        }

        Ok(())
    }

    /// Set master volume.
    ///
    /// Values are clamped to the [0.0, 1.0] range.
    pub fn set_volume(&self, volume: f32) {
        let clamped = volume.clamp(0.0, 1.0);
        *self.volume.lock().unwrap() = clamped;
        debug!("Volume set to {:.2}", clamped);
    }

    /// Get current master volume.
    pub fn volume(&self) -> f32 {
        *self.volume.lock().unwrap()
    }

    /// Get device name.
    pub fn device_name(&self) -> String {
        self.device.name().unwrap_or_else(|_| "Unknown".to_string())
    }

    /// Get sample rate.
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    /// Get channel count.
    pub fn channels(&self) -> u16 {
        self.config.channels
    }

    /// Check if the audio callback has flagged a stream error.
    pub fn has_error(&self) -> bool {
        self.error_flag.load(Ordering::SeqCst)
    }
}
