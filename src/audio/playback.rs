//! Playback of generated audio on the system speakers via cpal.

use super::wav::decode_wav_bytes;
use crate::error::{PolyglotError, Result};
use cpal::StreamConfig;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

/// Plays interleaved samples on the default output device.
pub struct CpalPlayback {
    device: cpal::Device,
    stream_config: StreamConfig,
}

impl CpalPlayback {
    /// Open the default output device for `channels` at `sample_rate`.
    ///
    /// # Errors
    ///
    /// Returns [`PolyglotError::Playback`] if no output device is available.
    pub fn new(channels: u16, sample_rate: u32) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| PolyglotError::Playback("no default output device".into()))?;

        let device_name = device
            .description()
            .map(|d| d.name().to_owned())
            .unwrap_or_else(|_| "<unknown>".into());
        info!(device = %device_name, channels, sample_rate, "using output device");

        let stream_config = StreamConfig {
            channels,
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok(Self {
            device,
            stream_config,
        })
    }

    /// Play interleaved samples. Blocks until everything has been played.
    ///
    /// # Errors
    ///
    /// Returns [`PolyglotError::Playback`] if the stream cannot be created or started.
    pub fn play(&self, samples: &[f32]) -> Result<()> {
        let buffer = Arc::new(Mutex::new(PlaybackBuffer::new(samples.to_vec())));
        let buffer_clone = Arc::clone(&buffer);

        let stream = self
            .device
            .build_output_stream(
                &self.stream_config,
                move |data: &mut [f32], _info: &cpal::OutputCallbackInfo| {
                    if let Ok(mut buf) = buffer_clone.lock() {
                        buf.fill(data);
                    }
                },
                move |err| {
                    error!("audio output stream error: {err}");
                },
                None,
            )
            .map_err(|e| PolyglotError::Playback(format!("failed to build output stream: {e}")))?;

        stream
            .play()
            .map_err(|e| PolyglotError::Playback(format!("failed to start output stream: {e}")))?;

        loop {
            std::thread::sleep(std::time::Duration::from_millis(10));
            let buf = buffer
                .lock()
                .map_err(|e| PolyglotError::Playback(format!("playback buffer lock poisoned: {e}")))?;
            if buf.finished {
                break;
            }
        }

        drop(stream);
        Ok(())
    }
}

/// Read a WAV file and play it on the default output device.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, or playback fails.
pub fn play_wav_file(path: &Path) -> Result<()> {
    let (samples, channels, sample_rate) = load_interleaved(path)?;
    CpalPlayback::new(channels, sample_rate)?.play(&samples)
}

/// Interleaved samples, channel count and sample rate of a WAV file.
fn load_interleaved(path: &Path) -> Result<(Vec<f32>, u16, u32)> {
    let raw = decode_wav_bytes(&std::fs::read(path)?)?;
    let channels = raw
        .shape
        .get(1)
        .and_then(|&c| u16::try_from(c).ok())
        .unwrap_or(1);
    Ok((raw.samples, channels, raw.sample_rate))
}

/// Tracks how far playback has progressed.
struct PlaybackBuffer {
    samples: Vec<f32>,
    position: usize,
    finished: bool,
}

impl PlaybackBuffer {
    fn new(samples: Vec<f32>) -> Self {
        Self {
            samples,
            position: 0,
            finished: false,
        }
    }

    /// Copy the next samples into `data`, padding with silence once drained.
    fn fill(&mut self, data: &mut [f32]) {
        for sample in data.iter_mut() {
            if self.position < self.samples.len() {
                *sample = self.samples[self.position];
                self.position += 1;
            } else {
                *sample = 0.0;
                self.finished = true;
            }
        }
    }
}
