//! Waveform layout normalization.
//!
//! Models hand back audio in whatever tensor layout they produce: a flat
//! buffer, `(channels, samples)`, or `(samples, channels)` when the audio came
//! from interleaved WAV frames. Everything downstream expects channel-major
//! audio, so [`RawWaveform::normalize`] brings every shape into that form.
//!
//! The axis decision is a heuristic. A recording always has far fewer channels
//! than samples, so the shorter axis is taken to be the channel axis. Square
//! shapes such as `2 × 2` are genuinely ambiguous and are left channels-first.
//! After normalization the channel count must not exceed [`MAX_CHANNELS`];
//! anything wider is rejected rather than guessed at.

use crate::error::{PolyglotError, Result};

/// Upper bound on the channel count of model output.
pub const MAX_CHANNELS: usize = 8;

/// Audio exactly as returned by a model: row-major samples plus a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct RawWaveform {
    /// Row-major sample data.
    pub samples: Vec<f32>,
    /// Tensor shape of `samples` (1-D, 2-D, or 2-D with leading unit axes).
    pub shape: Vec<usize>,
    /// Sample rate reported by the model, in Hz.
    pub sample_rate: u32,
}

/// Channel-major audio: `channels[c][i]` is sample `i` of channel `c`.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl RawWaveform {
    /// A flat single-channel buffer.
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        let shape = vec![samples.len()];
        Self {
            samples,
            shape,
            sample_rate,
        }
    }

    /// Normalize into channel-major layout.
    ///
    /// - 1-D `(N)` becomes one channel of `N` samples.
    /// - 2-D `(rows, cols)` with `rows > cols` is transposed.
    /// - 2-D `(rows, cols)` with `rows <= cols` is kept as `rows` channels.
    /// - Leading axes of size 1 (batch dimensions) are squeezed first.
    ///
    /// # Errors
    ///
    /// Returns [`PolyglotError::Synthesis`] when the shape does not match the
    /// data, has more than two significant axes, is empty, has more than
    /// [`MAX_CHANNELS`] channels, or the sample rate is zero.
    pub fn normalize(self) -> Result<Waveform> {
        let Self {
            samples,
            shape,
            sample_rate,
        } = self;

        if sample_rate == 0 {
            return Err(PolyglotError::Synthesis(
                "model reported a sample rate of 0 Hz".into(),
            ));
        }

        let expected: usize = shape.iter().product();
        if shape.is_empty() || expected != samples.len() {
            return Err(PolyglotError::Synthesis(format!(
                "model output shape {shape:?} does not match {} samples",
                samples.len()
            )));
        }
        if samples.is_empty() {
            return Err(PolyglotError::Synthesis("model returned empty audio".into()));
        }

        let mut dims = shape.as_slice();
        while dims.len() > 2 && dims[0] == 1 {
            dims = &dims[1..];
        }

        let channels = match *dims {
            [_] => vec![samples],
            [rows, cols] if rows > cols => {
                tracing::debug!(rows, cols, "transposing (samples, channels) model output");
                transpose(&samples, rows, cols)
            }
            [rows, cols] => samples
                .chunks_exact(cols.max(1))
                .take(rows)
                .map(<[f32]>::to_vec)
                .collect(),
            _ => {
                return Err(PolyglotError::Synthesis(format!(
                    "unsupported model output shape {shape:?}"
                )));
            }
        };

        Waveform::new(channels, sample_rate)
    }
}

/// Transpose row-major `(rows, cols)` data into `cols` vectors of `rows` samples.
fn transpose(data: &[f32], rows: usize, cols: usize) -> Vec<Vec<f32>> {
    let mut out = vec![Vec::with_capacity(rows); cols];
    for frame in data.chunks_exact(cols) {
        for (channel, &sample) in out.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }
    out
}

impl Waveform {
    /// Build a waveform from channel-major data.
    ///
    /// # Errors
    ///
    /// Returns [`PolyglotError::Synthesis`] if there are no channels, no
    /// samples, ragged channels, or more than [`MAX_CHANNELS`] channels.
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        if channels.is_empty() || channels[0].is_empty() {
            return Err(PolyglotError::Synthesis("model returned empty audio".into()));
        }
        if channels.len() > MAX_CHANNELS {
            return Err(PolyglotError::Synthesis(format!(
                "model returned {} channels (max {MAX_CHANNELS})",
                channels.len()
            )));
        }
        let frames = channels[0].len();
        if channels.iter().any(|c| c.len() != frames) {
            return Err(PolyglotError::Synthesis(
                "model returned channels of different lengths".into(),
            ));
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Channel-major sample data.
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of samples per channel.
    pub fn num_frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// `(channels, samples)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.num_channels(), self.num_frames())
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.num_frames() as f64 / f64::from(self.sample_rate)
    }

    /// Largest absolute sample value across all channels.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flatten()
            .map(|s| s.abs())
            .fold(0.0f32, f32::max)
    }
}
