//! WAV encoding and decoding via `hound`.

use super::waveform::{RawWaveform, Waveform};
use crate::error::{PolyglotError, Result};
use std::io::Cursor;
use std::path::Path;

/// Write `waveform` as 16-bit PCM WAV at its own sample rate.
///
/// Samples are clamped to `[-1, 1]` before quantization. An existing file at
/// `path` is overwritten; missing parent directories are created.
///
/// # Errors
///
/// Returns [`PolyglotError::Synthesis`] if the file cannot be written.
pub fn write_wav_pcm16(path: &Path, waveform: &Waveform) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            PolyglotError::Synthesis(format!(
                "failed to create output directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let spec = hound::WavSpec {
        channels: waveform.num_channels() as u16,
        sample_rate: waveform.sample_rate(),
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| PolyglotError::Synthesis(format!("failed to create wav writer: {e}")))?;

    let channels = waveform.channels();
    for i in 0..waveform.num_frames() {
        for channel in channels {
            let clamped = channel[i].clamp(-1.0, 1.0);
            let v = (clamped * i16::MAX as f32).round() as i16;
            writer
                .write_sample(v)
                .map_err(|e| PolyglotError::Synthesis(format!("failed to write wav sample: {e}")))?;
        }
    }
    writer
        .finalize()
        .map_err(|e| PolyglotError::Synthesis(format!("failed to finalize wav: {e}")))?;
    Ok(())
}

/// Decode WAV bytes returned by a model server.
///
/// The result keeps the interleaved frame layout, i.e. shape
/// `(frames, channels)`; [`RawWaveform::normalize`] turns it channel-major.
///
/// # Errors
///
/// Returns [`PolyglotError::Synthesis`] if the bytes are not a readable WAV.
pub fn decode_wav_bytes(bytes: &[u8]) -> Result<RawWaveform> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))
        .map_err(|e| PolyglotError::Synthesis(format!("model returned invalid WAV: {e}")))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<_, _>>(),
        hound::SampleFormat::Int => {
            let scale = 1.0 / (1u64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<std::result::Result<_, _>>()
        }
    }
    .map_err(|e| PolyglotError::Synthesis(format!("model returned corrupt WAV data: {e}")))?;

    let channels = usize::from(spec.channels.max(1));
    let frames = samples.len() / channels;

    Ok(RawWaveform {
        samples,
        shape: vec![frames, channels],
        sample_rate: spec.sample_rate,
    })
}
