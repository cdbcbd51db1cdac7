//! Voice sample probing.
//!
//! Decodes an uploaded file end to end to prove it is real audio and to
//! report its channel count, sample rate and duration before any model time
//! is spent on it.

use crate::error::{PolyglotError, Result};
use std::path::Path;

/// Basic properties of a decoded audio file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioInfo {
    /// Number of interleaved channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of frames (samples per channel).
    pub frames: u64,
}

impl AudioInfo {
    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames as f64 / f64::from(self.sample_rate)
    }
}

/// Probe and fully decode the audio file at `path`.
///
/// # Errors
///
/// Returns [`PolyglotError::AudioDecode`] if the file cannot be opened or
/// decoded, contains no frames, or is neither mono nor stereo.
pub fn probe_audio_file(path: &Path) -> Result<AudioInfo> {
    use symphonia::core::codecs::DecoderOptions;
    use symphonia::core::errors::Error as SymphError;
    use symphonia::core::formats::FormatOptions;
    use symphonia::core::io::MediaSourceStream;
    use symphonia::core::meta::MetadataOptions;
    use symphonia::core::probe::Hint;

    let file = std::fs::File::open(path)
        .map_err(|e| PolyglotError::AudioDecode(format!("failed to open audio: {e}")))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| PolyglotError::AudioDecode(format!("failed to probe audio: {e}")))?;

    let mut format = probed.format;
    let track = format
        .default_track()
        .ok_or_else(|| PolyglotError::AudioDecode("no default audio track".into()))?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| PolyglotError::AudioDecode("unknown sample rate".into()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| PolyglotError::AudioDecode(format!("failed to create decoder: {e}")))?;

    let mut channels = codec_params.channels.map(|c| c.count()).unwrap_or(0);
    let mut frames: u64 = 0;

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(PolyglotError::AudioDecode(format!("audio read error: {e}"))),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder
            .decode(&packet)
            .map_err(|e| PolyglotError::AudioDecode(format!("audio decode error: {e}")))?;

        channels = decoded.spec().channels.count();
        frames += decoded.frames() as u64;
    }

    if frames == 0 {
        return Err(PolyglotError::AudioDecode("audio contains no samples".into()));
    }
    if !(1..=2).contains(&channels) {
        return Err(PolyglotError::AudioDecode(format!(
            "expected a mono or stereo recording, got {channels} channels"
        )));
    }

    let info = AudioInfo {
        channels: channels as u16,
        sample_rate,
        frames,
    };

    tracing::debug!(
        channels = info.channels,
        sample_rate = info.sample_rate,
        duration_secs = info.duration_secs(),
        "probed voice sample"
    );

    Ok(info)
}
