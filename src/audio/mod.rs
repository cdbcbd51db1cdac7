//! Audio helpers: voice sample probing, waveform layout, WAV encoding, and
//! (with the `playback` feature) speaker output.

#[cfg(feature = "playback")]
pub mod playback;
pub mod probe;
pub mod waveform;
pub mod wav;

pub use probe::{AudioInfo, probe_audio_file};
pub use waveform::{MAX_CHANNELS, RawWaveform, Waveform};
pub use wav::{decode_wav_bytes, write_wav_pcm16};
