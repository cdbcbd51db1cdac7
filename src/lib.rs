//! Polyglot: zero-shot multilingual voice cloning front-end.
//!
//! Takes a short voice recording and a piece of text, and produces a WAV file
//! of that voice speaking the text in one of 23 languages:
//! Voice sample + Text → (Translate) → Chatterbox Multilingual → WAV
//!
//! # Architecture
//!
//! - **Language registry**: the fixed set of supported languages
//! - **Audio**: probes uploads via `symphonia`, writes PCM WAV via `hound`
//! - **Translate**: optional LibreTranslate-compatible auto-translation
//! - **TTS**: the [`SpeechModel`](tts::SpeechModel) seam, loaded once per process
//! - **Pipeline**: validation, scratch files, synthesis, and output placement

pub mod audio;
pub mod config;
pub mod doctor;
pub mod error;
pub mod language;
pub mod pipeline;
pub mod progress;
pub mod system_profile;
pub mod translate;
pub mod tts;

#[cfg(test)]
mod test_utils;

pub use config::PolyglotConfig;
pub use error::{PolyglotError, Result};
pub use language::Language;
pub use pipeline::{GenerationOutcome, GenerationRequest, SynthesisPipeline, VoiceSample};
pub use progress::{ProgressCallback, ProgressEvent, status_line};
