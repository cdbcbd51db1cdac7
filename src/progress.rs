//! Progress event types for the synthesis pipeline.
//!
//! Provides callback-based progress reporting that decouples the pipeline
//! from presentation (CLI spinner, logs, or anything else).

use crate::audio::AudioInfo;
use crate::language::Language;
use crate::translate::TranslationOutcome;
use std::path::PathBuf;

/// Progress events emitted while a generation request runs.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// The voice sample was decoded successfully.
    SampleProbed {
        /// Properties of the uploaded sample.
        info: AudioInfo,
    },

    /// The translation stage finished (only emitted when auto-translate is on).
    TranslationFinished {
        /// What happened to the input text.
        outcome: TranslationOutcome,
    },

    /// The model call has started. Presentation should show a busy indicator.
    GenerationStarted {
        /// Display name of the target language.
        language: String,
        /// Number of characters being synthesized.
        text_chars: usize,
    },

    /// The model call returned.
    GenerationFinished {
        /// Wall-clock time spent in the model, in seconds.
        duration_secs: f64,
    },

    /// The output file was written.
    OutputWritten {
        /// Where the audio was written.
        path: PathBuf,
    },

    /// The request failed.
    Error {
        /// Human-readable error description.
        message: String,
    },
}

/// Callback type for receiving progress events.
pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// The status line a front end prints for `event`, if it has one.
///
/// Only the sample summary and the translation note are status lines; the
/// remaining events drive the busy indicator instead.
pub fn status_line(event: &ProgressEvent, target: Language) -> Option<String> {
    match event {
        ProgressEvent::SampleProbed { info } => Some(format!(
            "Voice sample: {} channel(s), {} Hz, {:.2} s",
            info.channels,
            info.sample_rate,
            info.duration_secs()
        )),
        ProgressEvent::TranslationFinished { outcome } => {
            let note = outcome.note(target)?;
            if outcome.is_warning() {
                Some(format!("Warning: {note}"))
            } else {
                Some(note)
            }
        }
        _ => None,
    }
}
