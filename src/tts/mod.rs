//! Text-to-speech model boundary.
//!
//! The synthesis model is an external collaborator. [`SpeechModel`] is the
//! seam the pipeline talks to; [`ChatterboxModel`] reaches a local Chatterbox
//! Multilingual server over HTTP, and [`ModelLoader`] makes sure it is only
//! loaded once per process.

mod chatterbox;
mod loader;

pub use chatterbox::ChatterboxModel;
pub use loader::ModelLoader;

use crate::audio::RawWaveform;
use crate::error::Result;
use crate::system_profile::Device;
use async_trait::async_trait;
use std::path::Path;

/// A zero-shot voice cloning TTS model.
#[async_trait]
pub trait SpeechModel: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Device the model runs on.
    fn device(&self) -> Device;

    /// Synthesize `text` in `language_id`, cloning the voice in `audio_prompt_path`.
    ///
    /// May take from well under a second to tens of seconds. No timeout is
    /// applied here.
    ///
    /// # Errors
    ///
    /// Returns [`PolyglotError::Synthesis`](crate::error::PolyglotError::Synthesis)
    /// if the model fails.
    async fn generate(
        &self,
        text: &str,
        language_id: &str,
        audio_prompt_path: &Path,
    ) -> Result<RawWaveform>;
}
