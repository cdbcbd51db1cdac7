//! Generation requests and input validation.

use crate::error::{PolyglotError, Result};
use crate::language::Language;
use std::path::Path;

/// Bytes of an uploaded voice recording.
#[derive(Clone)]
pub struct VoiceSample {
    bytes: Vec<u8>,
    file_name: Option<String>,
}

impl std::fmt::Debug for VoiceSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceSample")
            .field("bytes", &self.bytes.len())
            .field("file_name", &self.file_name)
            .finish()
    }
}

impl VoiceSample {
    /// Wrap uploaded bytes.
    pub fn from_bytes(bytes: Vec<u8>, file_name: Option<String>) -> Self {
        Self { bytes, file_name }
    }

    /// Read a sample from disk, as an upload would deliver it.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub async fn from_file(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        Ok(Self { bytes, file_name })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Name of the uploaded file, when known.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }
}

/// One user action: clone `voice_sample` speaking `text` in `language`.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Uploaded voice sample. `None` when the user has not uploaded one.
    pub voice_sample: Option<VoiceSample>,
    /// Text to speak.
    pub text: String,
    /// Target language.
    pub language: Language,
    /// Translate `text` into `language` before synthesis.
    pub auto_translate: bool,
}

impl GenerationRequest {
    pub fn new(voice_sample: Option<VoiceSample>, text: impl Into<String>, language: Language) -> Self {
        Self {
            voice_sample,
            text: text.into(),
            language,
            auto_translate: false,
        }
    }

    pub fn with_auto_translate(mut self, enabled: bool) -> Self {
        self.auto_translate = enabled;
        self
    }

    /// Check that a voice sample and non-blank text are present.
    ///
    /// # Errors
    ///
    /// Returns [`PolyglotError::Validation`] naming what is missing.
    pub fn validate(&self) -> Result<&VoiceSample> {
        let Some(sample) = self.voice_sample.as_ref() else {
            return Err(PolyglotError::Validation(
                "Please upload a voice sample (.wav file) first!".into(),
            ));
        };
        if self.text.trim().is_empty() {
            return Err(PolyglotError::Validation(
                "Please enter some text to generate!".into(),
            ));
        }
        Ok(sample)
    }
}
