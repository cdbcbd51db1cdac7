//! The voice cloning request path: validate, decode, translate, synthesize, write.

use super::output::{output_path, write_scratch_sample};
use super::request::GenerationRequest;
use crate::audio::{AudioInfo, probe_audio_file, write_wav_pcm16};
use crate::config::OutputConfig;
use crate::error::Result;
use crate::language::Language;
use crate::progress::{ProgressCallback, ProgressEvent};
use crate::system_profile::Device;
use crate::translate::{TranslationOutcome, Translator, translate_or_fallback};
use crate::tts::SpeechModel;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Everything the presentation layer needs to report a finished generation.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Where the audio was written.
    pub output_path: PathBuf,
    /// Suggested file name for downloads, e.g. `polyglot_es.wav`.
    pub download_name: String,
    pub language: Language,
    /// Sample rate reported by the model.
    pub sample_rate: u32,
    pub channels: usize,
    pub duration_secs: f64,
    /// Text actually sent to the model (after translation, if any).
    pub text: String,
    /// Length of the user's input text in characters.
    pub text_chars: usize,
    /// Properties of the uploaded voice sample.
    pub sample: AudioInfo,
    pub translation: TranslationOutcome,
    /// Device the model ran on.
    pub device: Device,
}

/// Runs generation requests against an injected model.
///
/// The pipeline holds no per-request state. The only shared state it touches
/// is the output location, which in fixed mode is a single file.
pub struct SynthesisPipeline {
    model: Arc<dyn SpeechModel>,
    translator: Option<Arc<dyn Translator>>,
    output: OutputConfig,
    progress: Option<ProgressCallback>,
}

impl std::fmt::Debug for SynthesisPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisPipeline")
            .field("model", &self.model.name())
            .field("translator", &self.translator.is_some())
            .field("output", &self.output)
            .finish()
    }
}

impl SynthesisPipeline {
    pub fn new(model: Arc<dyn SpeechModel>, output: OutputConfig) -> Self {
        Self {
            model,
            translator: None,
            output,
            progress: None,
        }
    }

    /// Attach a translation service for requests with auto-translate on.
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Attach a progress callback.
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Run one request end to end.
    ///
    /// The uploaded sample is copied to a scratch file that is removed on
    /// every exit path. On failure an [`ProgressEvent::Error`] carrying the
    /// user-facing message is emitted before the error is returned.
    ///
    /// # Errors
    ///
    /// - [`Validation`](crate::error::PolyglotError::Validation) when the sample
    ///   or text is missing. Nothing else runs.
    /// - [`AudioDecode`](crate::error::PolyglotError::AudioDecode) when the
    ///   sample is not readable mono/stereo audio. The model is not called.
    /// - [`Synthesis`](crate::error::PolyglotError::Synthesis) when the model
    ///   fails or its output cannot be normalized or written.
    pub async fn synthesize(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
        let result = self.run(request).await;
        if let Err(e) = &result {
            warn!(code = e.code(), error = %e, "generation failed");
            self.emit(ProgressEvent::Error {
                message: e.user_message(),
            });
        }
        result
    }

    /// Like [`synthesize`](Self::synthesize), but renders failures as the
    /// message to show the user.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<GenerationOutcome, String> {
        self.synthesize(request).await.map_err(|e| e.user_message())
    }

    async fn run(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
        let sample = request.validate()?;
        let language = request.language;

        let scratch = write_scratch_sample(sample.bytes(), self.output.scratch_dir.as_deref())?;
        debug!(
            file_name = sample.file_name().unwrap_or("<upload>"),
            path = %scratch.path().display(),
            bytes = sample.bytes().len(),
            "voice sample staged"
        );

        let info = probe_audio_file(scratch.path())?;
        info!(
            channels = info.channels,
            sample_rate = info.sample_rate,
            duration_secs = info.duration_secs(),
            "voice sample loaded"
        );
        self.emit(ProgressEvent::SampleProbed { info });

        let (text, translation) = if request.auto_translate {
            let translator = self.translator.as_deref();
            let (text, outcome) = translate_or_fallback(translator, &request.text, language).await;
            self.emit(ProgressEvent::TranslationFinished {
                outcome: outcome.clone(),
            });
            (text, outcome)
        } else {
            (request.text.clone(), TranslationOutcome::Disabled)
        };

        let text_chars = text.chars().count();
        self.emit(ProgressEvent::GenerationStarted {
            language: language.display_name().to_owned(),
            text_chars,
        });
        let started = Instant::now();
        let raw = self
            .model
            .generate(&text, language.code(), scratch.path())
            .await?;
        let elapsed = started.elapsed().as_secs_f64();
        self.emit(ProgressEvent::GenerationFinished {
            duration_secs: elapsed,
        });

        let waveform = raw.normalize()?;
        let peak = waveform.peak();
        if peak > 1.0 {
            warn!(peak, "model output exceeds full scale; clipping");
        }
        let path = output_path(&self.output, language);
        write_wav_pcm16(&path, &waveform)?;
        info!(
            path = %path.display(),
            language = language.code(),
            channels = waveform.num_channels(),
            sample_rate = waveform.sample_rate(),
            peak,
            elapsed_secs = elapsed,
            "generation complete"
        );
        self.emit(ProgressEvent::OutputWritten { path: path.clone() });

        Ok(GenerationOutcome {
            output_path: path,
            download_name: language.download_file_name(),
            language,
            sample_rate: waveform.sample_rate(),
            channels: waveform.num_channels(),
            duration_secs: waveform.duration_secs(),
            text,
            text_chars: request.text.chars().count(),
            sample: info,
            translation,
            device: self.model.device(),
        })
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(cb) = &self.progress {
            cb(event);
        }
    }
}
