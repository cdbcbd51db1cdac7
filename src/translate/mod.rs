//! Optional auto-translation of the input text into the target language.
//!
//! Translation is best-effort. [`translate_or_fallback`] never fails: any
//! problem is turned into [`TranslationOutcome::Failed`] and the original
//! text goes on to synthesis.

mod libre;

pub use libre::LibreTranslateClient;

use crate::error::Result;
use crate::language::Language;
use async_trait::async_trait;
use tracing::{info, warn};

/// A successful translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Translated text.
    pub text: String,
    /// Language code the service detected for the input.
    pub detected_source: String,
}

/// External translation service.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_code`.
    ///
    /// # Errors
    ///
    /// Returns [`PolyglotError::Translation`](crate::error::PolyglotError::Translation)
    /// on any network, service, or decoding failure.
    async fn translate(&self, text: &str, target_code: &str) -> Result<Translation>;
}

/// What the translation stage did with the input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// Auto-translate was not requested.
    Disabled,
    /// The text was already in the target language; used unchanged.
    AlreadyTarget { detected: String },
    /// The text was translated.
    Translated { detected: String, text: String },
    /// Translation failed; the original text was used.
    Failed { reason: String },
}

impl TranslationOutcome {
    /// Human-readable note for the presentation layer, if any.
    pub fn note(&self, target: Language) -> Option<String> {
        match self {
            Self::Disabled => None,
            Self::AlreadyTarget { .. } => Some(format!(
                "Text is already in {}; no translation needed.",
                target.display_name()
            )),
            Self::Translated { detected, text } => Some(format!(
                "Translated from '{detected}' to {}: {text}",
                target.display_name()
            )),
            Self::Failed { reason } => Some(format!(
                "Translation failed ({reason}); using the original text."
            )),
        }
    }

    /// Whether the stage degraded to the original text after an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Run the translation stage and return the text to synthesize.
///
/// With `translator` set to `None` while translation was requested, the
/// stage reports a failure and keeps the original text.
pub async fn translate_or_fallback(
    translator: Option<&dyn Translator>,
    text: &str,
    target: Language,
) -> (String, TranslationOutcome) {
    let Some(translator) = translator else {
        return (
            text.to_owned(),
            TranslationOutcome::Failed {
                reason: "no translation service configured".to_owned(),
            },
        );
    };

    match translator.translate(text, target.code()).await {
        Ok(translation) if translation.detected_source.eq_ignore_ascii_case(target.code()) => {
            info!(target = target.code(), "text already in target language");
            (
                text.to_owned(),
                TranslationOutcome::AlreadyTarget {
                    detected: translation.detected_source,
                },
            )
        }
        Ok(translation) if translation.text.trim().is_empty() => {
            warn!(target = target.code(), "translation came back empty; using original text");
            (
                text.to_owned(),
                TranslationOutcome::Failed {
                    reason: "translation service returned empty text".to_owned(),
                },
            )
        }
        Ok(translation) => {
            info!(
                from = %translation.detected_source,
                target = target.code(),
                "translated input text"
            );
            (
                translation.text.clone(),
                TranslationOutcome::Translated {
                    detected: translation.detected_source,
                    text: translation.text,
                },
            )
        }
        Err(e) => {
            warn!(error = %e, "translation failed; using original text");
            (
                text.to_owned(),
                TranslationOutcome::Failed {
                    reason: e.to_string(),
                },
            )
        }
    }
}
