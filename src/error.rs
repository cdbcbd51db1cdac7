//! Error types for the voice cloning pipeline.
//!
//! Each variant carries a stable error code (SCREAMING_SNAKE_CASE) accessible
//! via [`PolyglotError::code()`], and a user-facing rendering via
//! [`PolyglotError::user_message()`].

/// Stable error codes for programmatic error handling.
pub mod error_codes {
    /// Missing voice sample or empty text.
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";

    /// Uploaded voice sample is not decodable audio.
    pub const AUDIO_DECODE_FAILED: &str = "AUDIO_DECODE_FAILED";

    /// Translation service call failed (never fatal to a generation).
    pub const TRANSLATION_FAILED: &str = "TRANSLATION_FAILED";

    /// The model call or output encoding failed.
    pub const SYNTHESIS_FAILED: &str = "SYNTHESIS_FAILED";

    /// The model could not be loaded.
    pub const MODEL_LOAD_FAILED: &str = "MODEL_LOAD_FAILED";

    /// Invalid or unreadable configuration.
    pub const CONFIG_INVALID: &str = "CONFIG_INVALID";

    /// Filesystem error.
    pub const IO_ERROR: &str = "IO_ERROR";

    /// The generated audio could not be played.
    pub const PLAYBACK_FAILED: &str = "PLAYBACK_FAILED";
}

/// Top-level error type for the voice cloning front-end.
#[derive(Debug, thiserror::Error)]
pub enum PolyglotError {
    /// Required input is missing. The user must correct the input.
    #[error("validation error: {0}")]
    Validation(String),

    /// The voice sample could not be decoded. The user must re-upload.
    #[error("audio decode error: {0}")]
    AudioDecode(String),

    /// Translation failed. Absorbed by the translation stage.
    #[error("translation error: {0}")]
    Translation(String),

    /// The model call or output encoding failed. The request is abandoned.
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// Model loading error (server unreachable, unhealthy, misconfigured).
    #[error("model error: {0}")]
    Model(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Audio output device error.
    #[error("playback error: {0}")]
    Playback(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PolyglotError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => error_codes::VALIDATION_FAILED,
            Self::AudioDecode(_) => error_codes::AUDIO_DECODE_FAILED,
            Self::Translation(_) => error_codes::TRANSLATION_FAILED,
            Self::Synthesis(_) => error_codes::SYNTHESIS_FAILED,
            Self::Model(_) => error_codes::MODEL_LOAD_FAILED,
            Self::Config(_) => error_codes::CONFIG_INVALID,
            Self::Playback(_) => error_codes::PLAYBACK_FAILED,
            Self::Io(_) => error_codes::IO_ERROR,
        }
    }

    /// Message suitable for showing to the end user.
    ///
    /// Validation messages are shown as-is. Unreadable uploads get a re-upload
    /// hint. Everything else is reported as a failed generation with the cause.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::AudioDecode(message) => format!("Could not read audio file: {message}"),
            Self::Playback(message) => format!("Could not play audio: {message}"),
            Self::Io(e) => format!("An error occurred during generation: {e}"),
            Self::Translation(message)
            | Self::Synthesis(message)
            | Self::Model(message)
            | Self::Config(message) => {
                format!("An error occurred during generation: {message}")
            }
        }
    }

    /// Whether the user has to fix their input (as opposed to a system failure).
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::AudioDecode(_))
    }

    /// Process exit status for a front end: 2 when the input needs fixing, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_user_error() { 2 } else { 1 }
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, PolyglotError>;
