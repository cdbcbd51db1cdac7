//! Configuration types for the voice cloning front-end.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolyglotConfig {
    /// Model server settings.
    pub model: ModelConfig,
    /// Auto-translation settings.
    pub translation: TranslationConfig,
    /// Output file and scratch file settings.
    pub output: OutputConfig,
}

/// Compute device preference for the model.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePreference {
    /// Use an accelerator when one is detected, otherwise CPU.
    #[default]
    Auto,
    /// NVIDIA CUDA.
    Cuda,
    /// Apple Metal Performance Shaders.
    Mps,
    /// General-purpose CPU execution.
    Cpu,
}

/// Chatterbox model server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Base URL of the local Chatterbox Multilingual server.
    pub base_url: String,
    /// Which compute device the model should run on.
    pub device: DevicePreference,
    /// Emotion exaggeration passed to the model (0.25–2.0).
    pub exaggeration: f32,
    /// Classifier-free guidance weight (0.0–1.0).
    pub cfg_weight: f32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Seconds to wait for the TCP connection to the server.
    ///
    /// Generation itself has no timeout: long texts on CPU can take minutes.
    pub connect_timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_owned(),
            device: DevicePreference::Auto,
            exaggeration: 0.5,
            cfg_weight: 0.5,
            temperature: 0.8,
            connect_timeout_secs: 5,
        }
    }
}

/// Translation service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Translate input text into the target language before synthesis.
    pub enabled: bool,
    /// Base URL of a LibreTranslate-compatible service.
    pub base_url: String,
    /// Optional API key sent with each request.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "http://127.0.0.1:5000".to_owned(),
            api_key: None,
            timeout_secs: 15,
        }
    }
}

/// Where generated audio is written.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Single slot at `output.path`, overwritten by every generation.
    ///
    /// Only correct with one in-flight request at a time.
    #[default]
    Fixed,
    /// A uniquely named file per generation inside `output.dir`.
    PerRequest,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output slot policy.
    pub mode: OutputMode,
    /// Output file for [`OutputMode::Fixed`].
    pub path: PathBuf,
    /// Output directory for [`OutputMode::PerRequest`].
    pub dir: PathBuf,
    /// Directory for voice sample scratch files (None = system temp dir).
    pub scratch_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::Fixed,
            path: PathBuf::from("output.wav"),
            dir: PathBuf::from("generated"),
            scratch_dir: None,
        }
    }
}

/// Application config directory.
///
/// Resolves to `dirs::config_dir()/polyglot/` by default. Override with the
/// `POLYGLOT_CONFIG_DIR` environment variable.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("POLYGLOT_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("polyglot"))
        .unwrap_or_else(|| PathBuf::from("/tmp/polyglot-config"))
}

impl PolyglotConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::PolyglotError::Config(e.to_string()))
    }

    /// Load from `path` when given, else from the default path if it exists,
    /// else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit or existing default file cannot be parsed.
    pub fn load(path: Option<&std::path::Path>) -> crate::error::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::default_config_path();
                if default_path.is_file() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::PolyglotError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `<config_dir>/config.toml`.
    pub fn default_config_path() -> PathBuf {
        config_dir().join("config.toml")
    }
}
