//! HTTP client for a local Chatterbox Multilingual inference server.
//!
//! The server wraps `ChatterboxMultilingualTTS.generate(text, language_id,
//! audio_prompt_path)`. It shares the filesystem with this process, so the
//! voice sample is passed by path.
//!
//! Endpoints:
//! - `GET /health`: liveness, optionally `{"status": "...", "sample_rate": N}`.
//! - `POST /generate`: returns either `audio/wav` bytes or the raw tensor as
//!   JSON `{"sample_rate": N, "shape": [...], "samples": [...]}`.

use super::SpeechModel;
use crate::audio::{RawWaveform, decode_wav_bytes};
use crate::config::ModelConfig;
use crate::error::{PolyglotError, Result};
use crate::system_profile::Device;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    text: &'a str,
    language_id: &'a str,
    audio_prompt_path: String,
    device: &'static str,
    exaggeration: f32,
    cfg_weight: f32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct TensorResponse {
    sample_rate: u32,
    shape: Vec<usize>,
    samples: Vec<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct HealthResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    sample_rate: Option<u32>,
}

/// Chatterbox Multilingual reached over HTTP.
pub struct ChatterboxModel {
    config: ModelConfig,
    device: Device,
    client: reqwest::Client,
}

impl std::fmt::Debug for ChatterboxModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatterboxModel")
            .field("base_url", &self.config.base_url)
            .field("device", &self.device)
            .finish()
    }
}

impl ChatterboxModel {
    /// Connect to the server and verify it is healthy.
    ///
    /// # Errors
    ///
    /// Returns [`PolyglotError::Model`] if the server is unreachable or unhealthy.
    pub async fn connect(config: &ModelConfig, device: Device) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs.max(1)))
            .build()
            .map_err(|e| PolyglotError::Model(format!("failed to build HTTP client: {e}")))?;

        let model = Self {
            config: config.clone(),
            device,
            client,
        };

        let health = model.health().await?;
        info!(
            base_url = %model.config.base_url,
            device = %device,
            status = health.status.as_deref().unwrap_or("ok"),
            sample_rate = ?health.sample_rate,
            "Chatterbox model ready"
        );
        Ok(model)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'))
    }

    async fn health(&self) -> Result<HealthResponse> {
        let url = self.url("health");
        let response = self.client.get(&url).send().await.map_err(|e| {
            PolyglotError::Model(format!("Chatterbox server unreachable at {url}: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PolyglotError::Model(format!(
                "Chatterbox server unhealthy (HTTP {}): {}",
                status.as_u16(),
                extract_error_message(&body)
            )));
        }

        // Older servers answer with plain text; the body is informational only.
        Ok(response.json().await.unwrap_or_default())
    }
}

/// Extract an error message from a JSON error body (`detail` or `error`).
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("detail")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl SpeechModel for ChatterboxModel {
    fn name(&self) -> &str {
        "chatterbox-multilingual"
    }

    fn device(&self) -> Device {
        self.device
    }

    async fn generate(
        &self,
        text: &str,
        language_id: &str,
        audio_prompt_path: &Path,
    ) -> Result<RawWaveform> {
        let body = GenerateBody {
            text,
            language_id,
            audio_prompt_path: audio_prompt_path.to_string_lossy().into_owned(),
            device: self.device.as_str(),
            exaggeration: self.config.exaggeration,
            cfg_weight: self.config.cfg_weight,
            temperature: self.config.temperature,
        };

        debug!(language_id, chars = text.chars().count(), "requesting generation");
        let start = Instant::now();

        let response = self
            .client
            .post(self.url("generate"))
            .json(&body)
            .send()
            .await
            .map_err(|e| PolyglotError::Synthesis(format!("Chatterbox request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PolyglotError::Synthesis(format!(
                "Chatterbox HTTP {}: {}",
                status.as_u16(),
                extract_error_message(&body)
            )));
        }

        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        let bytes = response.bytes().await.map_err(|e| {
            PolyglotError::Synthesis(format!("failed to read Chatterbox response: {e}"))
        })?;

        let raw = if is_json {
            let tensor: TensorResponse = serde_json::from_slice(&bytes).map_err(|e| {
                PolyglotError::Synthesis(format!("malformed Chatterbox tensor response: {e}"))
            })?;
            RawWaveform {
                samples: tensor.samples,
                shape: tensor.shape,
                sample_rate: tensor.sample_rate,
            }
        } else {
            decode_wav_bytes(&bytes)?
        };

        info!(
            samples = raw.samples.len(),
            shape = ?raw.shape,
            sample_rate = raw.sample_rate,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Chatterbox generation finished"
        );

        Ok(raw)
    }
}
