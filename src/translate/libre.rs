//! LibreTranslate-compatible HTTP translation client.

use super::{Translation, Translator};
use crate::config::TranslationConfig;
use crate::error::{PolyglotError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    q: &'a str,
    source: &'static str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
    #[serde(default)]
    detected_language: Option<DetectedLanguage>,
}

#[derive(Debug, Deserialize)]
struct DetectedLanguage {
    language: String,
}

#[derive(Debug, Deserialize)]
struct LanguageEntry {
    code: String,
}

/// Client for `POST /translate` on a LibreTranslate-compatible server.
pub struct LibreTranslateClient {
    config: TranslationConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for LibreTranslateClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibreTranslateClient")
            .field("base_url", &self.config.base_url)
            .field("has_api_key", &self.config.api_key.is_some())
            .finish()
    }
}

impl LibreTranslateClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns [`PolyglotError::Config`] if the HTTP client cannot be built.
    pub fn new(config: TranslationConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| PolyglotError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'))
    }

    /// Language codes the service can translate into (`GET /languages`).
    ///
    /// # Errors
    ///
    /// Returns [`PolyglotError::Translation`] if the service is unreachable or
    /// answers with something other than a language list.
    pub async fn supported_languages(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(self.url("languages"))
            .send()
            .await
            .map_err(|e| PolyglotError::Translation(format!("translation service unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PolyglotError::Translation(format!(
                "translation HTTP {}",
                status.as_u16()
            )));
        }

        let entries: Vec<LanguageEntry> = response.json().await.map_err(|e| {
            PolyglotError::Translation(format!("malformed language list: {e}"))
        })?;
        Ok(entries.into_iter().map(|l| l.code).collect())
    }
}

#[async_trait]
impl Translator for LibreTranslateClient {
    async fn translate(&self, text: &str, target_code: &str) -> Result<Translation> {
        let body = TranslateBody {
            q: text,
            source: "auto",
            target: target_code,
            format: "text",
            api_key: self.config.api_key.as_deref(),
        };

        let response = self
            .client
            .post(self.url("translate"))
            .json(&body)
            .send()
            .await
            .map_err(|e| PolyglotError::Translation(format!("translation request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or(body);
            return Err(PolyglotError::Translation(format!(
                "translation HTTP {}: {message}",
                status.as_u16()
            )));
        }

        let parsed: TranslateResponse = response.json().await.map_err(|e| {
            PolyglotError::Translation(format!("malformed translation response: {e}"))
        })?;

        Ok(Translation {
            text: parsed.translated_text,
            detected_source: parsed
                .detected_language
                .map(|d| d.language)
                .unwrap_or_default(),
        })
    }
}
