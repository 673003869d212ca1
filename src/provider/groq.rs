//! Groq Whisper transcription adapter.

use super::{ProviderError, RawTranscription, TranscriptionBackend};
use crate::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Speech-to-text over the Groq Whisper HTTP API. One shared HTTP
/// client; the credential is supplied per call so the same adapter
/// serves every key in the pool.
pub struct GroqTranscription {
    http_client: reqwest::Client,
    base_url: String,
    endpoint_path: String,
}

impl GroqTranscription {
    pub fn builder() -> GroqTranscriptionBuilder {
        GroqTranscriptionBuilder::new()
    }
}

#[async_trait]
impl TranscriptionBackend for GroqTranscription {
    async fn transcribe(
        &self,
        audio: Bytes,
        filename: &str,
        model: &str,
        credential: &str,
        language: Option<&str>,
    ) -> std::result::Result<RawTranscription, ProviderError> {
        let endpoint = format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint_path
        );

        let part = reqwest::multipart::Part::bytes(audio.to_vec())
            .file_name(filename.to_string())
            .mime_str("audio/wav")
            .map_err(|e| ProviderError::Connection(format!("invalid mime: {e}")))?;
        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", model.to_string())
            .text("response_format", "text");
        if let Some(lang) = language {
            form = form.text("language", lang.to_string());
        }

        let response = self
            .http_client
            .post(&endpoint)
            .bearer_auth(credential)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Connection(format!("failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(ProviderError::from_status(status.as_u16(), body));
        }

        // `response_format=text` yields the transcript itself, but some
        // deployments answer with a JSON object carrying a text field.
        if let Ok(serde_json::Value::Object(obj)) = serde_json::from_str(&body) {
            if let Some(text) = obj.get("text").and_then(|v| v.as_str()) {
                return Ok(RawTranscription::Verbose {
                    text: text.to_string(),
                });
            }
        }

        Ok(RawTranscription::Plain(body))
    }
}

/// Builder in the usual shape: model-independent transport settings
/// only, since models rotate per call.
pub struct GroqTranscriptionBuilder {
    base_url: Option<String>,
    endpoint_path: Option<String>,
    timeout_secs: u64,
}

impl GroqTranscriptionBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            endpoint_path: None,
            timeout_secs: 60,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = Some(path.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<GroqTranscription> {
        let base_url = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let endpoint_path = normalize_path(
            self.endpoint_path
                .unwrap_or_else(|| "/audio/transcriptions".to_string()),
        );
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("failed to create HTTP client: {e}")))?;
        Ok(GroqTranscription {
            http_client,
            base_url,
            endpoint_path,
        })
    }
}

impl Default for GroqTranscriptionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn normalize_path(path: String) -> String {
    if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}
