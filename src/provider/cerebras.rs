//! Cerebras chat-completion adapter.

use super::{CompletionBackend, CompletionRequest, ProviderError};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::json;

const DEFAULT_BASE_URL: &str = "https://api.cerebras.ai/v1";

/// Chat completions over the Cerebras Cloud HTTP API. The credential
/// rotates per call; sampling parameters arrive with each request.
pub struct CerebrasCompletion {
    http_client: reqwest::Client,
    base_url: String,
}

impl CerebrasCompletion {
    pub fn builder() -> CerebrasCompletionBuilder {
        CerebrasCompletionBuilder::new()
    }
}

#[async_trait]
impl CompletionBackend for CerebrasCompletion {
    async fn complete(
        &self,
        request: CompletionRequest<'_>,
    ) -> std::result::Result<String, ProviderError> {
        let endpoint = format!(
            "{}/chat/completions",
            self.base_url.trim_end_matches('/')
        );

        let body = json!({
            "model": request.model,
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": request.user_message },
            ],
            "temperature": request.sampling.temperature,
            "max_completion_tokens": request.sampling.max_tokens,
            "top_p": request.sampling.top_p,
            "stream": false,
        });

        let response = self
            .http_client
            .post(&endpoint)
            .bearer_auth(request.credential)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Connection(format!("failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(ProviderError::from_status(status.as_u16(), text));
        }

        // A 2xx body that is not the expected completion envelope is a
        // provider-side fault, distinct from the model emitting bad JSON.
        let envelope: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            ProviderError::Status {
                status: status.as_u16(),
                message: format!("malformed completion envelope: {e}"),
            }
        })?;

        Ok(envelope
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string())
    }
}

pub struct CerebrasCompletionBuilder {
    base_url: Option<String>,
    timeout_secs: u64,
}

impl CerebrasCompletionBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout_secs: 60,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<CerebrasCompletion> {
        let base_url = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("failed to create HTTP client: {e}")))?;
        Ok(CerebrasCompletion {
            http_client,
            base_url,
        })
    }
}

impl Default for CerebrasCompletionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
