//! Provider adapter boundary.
//!
//! The retry engine and services depend only on the traits defined here;
//! concrete SDK/HTTP details live behind them. Every failure an adapter
//! can raise belongs to the closed [`ProviderError`] set, all of which
//! are transient and therefore retryable with rotation. Failures in
//! *interpreting* a successful response are not provider errors; they
//! surface as [`crate::Error::Validation`] downstream.

pub mod cerebras;
pub mod groq;

use crate::config::SamplingParams;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Transient failure raised by a provider call. The closed set mirrors
/// the rate-limit / status / connection triad every provider SDK exposes
/// in some shape; adapters map their concrete errors into it.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("API status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("connection error: {0}")]
    Connection(String),
}

impl ProviderError {
    /// Map an HTTP response status onto the error set.
    pub(crate) fn from_status(status: u16, body: String) -> Self {
        if status == 429 {
            ProviderError::RateLimited(body)
        } else {
            ProviderError::Status {
                status,
                message: body,
            }
        }
    }
}

/// Raw transcription payload before normalization. Providers return
/// either a plain string (`response_format=text`) or a JSON object
/// exposing a text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTranscription {
    Plain(String),
    Verbose { text: String },
}

/// Speech-to-text backend.
#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    async fn transcribe(
        &self,
        audio: Bytes,
        filename: &str,
        model: &str,
        credential: &str,
        language: Option<&str>,
    ) -> Result<RawTranscription, ProviderError>;
}

/// One chat-completion call, borrowed from the owning service for the
/// duration of the attempt.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system_prompt: &'a str,
    pub user_message: &'a str,
    pub credential: &'a str,
    pub model: &'a str,
    pub sampling: &'a SamplingParams,
}

/// Chat-completion backend. Returns the raw assistant text; parsing is
/// the caller's concern.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError>;
}
