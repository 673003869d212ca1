//! Transcription service: audio bytes in, transcript text out.

use crate::config::{TranscriptionConfig, DEFAULT_WHISPER_MODELS};
use crate::pool::{CredentialPool, ModelPool, Pool};
use crate::provider::TranscriptionBackend;
use crate::retry::{self, RetryPolicy};
use crate::types::TranscriptionResult;
use crate::{validate, Result};
use bytes::Bytes;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Composes the credential and model pools, a transcription backend,
/// and the retry engine. Owns its pools and cursors exclusively.
pub struct TranscriptionService {
    credentials: CredentialPool,
    models: ModelPool,
    backend: Arc<dyn TranscriptionBackend>,
    policy: RetryPolicy,
}

impl std::fmt::Debug for TranscriptionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptionService")
            .field("credentials", &self.credentials)
            .field("models", &self.models)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl TranscriptionService {
    /// Build the service from configuration. An empty credential list is
    /// a configuration error; an empty model list falls back to the
    /// built-in Whisper pair.
    pub fn new(
        config: TranscriptionConfig,
        backend: Arc<dyn TranscriptionBackend>,
    ) -> Result<Self> {
        let credentials = Pool::new("credential", &config.api_keys)?;
        let models = if config.models.is_empty() {
            Pool::new("model", DEFAULT_WHISPER_MODELS)?
        } else {
            Pool::new("model", &config.models)?
        };

        tracing::info!(
            keys = credentials.len(),
            models = models.len(),
            "transcription service initialised"
        );

        Ok(Self {
            credentials,
            models,
            backend,
            policy: RetryPolicy::default(),
        })
    }

    /// Transcribe an audio clip, rotating through every credential and
    /// model before giving up.
    ///
    /// The attempt budget is `max(|credentials|, |models|) * 2`. The two
    /// cursors advance independently per attempt; with unequal pool
    /// sizes some (credential, model) pairs may never be tried within
    /// the budget.
    ///
    /// `filename` is a format hint for the provider (e.g. `clip.wav`);
    /// `language` is a BCP-47 code, `None` for auto-detection. All
    /// provider failures here are transient, so there is no fatal path:
    /// the terminal error is always `ExhaustedRetries`.
    pub async fn transcribe(
        &self,
        audio: Bytes,
        filename: &str,
        language: Option<&str>,
    ) -> Result<TranscriptionResult> {
        let budget = self
            .policy
            .budget([self.credentials.len(), self.models.len()]);
        let invocation_id = Uuid::new_v4();
        let span = tracing::info_span!("transcribe", %invocation_id, filename);

        async {
            let text = retry::invoke("transcribe", budget, |attempt| {
                let credential = self.credentials.next().to_string();
                let model = self.models.next().to_string();
                let audio = audio.clone();
                let backend = Arc::clone(&self.backend);
                async move {
                    tracing::debug!(attempt, model = %model, "transcription attempt");
                    let raw = backend
                        .transcribe(audio, filename, &model, &credential, language)
                        .await?;
                    Ok(validate::transcript_text(raw))
                }
            })
            .await?;

            tracing::info!(chars = text.len(), "transcription successful");
            Ok(TranscriptionResult { text })
        }
        .instrument(span)
        .await
    }

    pub fn credential_count(&self) -> usize {
        self.credentials.len()
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }
}
