//! Analysis service: transcript in, structured meeting report out.

use crate::config::{AnalysisConfig, SamplingParams};
use crate::pool::{CredentialPool, Pool};
use crate::prompt::{self, SYSTEM_PROMPT};
use crate::provider::{CompletionBackend, CompletionRequest};
use crate::retry::{self, AttemptError, RetryPolicy};
use crate::types::{AnalysisResult, RecordingMetadata};
use crate::{validate, Result};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Composes the credential pool, a completion backend, the prompt
/// builder, and the retry engine. A single configured model; only
/// credentials rotate.
pub struct AnalysisService {
    credentials: CredentialPool,
    model: String,
    sampling: SamplingParams,
    backend: Arc<dyn CompletionBackend>,
    policy: RetryPolicy,
}

impl std::fmt::Debug for AnalysisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisService")
            .field("credentials", &self.credentials)
            .field("model", &self.model)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl AnalysisService {
    /// Build the service from configuration. An empty credential list is
    /// a configuration error.
    pub fn new(config: AnalysisConfig, backend: Arc<dyn CompletionBackend>) -> Result<Self> {
        let credentials = Pool::new("credential", &config.api_keys)?;

        tracing::info!(
            keys = credentials.len(),
            model = %config.model,
            "analysis service initialised"
        );

        Ok(Self {
            credentials,
            model: config.model,
            sampling: config.sampling,
            backend,
            policy: RetryPolicy::default(),
        })
    }

    /// Run the transcript through the completion model and decode the
    /// structured report.
    ///
    /// Provider failures rotate credentials within a budget of
    /// `|credentials| * 2`. A response that is not valid JSON is fatal
    /// after exactly one call: rotating is not expected to change
    /// malformed output for the same transcript.
    pub async fn analyze(
        &self,
        transcript: &str,
        metadata: Option<&RecordingMetadata>,
    ) -> Result<AnalysisResult> {
        let user_message = prompt::build_user_message(transcript, metadata);
        let budget = self.policy.budget([self.credentials.len()]);
        let invocation_id = Uuid::new_v4();
        let span = tracing::info_span!("analyze", %invocation_id, model = %self.model);

        async {
            let result = retry::invoke("analyze", budget, |attempt| {
                let credential = self.credentials.next().to_string();
                let user_message = user_message.as_str();
                async move {
                    tracing::debug!(attempt, "analysis attempt");
                    let raw = self
                        .backend
                        .complete(CompletionRequest {
                            system_prompt: SYSTEM_PROMPT,
                            user_message,
                            credential: &credential,
                            model: &self.model,
                            sampling: &self.sampling,
                        })
                        .await?;
                    validate::analysis_from_json(&raw).map_err(AttemptError::Fatal)
                }
            })
            .await?;

            tracing::info!(
                topics = result.key_topics.len(),
                actions = result.action_items.len(),
                "analysis successful"
            );
            Ok(result)
        }
        .instrument(span)
        .await
    }

    pub fn credential_count(&self) -> usize {
        self.credentials.len()
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderError;
    use crate::Error;

    struct StaticBackend(&'static str);

    #[async_trait::async_trait]
    impl CompletionBackend for StaticBackend {
        async fn complete(
            &self,
            _request: CompletionRequest<'_>,
        ) -> std::result::Result<String, ProviderError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn empty_credentials_fail_construction() {
        let err = AnalysisService::new(AnalysisConfig::default(), Arc::new(StaticBackend("{}")))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[tokio::test]
    async fn default_model_is_used_when_unconfigured() {
        let service = AnalysisService::new(
            AnalysisConfig {
                api_keys: vec!["k".into()],
                ..AnalysisConfig::default()
            },
            Arc::new(StaticBackend("{\"summary\":\"s\"}")),
        )
        .unwrap();
        assert_eq!(service.model(), crate::config::DEFAULT_COMPLETION_MODEL);
        let report = service.analyze("hello", None).await.unwrap();
        assert_eq!(report.summary, "s");
    }
}
