//! Construction-time configuration.
//!
//! The core performs no environment lookups: an external composition
//! layer parses whatever source it likes (env, file, flags) into these
//! structs and hands them to the services once at startup.

use serde::Deserialize;

/// Default Whisper models, fastest first. Used when the configuration
/// supplies no model list.
pub const DEFAULT_WHISPER_MODELS: [&str; 2] = ["whisper-large-v3-turbo", "whisper-large-v3"];

/// Default completion model for the analysis stage.
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-oss-120b";

/// Configuration for [`crate::service::TranscriptionService`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscriptionConfig {
    /// Ordered API keys; at least one distinct non-empty entry required.
    pub api_keys: Vec<String>,
    /// Ordered model identifiers; empty means [`DEFAULT_WHISPER_MODELS`].
    #[serde(default)]
    pub models: Vec<String>,
}

/// Configuration for [`crate::service::AnalysisService`].
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Ordered API keys; at least one distinct non-empty entry required.
    pub api_keys: Vec<String>,
    /// Single completion model; no rotation over models for analysis.
    #[serde(default = "default_completion_model")]
    pub model: String,
    #[serde(default)]
    pub sampling: SamplingParams,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_keys: Vec::new(),
            model: default_completion_model(),
            sampling: SamplingParams::default(),
        }
    }
}

fn default_completion_model() -> String {
    DEFAULT_COMPLETION_MODEL.to_string()
}

/// Fixed sampling parameters for the completion call. The defaults keep
/// JSON output consistent across runs.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SamplingParams {
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
        }
    }
}

fn default_temperature() -> f64 {
    0.2
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_top_p() -> f64 {
    1.0
}
