//! Core result and metadata types shared across the pipeline stages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Plain-text output of the transcription stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub text: String,
}

/// Structured report produced by the analysis stage.
///
/// Field projection is deliberately lenient: missing fields default, an
/// unrecognised sentiment label maps to [`Sentiment::Unclear`], and
/// top-level keys outside the contract are preserved in `extra` rather
/// than rejected. Only syntactic JSON decoding is enforced upstream;
/// strict schema validation is a known extension point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_topics: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
    #[serde(default)]
    pub decisions: Vec<String>,
    #[serde(default)]
    pub open_questions: Vec<String>,
    #[serde(default)]
    pub sentiment: Sentiment,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A single follow-up task extracted from the conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    #[serde(default)]
    pub owner: Option<String>,
    pub task: String,
}

/// Overall emotional tone of the conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Mixed,
    Negative,
    #[default]
    #[serde(other)]
    Unclear,
}

/// Contextual information about the recording, folded into the user
/// message by the prompt builder. Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingMetadata(pub serde_json::Map<String, Value>);

impl RecordingMetadata {
    pub fn new() -> Self {
        Self(serde_json::Map::new())
    }

    pub fn insert(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_parses_known_labels() {
        let s: Sentiment = serde_json::from_str("\"mixed\"").unwrap();
        assert_eq!(s, Sentiment::Mixed);
    }

    #[test]
    fn sentiment_falls_back_to_unclear() {
        let s: Sentiment = serde_json::from_str("\"ecstatic\"").unwrap();
        assert_eq!(s, Sentiment::Unclear);
    }

    #[test]
    fn analysis_result_defaults_missing_fields() {
        let r: AnalysisResult = serde_json::from_str("{\"summary\":\"short\"}").unwrap();
        assert_eq!(r.summary, "short");
        assert!(r.key_topics.is_empty());
        assert_eq!(r.sentiment, Sentiment::Unclear);
    }

    #[test]
    fn analysis_result_preserves_unknown_keys() {
        let r: AnalysisResult =
            serde_json::from_str("{\"summary\":\"s\",\"speaker_count\":3}").unwrap();
        assert_eq!(r.extra.get("speaker_count"), Some(&Value::from(3)));
    }
}
