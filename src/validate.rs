//! Response normalization.
//!
//! Transcription responses are normalized to a plain string; analysis
//! responses are decoded as JSON. Decoding here is syntactic only: a
//! body that is not JSON at all is a validation failure, but the field
//! projection into [`AnalysisResult`] stays lenient (see `types`).

use crate::provider::RawTranscription;
use crate::types::AnalysisResult;
use crate::{Error, Result};

/// Normalize a raw transcription payload to the transcript text.
/// No schema to enforce; every payload shape carries text.
pub fn transcript_text(raw: RawTranscription) -> String {
    match raw {
        RawTranscription::Plain(text) => text,
        RawTranscription::Verbose { text } => text,
    }
}

/// Decode the model's raw text as the structured analysis report.
///
/// A parse failure is fatal for the invocation: rotating to another
/// credential is not expected to change malformed output for the same
/// transcript, so the caller must not retry this.
pub fn analysis_from_json(raw: &str) -> Result<AnalysisResult> {
    serde_json::from_str(raw).map_err(|err| {
        let snippet: String = raw.chars().take(200).collect();
        Error::validation(format!(
            "model returned a non-JSON response ({err}): {snippet}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sentiment;

    #[test]
    fn plain_and_verbose_payloads_normalize_identically() {
        assert_eq!(transcript_text(RawTranscription::Plain("hi".into())), "hi");
        assert_eq!(
            transcript_text(RawTranscription::Verbose { text: "hi".into() }),
            "hi"
        );
    }

    #[test]
    fn well_formed_report_parses_exactly() {
        let raw = r#"{"summary":"ok","key_topics":[],"action_items":[],"decisions":[],"open_questions":[],"sentiment":"neutral"}"#;
        let result = analysis_from_json(raw).unwrap();
        assert_eq!(result.summary, "ok");
        assert!(result.key_topics.is_empty());
        assert!(result.action_items.is_empty());
        assert!(result.decisions.is_empty());
        assert!(result.open_questions.is_empty());
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert!(result.extra.is_empty());
    }

    #[test]
    fn non_json_body_is_a_validation_error() {
        let err = analysis_from_json("Sure! Here is the report:").unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn validation_error_includes_a_bounded_snippet() {
        let long = "x".repeat(5000);
        let err = analysis_from_json(&long).unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.len() < 400);
    }
}
