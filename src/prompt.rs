//! Prompt construction for the analysis stage.
//!
//! Deterministic string formatting only: identical inputs always yield
//! identical messages, no randomness, no I/O.

use crate::types::RecordingMetadata;
use serde_json::Value;

/// Fixed system prompt. Instructs the model on role and the JSON output
/// contract so responses stay parseable regardless of transcript length.
pub const SYSTEM_PROMPT: &str = "\
You are a highly accurate meeting-intelligence assistant embedded in a \
voice-channel recording system.

Your job is to analyse a raw speech transcript and produce a structured \
report that is immediately useful to participants who were present and \
those who were not.

## Output format

Respond ONLY with valid JSON matching this schema (do NOT add markdown \
fences or any text outside the JSON):

{
  \"summary\":        \"<string>\",
  \"key_topics\":     [\"<string>\", ...],
  \"action_items\":   [{\"owner\": \"<string|null>\", \"task\": \"<string>\"}, ...],
  \"decisions\":      [\"<string>\", ...],
  \"open_questions\": [\"<string>\", ...],
  \"sentiment\":      \"<positive|neutral|mixed|negative|unclear>\"
}

## Rules

1. If a section has genuinely no content, use an empty array [] or an \
appropriate null-equivalent value - do NOT fabricate items.
2. Do NOT include speaker diarisation IDs or raw timestamps unless they \
appear verbatim in the transcript.
3. If the transcript is too short or unclear to fill a section, omit \
items rather than guessing.
4. All text must be in the same language as the transcript unless the \
user's metadata specifies otherwise.
";

/// Build the user message: optional metadata block, then the trimmed
/// transcript under a fixed heading, then the closing instruction.
pub fn build_user_message(transcript: &str, metadata: Option<&RecordingMetadata>) -> String {
    let metadata_block = match metadata {
        Some(meta) if !meta.is_empty() => {
            let mut lines = vec!["## Recording metadata\n".to_string()];
            for (key, value) in meta.iter() {
                lines.push(format!("- **{}**: {}", label_for(key), render_value(value)));
            }
            format!("{}\n\n", lines.join("\n"))
        }
        _ => String::new(),
    };

    format!(
        "{metadata_block}## Transcript\n\n{}\n\n---\nAnalyse the transcript above and return the JSON report.",
        transcript.trim()
    )
}

/// Human label for a metadata key. Recognised keys map to fixed labels;
/// anything else is title-cased with underscores turned into spaces.
fn label_for(key: &str) -> String {
    match key {
        "channel" => "Channel".to_string(),
        "guild" => "Server".to_string(),
        "user_id" => "User ID".to_string(),
        "timestamp" => "Recorded at".to_string(),
        "duration_ms" => "Duration (ms)".to_string(),
        other => title_case(other),
    }
}

fn title_case(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a metadata value the way it should read in prose: strings
/// without quotes, everything else in its JSON form.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_without_metadata_has_no_metadata_block() {
        let msg = build_user_message("  hello there  ", None);
        assert!(msg.starts_with("## Transcript\n\nhello there\n"));
        assert!(msg.ends_with("return the JSON report."));
    }

    #[test]
    fn recognised_keys_use_fixed_labels() {
        let meta = RecordingMetadata::new()
            .insert("channel", "standup")
            .insert("guild", "eng")
            .insert("duration_ms", 42_000);
        let msg = build_user_message("t", Some(&meta));
        assert!(msg.contains("- **Channel**: standup"));
        assert!(msg.contains("- **Server**: eng"));
        assert!(msg.contains("- **Duration (ms)**: 42000"));
    }

    #[test]
    fn unknown_keys_are_title_cased() {
        let meta = RecordingMetadata::new().insert("participant_count", 5);
        let msg = build_user_message("t", Some(&meta));
        assert!(msg.contains("- **Participant Count**: 5"));
    }

    #[test]
    fn metadata_block_precedes_transcript_with_blank_line() {
        let meta = RecordingMetadata::new().insert("channel", "standup");
        let msg = build_user_message("t", Some(&meta));
        assert!(msg.starts_with("## Recording metadata\n"));
        assert!(msg.contains("standup\n\n## Transcript\n\nt"));
    }

    #[test]
    fn empty_metadata_behaves_like_none() {
        let msg = build_user_message("t", Some(&RecordingMetadata::new()));
        assert_eq!(msg, build_user_message("t", None));
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let meta = RecordingMetadata::new()
            .insert("timestamp", "2026-08-28T12:00:00Z")
            .insert("user_id", "u1");
        let a = build_user_message("same", Some(&meta));
        let b = build_user_message("same", Some(&meta));
        assert_eq!(a, b);
    }
}
