//! Tolerant structured-output recovery.
//!
//! Generative models routinely wrap valid JSON in explanatory prose or
//! triple-backtick fences despite instructions not to. Recovery here is a
//! deliberate heuristic: strip fences, then slice from the first expected
//! opening delimiter to the last matching closing one. No bracket-balance
//! counting — nested braces inside string values would break a naive
//! counter, and well-formed model output rarely puts extra delimiters
//! outside the JSON span. When nothing parseable remains, the caller gets a
//! hard failure, never a guessed structure.

use serde_json::Value;

use super::types::ExpectedKind;
use super::AnalysisError;

/// Longest slice of offending text carried in a parse failure.
const DIAGNOSTIC_SLICE_LIMIT: usize = 240;

/// Recover the single JSON value expected in a model reply.
///
/// Empty input is defined, not an error: it yields `{}` in object mode and
/// `[]` in array mode. Stateless and idempotent.
pub fn recover_json(text: &str, expected: ExpectedKind) -> Result<Value, AnalysisError> {
    let (open, close, fallback) = match expected {
        ExpectedKind::Object => ('{', '}', "{}"),
        ExpectedKind::Array => ('[', ']', "[]"),
    };

    let text = if text.is_empty() { fallback } else { text };

    let stripped = strip_code_fences(text);
    let trimmed = stripped.trim();

    // First opening / last closing delimiter. When both exist in order,
    // slice exactly that span; otherwise leave the text alone so the JSON
    // parse below fails loudly instead of silently producing wrong data.
    let candidate = match (trimmed.find(open), trimmed.rfind(close)) {
        (Some(first), Some(last)) if first < last => &trimmed[first..=last],
        _ => trimmed,
    };

    serde_json::from_str(candidate).map_err(|e| {
        tracing::warn!(
            error = %e,
            slice_len = candidate.len(),
            "Model reply did not contain recoverable JSON"
        );
        AnalysisError::MalformedModelOutput(bounded_slice(candidate))
    })
}

/// Remove every occurrence of the JSON code-fence markers, leaving all other
/// content intact. The language-tagged opening fence goes first so its bare
/// backticks are not half-eaten by the closing-fence pass.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "")
}

/// Truncate the offending text to a bounded diagnostic snippet, char-safe.
fn bounded_slice(text: &str) -> String {
    if text.chars().count() <= DIAGNOSTIC_SLICE_LIMIT {
        return text.to_string();
    }
    let mut snippet: String = text.chars().take(DIAGNOSTIC_SLICE_LIMIT).collect();
    snippet.push('…');
    snippet
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recovers_object_from_fenced_reply_with_prose() {
        let reply = "Sure! ```json\n{\"a\":1,\"b\":[1,2]}\n```";
        let value = recover_json(reply, ExpectedKind::Object).unwrap();
        assert_eq!(value, json!({"a": 1, "b": [1, 2]}));
    }

    #[test]
    fn recovers_array_embedded_in_prose() {
        let reply = "Here you go: [1,2,3] — let me know if you need more.";
        let value = recover_json(reply, ExpectedKind::Array).unwrap();
        assert_eq!(value, json!([1, 2, 3]));
    }

    #[test]
    fn refusal_text_is_a_hard_failure() {
        let result = recover_json("I cannot help with that.", ExpectedKind::Object);
        assert!(matches!(result, Err(AnalysisError::MalformedModelOutput(_))));
    }

    #[test]
    fn empty_input_defaults_to_empty_object() {
        let value = recover_json("", ExpectedKind::Object).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn empty_input_defaults_to_empty_array() {
        let value = recover_json("", ExpectedKind::Array).unwrap();
        assert_eq!(value, json!([]));
    }

    #[test]
    fn whitespace_only_input_fails() {
        let result = recover_json("   \n  ", ExpectedKind::Object);
        assert!(matches!(result, Err(AnalysisError::MalformedModelOutput(_))));
    }

    #[test]
    fn clean_json_passes_untouched() {
        // Strict-schema replies are already valid JSON; recovery is a no-op.
        let reply = "{\"diagnosis\":\"X\",\"findings\":[\"a\"]}";
        let value = recover_json(reply, ExpectedKind::Object).unwrap();
        assert_eq!(value, json!({"diagnosis": "X", "findings": ["a"]}));
    }

    #[test]
    fn braces_inside_string_values_survive() {
        let reply = "Note first: {\"text\":\"use {caution} here\",\"n\":1} done.";
        let value = recover_json(reply, ExpectedKind::Object).unwrap();
        assert_eq!(value["text"], "use {caution} here");
    }

    #[test]
    fn trailing_prose_after_closing_brace_is_cut() {
        let reply = "```json\n{\"ok\":true}\n```\nHope this helps!";
        // "helps!" contains no brace, so the last '}' still ends the span.
        let value = recover_json(reply, ExpectedKind::Object).unwrap();
        assert_eq!(value, json!({"ok": true}));
    }

    #[test]
    fn fences_without_language_tag_are_stripped_too() {
        let reply = "```\n{\"a\":1}\n```";
        let value = recover_json(reply, ExpectedKind::Object).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn object_mode_ignores_bracket_delimiters() {
        // Array mode would recover this; object mode must not fabricate one.
        let result = recover_json("values: [1,2,3]", ExpectedKind::Object);
        assert!(matches!(result, Err(AnalysisError::MalformedModelOutput(_))));
    }

    #[test]
    fn reversed_delimiters_fail_instead_of_slicing() {
        let result = recover_json("} backwards {", ExpectedKind::Object);
        assert!(matches!(result, Err(AnalysisError::MalformedModelOutput(_))));
    }

    #[test]
    fn broken_json_inside_fences_fails_with_bounded_slice() {
        let filler = "x".repeat(2_000);
        let reply = format!("```json\n{{broken {filler}\n```");
        match recover_json(&reply, ExpectedKind::Object) {
            Err(AnalysisError::MalformedModelOutput(slice)) => {
                assert!(slice.chars().count() <= DIAGNOSTIC_SLICE_LIMIT + 1);
            }
            other => panic!("expected malformed-output error, got {other:?}"),
        }
    }

    #[test]
    fn parsing_is_idempotent() {
        let reply = "Result:\n```json\n{\"score\": 87}\n```";
        let first = recover_json(reply, ExpectedKind::Object).unwrap();
        let second = recover_json(reply, ExpectedKind::Object).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn nested_structures_round_trip() {
        let reply = "```json\n{\"a\":{\"b\":{\"c\":[{\"d\":null}]}}}\n```";
        let value = recover_json(reply, ExpectedKind::Object).unwrap();
        assert_eq!(value["a"]["b"]["c"][0], json!({"d": null}));
    }
}
