// Sanitize patient-entered free text before it is embedded in a prompt.
// Strips invisible Unicode, drops injection-looking lines, bounds length.

use uuid::Uuid;

/// Maximum context length embedded in a prompt (characters).
const MAX_CONTEXT_LENGTH: usize = 20_000;

/// Sanitize free-text context for prompt embedding.
///
/// When injection-looking lines are dropped, logs a warning with the line
/// count and request id — never the content (PHI risk).
pub fn sanitize_context(raw: &str, request_id: Option<&Uuid>) -> String {
    let cleaned = strip_invisible_chars(raw);
    let (kept, dropped) = drop_injection_lines(&cleaned);

    if dropped > 0 {
        let id = request_id.map(Uuid::to_string).unwrap_or_else(|| "unknown".into());
        tracing::warn!(
            request_id = %id,
            dropped_lines = dropped,
            "Injection-looking lines removed from analysis context"
        );
    }

    truncate_at_word_boundary(&collapse_whitespace(&kept), MAX_CONTEXT_LENGTH)
}

/// Remove zero-width, directional, and control characters that could steer
/// the model invisibly. Standard whitespace survives.
fn strip_invisible_chars(text: &str) -> String {
    text.chars()
        .filter(|c| {
            if matches!(*c, ' ' | '\n' | '\t' | '\r') {
                return true;
            }
            if matches!(
                *c,
                '\u{200B}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2060}'..='\u{2064}' | '\u{FEFF}'
            ) {
                return false;
            }
            !c.is_control()
        })
        .collect()
}

/// Lines that read like role markers or instruction overrides.
fn is_injection_line(trimmed_lower: &str) -> bool {
    const PREFIXES: &[&str] = &[
        "system:",
        "assistant:",
        "user:",
        "[system]",
        "[inst]",
        "<<sys>>",
        "note to ai:",
        "new instructions:",
        "<system",
        "</system",
    ];
    const FRAGMENTS: &[&str] = &[
        "ignore previous instructions",
        "ignore all instructions",
        "disregard your instructions",
        "forget your instructions",
        "override your instructions",
    ];
    PREFIXES.iter().any(|p| trimmed_lower.starts_with(p))
        || FRAGMENTS.iter().any(|f| trimmed_lower.contains(f))
}

/// Drop injection-looking lines. Returns (kept_text, dropped_count).
fn drop_injection_lines(text: &str) -> (String, usize) {
    let mut kept = String::with_capacity(text.len());
    let mut dropped = 0usize;

    for line in text.lines() {
        if is_injection_line(&line.trim().to_lowercase()) {
            dropped += 1;
            continue;
        }
        if !kept.is_empty() {
            kept.push('\n');
        }
        kept.push_str(line);
    }

    (kept, dropped)
}

/// Trim each line and collapse runs of blank lines to a single one.
fn collapse_whitespace(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut prev_blank = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !prev_blank && !lines.is_empty() {
                lines.push("");
            }
            prev_blank = true;
        } else {
            lines.push(trimmed);
            prev_blank = false;
        }
    }

    while lines.last() == Some(&"") {
        lines.pop();
    }

    lines.join("\n")
}

/// Truncate to `max_len` characters, preferring the last word boundary.
fn truncate_at_word_boundary(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len).collect();
    match cut.rfind(char::is_whitespace) {
        Some(pos) if pos > max_len / 2 => cut[..pos].to_string(),
        _ => cut,
    }
}
