use serde_json::{Map, Value};

use super::types::{Citation, NormalizedAnalysis};

/// Title substituted when a grounding source arrives without one.
pub const GENERIC_SOURCE_TITLE: &str = "Credible medical source";

/// Merge a successfully parsed object with the adapter's citation list into
/// the value handed to rendering.
///
/// Clinical fields are never invented or altered here; the only write is the
/// `sources` array, and a model-supplied `sources` key wins over ours.
/// Placeholder citations (bare `#` or empty URIs) are dropped, not fatal.
pub fn normalize(mut parsed: Map<String, Value>, citations: &[Citation]) -> NormalizedAnalysis {
    if !parsed.contains_key("sources") {
        let sources: Vec<Value> = citations
            .iter()
            .filter(|c| !is_placeholder_uri(&c.uri))
            .map(|c| {
                let mut entry = Map::new();
                entry.insert(
                    "title".into(),
                    Value::String(
                        c.title
                            .clone()
                            .unwrap_or_else(|| GENERIC_SOURCE_TITLE.to_string()),
                    ),
                );
                entry.insert("uri".into(), Value::String(c.uri.clone()));
                Value::Object(entry)
            })
            .collect();

        parsed.insert("sources".into(), Value::Array(sources));
    }

    NormalizedAnalysis::new(parsed)
}

fn is_placeholder_uri(uri: &str) -> bool {
    let trimmed = uri.trim();
    trimmed.is_empty() || trimmed == "#"
}
