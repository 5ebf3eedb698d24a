//! Serde shapes for the `generateContent` REST surface.

use serde::{Deserialize, Serialize};

use super::types::{Citation, ContentPart, GenerationOptions, StructuredOutputMode};

/// Request body for POST /models/{model}:generateContent
#[derive(Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
}

#[derive(Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// Exactly one of `text` / `inline_data` is set per part.
#[derive(Serialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Serialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(rename = "thinkingConfig", skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
}

#[derive(Serialize)]
pub struct ThinkingConfig {
    #[serde(rename = "thinkingBudget")]
    pub thinking_budget: u32,
}

#[derive(Serialize)]
pub struct Tool {
    #[serde(rename = "googleSearch")]
    pub google_search: GoogleSearch,
}

/// Serializes as the empty object the API expects.
#[derive(Serialize)]
pub struct GoogleSearch {}

impl GenerateContentRequest {
    /// Assemble the wire request from built content parts and call options.
    pub fn from_parts(parts: &[ContentPart], options: &GenerationOptions) -> Self {
        let parts = parts
            .iter()
            .map(|part| match part {
                ContentPart::Text(text) => Part {
                    text: Some(text.clone()),
                    inline_data: None,
                },
                ContentPart::InlineMedia { mime_type, data } => Part {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type: mime_type.clone(),
                        data: data.clone(),
                    }),
                },
            })
            .collect();

        let response_mime_type = match options.structured_output {
            StructuredOutputMode::StrictSchema => Some("application/json".to_string()),
            StructuredOutputMode::Freeform => None,
        };

        Self {
            contents: vec![Content { parts }],
            generation_config: Some(GenerationConfig {
                temperature: options.temperature,
                response_mime_type,
                thinking_config: options
                    .reasoning_budget
                    .map(|budget| ThinkingConfig { thinking_budget: budget }),
            }),
            tools: options.enable_search.then(|| {
                vec![Tool {
                    google_search: GoogleSearch {},
                }]
            }),
        }
    }
}

/// Response body from generateContent.
#[derive(Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(rename = "groundingMetadata", default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Deserialize)]
pub struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebSource>,
}

#[derive(Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

impl GenerateContentResponse {
    /// All text segments of the first candidate, joined.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }

    /// Grounding chunks of the first candidate as citations.
    /// Chunks without a URI carry nothing a report card could link; dropped.
    pub fn citations(&self) -> Vec<Citation> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|meta| {
                meta.grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .filter_map(|web| {
                        web.uri.as_ref().map(|uri| Citation {
                            title: web.title.clone(),
                            uri: uri.clone(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
