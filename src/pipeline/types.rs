use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::specialty::Specialty;
use super::AnalysisError;

/// One unit of content submitted to the generative model.
///
/// Parts are ordered: contextual text first, then media attachments each
/// followed by a short caption part.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text(String),
    /// Binary attachment, already base64-encoded for the wire.
    InlineMedia { mime_type: String, data: String },
}

impl ContentPart {
    pub fn is_text(&self) -> bool {
        matches!(self, ContentPart::Text(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentPart::Text(t) => Some(t.as_str()),
            ContentPart::InlineMedia { .. } => None,
        }
    }
}

/// A media attachment captured by a department screen (image, audio, video).
#[derive(Debug, Clone)]
pub struct MediaAttachment {
    pub mime_type: String,
    pub bytes: Vec<u8>,
    /// Short description shown to the model next to the attachment.
    /// Empty captions get a generic one at prompt-build time.
    pub caption: String,
}

impl MediaAttachment {
    pub fn new(mime_type: &str, bytes: Vec<u8>, caption: &str) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            bytes,
            caption: caption.to_string(),
        }
    }
}

/// Immutable description of one analysis submission from a department screen.
///
/// Created per user action, sent once, discarded after the response resolves.
/// Precondition checks (e.g. "radiology needs an image") belong to the
/// calling screen, not to this core.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub id: Uuid,
    pub specialty: Specialty,
    /// Free-text clinical context entered by the patient or clinician.
    pub context: String,
    /// Structured form fields as label/value pairs, in entry order.
    pub fields: Vec<(String, String)>,
    pub media: Vec<MediaAttachment>,
}

impl AnalysisRequest {
    pub fn new(specialty: Specialty, context: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            specialty,
            context: context.to_string(),
            fields: Vec::new(),
            media: Vec::new(),
        }
    }

    pub fn with_field(mut self, label: &str, value: &str) -> Self {
        self.fields.push((label.to_string(), value.to_string()));
        self
    }

    pub fn with_media(mut self, media: MediaAttachment) -> Self {
        self.media.push(media);
        self
    }
}

/// Raw model output for one request. Owned by the invocation adapter,
/// passed by value to the parser, never mutated.
#[derive(Debug, Clone, Default)]
pub struct ModelReply {
    pub text: String,
    pub citations: Vec<Citation>,
}

/// One grounding source the provider attached to a reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub title: Option<String>,
    pub uri: String,
}

/// Structured-output request mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuredOutputMode {
    /// Model replies in free text; the tolerant parser does the recovery.
    Freeform,
    /// Ask the provider for JSON directly. The tolerant parser still runs
    /// afterwards (a no-op on clean JSON).
    StrictSchema,
}

/// Per-call generation options handed to the invocation adapter.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub enable_search: bool,
    /// Provider reasoning-budget hint, in tokens. `Some(0)` disables
    /// reasoning entirely for latency-sensitive specialties.
    pub reasoning_budget: Option<u32>,
    pub structured_output: StructuredOutputMode,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            enable_search: false,
            reasoning_budget: None,
            structured_output: StructuredOutputMode::Freeform,
        }
    }
}

/// JSON kind the parser should expect from a specialty's reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedKind {
    Object,
    Array,
}

/// Final value handed to rendering: the parsed object with UI-required
/// defaults filled in and a `sources` list attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedAnalysis(Map<String, Value>);

impl NormalizedAnalysis {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Generative model client abstraction (allows mocking).
pub trait GenerativeClient {
    fn generate(
        &self,
        parts: &[ContentPart],
        options: &GenerationOptions,
    ) -> Result<ModelReply, AnalysisError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_accumulates_fields_and_media() {
        let request = AnalysisRequest::new(Specialty::Cardiology, "chest pain on exertion")
            .with_field("Age", "54")
            .with_field("Smoker", "no")
            .with_media(MediaAttachment::new("image/png", vec![1, 2, 3], "ECG strip"));

        assert_eq!(request.specialty, Specialty::Cardiology);
        assert_eq!(request.fields.len(), 2);
        assert_eq!(request.fields[0].0, "Age");
        assert_eq!(request.media.len(), 1);
        assert_eq!(request.media[0].mime_type, "image/png");
    }

    #[test]
    fn requests_get_distinct_ids() {
        let a = AnalysisRequest::new(Specialty::Dentistry, "");
        let b = AnalysisRequest::new(Specialty::Dentistry, "");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn content_part_text_accessor() {
        let text = ContentPart::Text("hello".into());
        let media = ContentPart::InlineMedia {
            mime_type: "image/png".into(),
            data: "AAAA".into(),
        };
        assert_eq!(text.as_text(), Some("hello"));
        assert!(media.as_text().is_none());
        assert!(!media.is_text());
    }

    #[test]
    fn default_generation_options_are_conservative() {
        let options = GenerationOptions::default();
        assert!(options.temperature <= 0.3);
        assert!(!options.enable_search);
        assert!(options.reasoning_budget.is_none());
        assert_eq!(options.structured_output, StructuredOutputMode::Freeform);
    }

    #[test]
    fn normalized_analysis_field_access() {
        let mut fields = Map::new();
        fields.insert("diagnosis".into(), Value::String("X".into()));
        let normalized = NormalizedAnalysis::new(fields);
        assert_eq!(normalized.get("diagnosis"), Some(&Value::String("X".into())));
        assert!(normalized.get("missing").is_none());
        assert!(normalized.into_value().is_object());
    }
}
