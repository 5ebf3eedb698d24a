use crate::config::ModelConfig;

use super::gemini_types::{GenerateContentRequest, GenerateContentResponse};
use super::types::{ContentPart, GenerationOptions, GenerativeClient, ModelReply};
use super::AnalysisError;

/// HTTP client for the hosted generative model.
///
/// Constructed once at startup from a resolved [`ModelConfig`] and injected
/// into the pipeline; nothing here re-reads the environment per call.
pub struct GeminiClient {
    config: ModelConfig,
    client: reqwest::blocking::Client,
}

impl GeminiClient {
    pub fn new(config: ModelConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }
}

impl GenerativeClient for GeminiClient {
    fn generate(
        &self,
        parts: &[ContentPart],
        options: &GenerationOptions,
    ) -> Result<ModelReply, AnalysisError> {
        let body = GenerateContentRequest::from_parts(parts, options);

        tracing::debug!(
            model = %self.config.model,
            parts = parts.len(),
            search = options.enable_search,
            "Submitting generateContent request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    AnalysisError::RemoteUnavailable(self.config.base_url.clone())
                } else if e.is_timeout() {
                    AnalysisError::RemoteUnavailable(format!(
                        "request timed out after {}s",
                        self.config.timeout_secs
                    ))
                } else {
                    AnalysisError::RemoteUnavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AnalysisError::RemoteRejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| AnalysisError::MalformedModelOutput(e.to_string()))?;

        let reply = ModelReply {
            text: parsed.text(),
            citations: parsed.citations(),
        };

        tracing::debug!(
            text_len = reply.text.len(),
            citations = reply.citations.len(),
            "generateContent reply received"
        );

        Ok(reply)
    }
}

/// Mock client for testing — returns a configurable reply.
pub struct MockGenerativeClient {
    reply: ModelReply,
}

impl MockGenerativeClient {
    pub fn new(text: &str) -> Self {
        Self {
            reply: ModelReply {
                text: text.to_string(),
                citations: Vec::new(),
            },
        }
    }

    pub fn with_citations(mut self, citations: Vec<super::types::Citation>) -> Self {
        self.reply.citations = citations;
        self
    }
}

impl GenerativeClient for MockGenerativeClient {
    fn generate(
        &self,
        _parts: &[ContentPart],
        _options: &GenerationOptions,
    ) -> Result<ModelReply, AnalysisError> {
        Ok(self.reply.clone())
    }
}
