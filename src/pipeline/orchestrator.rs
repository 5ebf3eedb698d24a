use serde_json::{Map, Value};

use super::normalize::normalize;
use super::parser::recover_json;
use super::prompt::build_content_parts;
use super::types::{AnalysisRequest, GenerativeClient, NormalizedAnalysis};
use super::AnalysisError;

/// Key under which an array-mode reply is placed so rendering always
/// receives an object.
const ARRAY_RESULTS_KEY: &str = "results";

/// Drives one analysis end to end:
/// build parts → remote call → tolerant parse → normalize.
///
/// One request produces exactly one result or one error; retry is the
/// screen's "press the button again" action, never this core's. The client
/// is injected at construction — configuration is resolved once at startup,
/// not looked up per call.
pub struct AnalysisPipeline {
    client: Box<dyn GenerativeClient + Send + Sync>,
}

impl AnalysisPipeline {
    pub fn new(client: Box<dyn GenerativeClient + Send + Sync>) -> Self {
        Self { client }
    }

    pub fn run(&self, request: &AnalysisRequest) -> Result<NormalizedAnalysis, AnalysisError> {
        let _span = tracing::info_span!(
            "analysis",
            request_id = %request.id,
            specialty = %request.specialty,
        )
        .entered();

        let profile = request.specialty.profile();
        let parts = build_content_parts(request);
        let options = profile.options();

        let reply = self.client.generate(&parts, &options)?;
        let parsed = recover_json(&reply.text, profile.expected)?;

        let fields = match parsed {
            Value::Object(map) => map,
            other => {
                // Array-mode specialties reply with a bare array.
                let mut map = Map::new();
                map.insert(ARRAY_RESULTS_KEY.into(), other);
                map
            }
        };

        tracing::info!(
            fields = fields.len(),
            citations = reply.citations.len(),
            "Analysis completed"
        );

        Ok(normalize(fields, &reply.citations))
    }
}
