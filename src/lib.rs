//! Analysis core for a multi-specialty medical front-end.
//!
//! Fourteen department screens collect patient media and context; this crate
//! turns each submission into a prompt, invokes the hosted generative model,
//! recovers the JSON report from its free-form reply, and hands rendering a
//! normalized object. The UI, media capture, and the model provider itself
//! are external collaborators.
//!
//! ```no_run
//! use polyclinic::config::ModelConfig;
//! use polyclinic::pipeline::{AnalysisPipeline, AnalysisRequest, GeminiClient, Specialty};
//!
//! let config = ModelConfig::from_env()?;
//! let pipeline = AnalysisPipeline::new(Box::new(GeminiClient::new(config)));
//!
//! let request = AnalysisRequest::new(Specialty::Cardiology, "chest pain on exertion");
//! let report = pipeline.run(&request)?;
//! println!("{}", report.into_value());
//! # Ok::<(), polyclinic::pipeline::AnalysisError>(())
//! ```

pub mod config;
pub mod pipeline;

pub use pipeline::{
    AnalysisError, AnalysisPipeline, AnalysisRequest, GeminiClient, NormalizedAnalysis, Specialty,
};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for host applications that have no subscriber of
/// their own. Call once, early.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} analysis core v{}", config::APP_NAME, config::APP_VERSION);
}
