pub mod types;
pub mod specialty;
pub mod sanitize;
pub mod prompt;
pub mod parser;
pub mod gemini;
pub mod gemini_types;
pub mod normalize;
pub mod orchestrator;

pub use types::*;
pub use specialty::*;
pub use sanitize::*;
pub use prompt::*;
pub use parser::*;
pub use gemini::*;
pub use normalize::*;
pub use orchestrator::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No API credential configured for the generative model")]
    ConfigurationMissing,

    #[error("Generative model unreachable: {0}")]
    RemoteUnavailable(String),

    #[error("Generative model rejected the request (status {status}): {body}")]
    RemoteRejected { status: u16, body: String },

    #[error("Could not recover structured output from model reply: {0}")]
    MalformedModelOutput(String),
}
