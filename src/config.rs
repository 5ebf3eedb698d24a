use crate::pipeline::AnalysisError;

/// Application-level constants
pub const APP_NAME: &str = "Polyclinic";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}

/// Resolved connection settings for the generative model.
///
/// Resolved once during application startup and injected into the client —
/// never looked up from the environment on a per-call basis.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl ModelConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read configuration from the environment, once, at startup.
    ///
    /// `GEMINI_API_KEY` is required; `POLYCLINIC_MODEL` and
    /// `POLYCLINIC_BASE_URL` override the defaults.
    pub fn from_env() -> Result<Self, AnalysisError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(AnalysisError::ConfigurationMissing)?;

        let mut config = Self::new(&api_key);
        if let Ok(model) = std::env::var("POLYCLINIC_MODEL") {
            config = config.with_model(&model);
        }
        if let Ok(base_url) = std::env::var("POLYCLINIC_BASE_URL") {
            config = config.with_base_url(&base_url);
        }
        Ok(config)
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_config_uses_defaults() {
        let config = ModelConfig::new("key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = ModelConfig::new("key").with_base_url("https://example.test/v1/");
        assert_eq!(config.base_url, "https://example.test/v1");
    }

    #[test]
    fn builder_overrides_apply() {
        let config = ModelConfig::new("key")
            .with_model("gemini-test")
            .with_timeout(30);
        assert_eq!(config.model, "gemini-test");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn default_log_filter_names_the_crate() {
        assert!(default_log_filter().contains("polyclinic"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
