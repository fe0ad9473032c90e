#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Development terminals get colored log output; other environments log plain text.
    #[must_use]
    pub fn colored_logs(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for one emodash process.
///
/// Built once at startup by [`crate::load_app_config`] and never reloaded.
#[derive(Clone)]
pub struct AppConfig {
    /// Base URL of the TEI server hosting the binary sentiment model.
    pub sentiment_url: String,
    /// Base URL of the TEI server hosting the multi-label emotion model.
    pub emotion_url: String,
    pub env: Environment,
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Maximum number of texts sent in one batched sentiment request.
    pub sentiment_batch_size: usize,
    /// Number of display cards produced by the preview view.
    pub preview_limit: usize,
    /// Character width at which display-card text is truncated.
    pub preview_chars: usize,
    /// Model id the sentiment oracle is expected to report from `/info`.
    pub sentiment_model: String,
    /// Model id the emotion oracle is expected to report from `/info`.
    pub emotion_model: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("sentiment_url", &self.sentiment_url)
            .field("emotion_url", &self.emotion_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("sentiment_batch_size", &self.sentiment_batch_size)
            .field("preview_limit", &self.preview_limit)
            .field("preview_chars", &self.preview_chars)
            .field("sentiment_model", &self.sentiment_model)
            .field("emotion_model", &self.emotion_model)
            .finish()
    }
}
