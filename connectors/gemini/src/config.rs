//! Configuration for the Gemini connector

use serde::{Deserialize, Serialize};

/// Gemini API configuration.
///
/// Populated once at startup and never mutated afterwards. A missing API key
/// is deliberately not a construction error: every gateway call then fails
/// cleanly with `CredentialMissing` instead of aborting the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Gemini API key; `None` soft-fails every call
    pub api_key: Option<String>,
    /// Model to use
    pub model: String,
    /// API base URL
    pub api_base: String,
    /// Per-attempt request timeout in milliseconds
    pub timeout_ms: u64,
    /// Total attempt cap, counting the first try
    pub max_attempts: u32,
}

impl GeminiConfig {
    /// Create a new Gemini config with the given API key
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            model: "gemini-2.5-flash-preview-09-2025".to_string(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_ms: 120_000,
            max_attempts: 3,
        }
    }

    /// Read the API key from the `GEMINI_API_KEY` environment variable.
    ///
    /// An unset or empty variable yields a config without a credential.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        Self::new(api_key)
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the per-attempt timeout
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the total attempt cap
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Full generateContent URL for the configured model, without the key
    pub fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self::new(None)
    }
}
