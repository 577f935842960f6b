//! Configuration management for medstatd

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use medstat_connector_gemini::GeminiConfig;
use medstat_core::errors::ConfigError;
use medstat_http::HttpApiConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Process-wide configuration, populated once at startup.
///
/// The API credential is intentionally absent here: it is read straight from
/// `GEMINI_API_KEY` so it never lands in a config file on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_address: SocketAddr,
    /// Enable CORS
    pub enable_cors: bool,
    /// Gemini model to use
    pub model: String,
    /// Gemini API base URL
    pub api_base: String,
    /// Per-attempt upstream timeout in milliseconds
    pub timeout_ms: u64,
    /// Upstream attempt cap
    pub max_attempts: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let gemini = GeminiConfig::default();
        Self {
            bind_address: "0.0.0.0:5000".parse().unwrap(),
            enable_cors: true,
            model: gemini.model,
            api_base: gemini.api_base,
            timeout_ms: gemini.timeout_ms,
            max_attempts: gemini.max_attempts,
        }
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub async fn load(config_path: &Option<std::path::PathBuf>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config file if it exists
        let default_config_paths = ["medstat.yaml", "medstat.yml"];
        for path in &default_config_paths {
            if Path::new(path).exists() {
                figment = figment.merge(Yaml::file(path));
                break;
            }
        }

        // Load from specified config file
        if let Some(path) = config_path {
            if path.exists() {
                figment = figment.merge(Yaml::file(path));
            } else {
                return Err(ConfigError::FileNotFound(path.display().to_string()));
            }
        }

        // Load from environment variables (prefixed with MEDSTAT_)
        figment = figment.merge(Env::prefixed("MEDSTAT_"));

        figment
            .extract()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Gemini connector config: credential from the environment, the rest from here
    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig::from_env()
            .with_model(self.model.clone())
            .with_api_base(self.api_base.clone())
            .with_timeout(self.timeout_ms)
            .with_max_attempts(self.max_attempts)
    }

    /// HTTP server config
    pub fn http_config(&self) -> HttpApiConfig {
        HttpApiConfig {
            bind_address: self.bind_address,
            enable_cors: self.enable_cors,
        }
    }
}
