use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Translation endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of an OpenAI-compatible completion endpoint.
    pub endpoint: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Environment variable the API key is read from at startup.
    pub api_key_env: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "VAANI_API_KEY".to_string(),
        }
    }
}

impl ApiConfig {
    /// Resolve the API key from the configured environment variable.
    /// The key is supplied out of the pipeline's concern, once at startup.
    pub fn resolve_api_key(&self) -> Result<String, DomainError> {
        std::env::var(&self.api_key_env).map_err(|_| {
            DomainError::Config(format!(
                "API key not found: set the {} environment variable",
                self.api_key_env
            ))
        })
    }
}

/// Speech capture and playback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Locale tag of the language selected at startup.
    pub default_language: String,
    /// Locale used for spoken playback of translations.
    pub output_locale: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            default_language: "kn-IN".to_string(),
            output_locale: "en-US".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Enable file logging with rotation.
    pub file_logging: bool,
    /// Maximum number of log files to keep.
    pub max_files: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: true,
            max_files: 7,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub speech: SpeechConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.speech.default_language, "kn-IN");
        assert_eq!(config.speech.output_locale, "en-US");
        assert_eq!(config.api.api_key_env, "VAANI_API_KEY");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [api]
            model = "llama-3.1-8b-instant"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.model, "llama-3.1-8b-instant");
        assert_eq!(config.api.endpoint, "https://api.openai.com/v1");
        assert_eq!(config.speech.output_locale, "en-US");
    }
}
