use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::domain::config::ApiConfig;
use crate::domain::DomainError;
use crate::ports::TranslationApi;

/// Fallback returned when the endpoint resolves with an empty payload.
pub const EMPTY_PAYLOAD_FALLBACK: &str = "Translation failed.";

/// Translation client backed by an OpenAI-compatible chat-completion endpoint.
///
/// Stateless with respect to session data: one request in, one completion out.
pub struct CompletionApiClient {
    client: Client,
    endpoint: Url,
    model: String,
    api_key: String,
}

impl CompletionApiClient {
    /// Build a client for the configured endpoint.
    ///
    /// The API key is resolved once here, at startup; validation of the
    /// endpoint URL happens up front so a bad config fails fast rather than
    /// on the first utterance.
    pub fn new(config: &ApiConfig) -> Result<Self, DomainError> {
        let api_key = config.resolve_api_key()?;
        Self::with_api_key(config, api_key)
    }

    /// Build a client with an explicit key (bypasses the environment lookup).
    pub fn with_api_key(config: &ApiConfig, api_key: String) -> Result<Self, DomainError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| DomainError::Config(format!("Invalid endpoint URL: {}", e)))?;

        let client = Client::builder()
            .use_rustls_tls()
            .user_agent(format!("Vaani/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::HttpRequest(format!("Failed to create HTTP client: {}", e)))?;

        info!(endpoint = %endpoint, model = %config.model, "Translation client initialized");

        Ok(Self {
            client,
            endpoint,
            model: config.model.clone(),
            api_key,
        })
    }

    fn completions_url(&self) -> Result<Url, DomainError> {
        // Url::join treats a base without a trailing slash as a file.
        let base = if self.endpoint.path().ends_with('/') {
            self.endpoint.clone()
        } else {
            Url::parse(&format!("{}/", self.endpoint))
                .map_err(|e| DomainError::Config(e.to_string()))?
        };
        base.join("chat/completions")
            .map_err(|e| DomainError::Config(e.to_string()))
    }
}

/// The fixed instruction template sent with every translation request.
pub fn build_translation_prompt(text: &str, source_language_name: &str) -> String {
    format!(
        "Translate the following text from {source_language_name} to English. \
         Only provide the translated text, nothing else. Text: {text}"
    )
}

/// Pull the completion text out of a response, if any non-blank text exists.
fn extract_completion(response: &CompletionResponse) -> Option<String> {
    response
        .choices
        .first()
        .and_then(|choice| choice.message.content.as_deref())
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .map(str::to_string)
}

/// The whole payload is the translation; an empty payload resolves to the
/// fallback text rather than an error, since the endpoint did answer.
fn completion_to_translation(response: &CompletionResponse) -> String {
    extract_completion(response).unwrap_or_else(|| EMPTY_PAYLOAD_FALLBACK.to_string())
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl TranslationApi for CompletionApiClient {
    async fn translate(
        &self,
        text: &str,
        source_language_name: &str,
    ) -> Result<String, DomainError> {
        let prompt = build_translation_prompt(text, source_language_name);
        let request = CompletionRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: &prompt,
            }],
        };

        let url = self.completions_url()?;
        debug!(url = %url, source = source_language_name, "Issuing translation request");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::HttpRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::HttpRequest(format!(
                "HTTP {} from translation endpoint",
                status
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| DomainError::HttpRequest(e.to_string()))?;

        Ok(completion_to_translation(&completion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_text_and_language() {
        let prompt = build_translation_prompt("ನಮಸ್ಕಾರ", "Kannada");
        assert!(prompt.contains("ನಮಸ್ಕಾರ"));
        assert!(prompt.contains("Kannada"));
        assert!(prompt.contains("to English"));
        assert!(prompt.contains("Only provide the translated text, nothing else."));
    }

    #[test]
    fn test_extract_completion_trims_payload() {
        let response: CompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  Hello\n"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_completion(&response).as_deref(), Some("Hello"));
    }

    #[test]
    fn test_extract_completion_empty_payload() {
        for body in [
            r#"{"choices":[]}"#,
            r#"{"choices":[{"message":{"content":""}}]}"#,
            r#"{"choices":[{"message":{"content":"   "}}]}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
            r#"{}"#,
        ] {
            let response: CompletionResponse = serde_json::from_str(body).unwrap();
            assert_eq!(extract_completion(&response), None, "body: {}", body);
        }
    }

    #[test]
    fn test_empty_payload_resolves_to_fallback() {
        let response: CompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(completion_to_translation(&response), "Translation failed.");

        let response: CompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"Hello"}}]}"#).unwrap();
        assert_eq!(completion_to_translation(&response), "Hello");
    }

    #[test]
    fn test_client_rejects_invalid_endpoint() {
        let config = ApiConfig {
            endpoint: "not a url".to_string(),
            ..ApiConfig::default()
        };
        let result = CompletionApiClient::with_api_key(&config, "key".to_string());
        assert!(matches!(result, Err(DomainError::Config(_))));
    }

    #[test]
    fn test_completions_url_with_and_without_trailing_slash() {
        for endpoint in ["https://api.example.com/v1", "https://api.example.com/v1/"] {
            let config = ApiConfig {
                endpoint: endpoint.to_string(),
                ..ApiConfig::default()
            };
            let client = CompletionApiClient::with_api_key(&config, "key".to_string()).unwrap();
            assert_eq!(
                client.completions_url().unwrap().as_str(),
                "https://api.example.com/v1/chat/completions"
            );
        }
    }
}
