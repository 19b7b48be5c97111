//! OpenAI-compatible chat-completions generator
//!
//! Works against any service exposing the `/chat/completions` shape; the
//! base URL is configurable so tests can point it at a local mock.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{ProviderError, Result};
use crate::generator::TextGenerator;

/// Configuration for [`OpenAiCompatGenerator`]
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// API key sent as a bearer token
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature; impact judgments want determinism, so 0.0
    pub temperature: f32,
}

impl GeneratorConfig {
    /// Creates a config with temperature pinned to 0.0
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            temperature: 0.0,
        }
    }
}

/// Chat-completions generator over HTTP
#[derive(Debug)]
pub struct OpenAiCompatGenerator {
    client: Client,
    config: GeneratorConfig,
}

impl OpenAiCompatGenerator {
    /// Creates a generator, rejecting an empty API key up front
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(ProviderError::ConfigError("API key is required".to_string()));
        }

        Ok(Self {
            client: Client::new(),
            config,
        })
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.config.api_key)
    }
}

#[async_trait]
impl TextGenerator for OpenAiCompatGenerator {
    fn id(&self) -> &str {
        "openai-compat"
    }

    async fn generate(&self, instruction: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: instruction.to_string(),
            }],
            temperature: self.config.temperature,
        };

        debug!(model = %self.config.model, "sending chat request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", self.auth_header())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("chat request failed: {e}");
                ProviderError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "chat request rejected: {body}");

            return match status.as_u16() {
                401 | 403 => Err(ProviderError::AuthError),
                429 => Err(ProviderError::RateLimited(60)),
                _ => Err(ProviderError::Unavailable(format!("status {status}"))),
            };
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("malformed response body: {e}")))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .map(|m| m.content)
            .ok_or_else(|| ProviderError::Unavailable("no content in response".to_string()))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn generator(base_url: &str) -> OpenAiCompatGenerator {
        OpenAiCompatGenerator::new(GeneratorConfig::new(base_url, "test-key", "test-model"))
            .unwrap()
    }

    #[test]
    fn empty_api_key_is_a_config_error() {
        let err = OpenAiCompatGenerator::new(GeneratorConfig::new("http://x", "", "m")).unwrap_err();
        assert!(matches!(err, ProviderError::ConfigError(_)));
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "{\"rules_changed\": 2}"}}]
            })))
            .mount(&server)
            .await;

        let text = generator(&server.uri()).generate("analyze this").await.unwrap();
        assert_eq!(text, "{\"rules_changed\": 2}");
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = generator(&server.uri()).generate("x").await.unwrap_err();
        assert_eq!(err, ProviderError::AuthError);
    }

    #[tokio::test]
    async fn rate_limit_maps_to_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = generator(&server.uri()).generate("x").await.unwrap_err();
        assert_eq!(err, ProviderError::RateLimited(60));
    }

    #[tokio::test]
    async fn empty_choices_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = generator(&server.uri()).generate("x").await.unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable(_)));
    }
}
