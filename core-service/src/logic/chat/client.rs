//! Chat Completion Client
//!
//! Stateless adapter: message list in, reply text out. Talks to an
//! OpenAI-compatible `/chat/completions` endpoint (Groq by default) with a
//! fixed model and temperature. No retries, no streaming.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::types::{UpstreamError, WireMessage};

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send the ordered message list; return the first choice's text
    async fn complete(&self, messages: &[WireMessage]) -> Result<String, UpstreamError>;
}

/// Chat service configuration
#[derive(Clone)]
pub struct ChatConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        use crate::constants;

        Self {
            base_url: constants::get_chat_base_url(),
            api_key: constants::get_chat_api_key(),
            model: constants::get_chat_model(),
            temperature: constants::CHAT_TEMPERATURE,
            timeout: constants::get_chat_timeout(),
        }
    }
}

// Never print the key
impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [WireMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// HTTP client for the hosted completion service
pub struct GroqChatClient {
    config: ChatConfig,
    http_client: reqwest::Client,
}

impl GroqChatClient {
    pub fn new(config: ChatConfig) -> Result<Self, UpstreamError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| UpstreamError::Network(format!("Failed to create HTTP client: {}", e)))?;

        if config.api_key.is_none() {
            log::warn!("GROQ_API_KEY not set; chat replies will fail");
        }

        Ok(Self { config, http_client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatClient for GroqChatClient {
    async fn complete(&self, messages: &[WireMessage]) -> Result<String, UpstreamError> {
        let api_key = self.config.api_key.as_ref()
            .ok_or(UpstreamError::NotConfigured)?;

        let request = CompletionRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
        };

        log::debug!("Chat completion: {} messages -> {}", messages.len(), self.config.model);

        let response = self.http_client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            log::error!("Chat completion failed ({}): {}", status.as_u16(), message);
            return Err(UpstreamError::Status { status: status.as_u16(), message });
        }

        let completion: CompletionResponse = response.json().await
            .map_err(|e| UpstreamError::Parse(e.to_string()))?;

        completion.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(UpstreamError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::chat::types::ChatRole;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, api_key: Option<&str>) -> GroqChatClient {
        GroqChatClient::new(ChatConfig {
            base_url: server.uri(),
            api_key: api_key.map(str::to_string),
            model: "test-model".to_string(),
            temperature: 0.3,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn user(content: &str) -> WireMessage {
        WireMessage { role: ChatRole::User, content: content.to_string() }
    }

    #[tokio::test]
    async fn test_complete_sends_contract_and_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer secret"))
            .and(body_json(json!({
                "model": "test-model",
                "messages": [
                    { "role": "user", "content": "hi" },
                    { "role": "assistant", "content": "hello" },
                    { "role": "user", "content": "is it safe?" }
                ],
                "temperature": 0.3
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "first" } },
                    { "message": { "role": "assistant", "content": "second" } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let messages = vec![
            user("hi"),
            WireMessage { role: ChatRole::Assistant, content: "hello".to_string() },
            user("is it safe?"),
        ];
        let reply = client_for(&server, Some("secret")).complete(&messages).await.unwrap();
        assert_eq!(reply, "first");
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server, None).complete(&[user("hi")]).await.unwrap_err();
        assert_eq!(err, UpstreamError::NotConfigured);
    }

    #[tokio::test]
    async fn test_error_status_surfaces_service_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "message": "Invalid API Key", "type": "invalid_request_error" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server, Some("bad")).complete(&[user("hi")]).await.unwrap_err();
        assert_eq!(
            err,
            UpstreamError::Status { status: 401, message: "Invalid API Key".to_string() }
        );
    }

    #[tokio::test]
    async fn test_no_choices_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = client_for(&server, Some("k")).complete(&[user("hi")]).await.unwrap_err();
        assert_eq!(err, UpstreamError::EmptyResponse);
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server, Some("k")).complete(&[user("hi")]).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Parse(_)));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ChatConfig {
            api_key: Some("super-secret".to_string()),
            ..ChatConfig::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
    }
}
