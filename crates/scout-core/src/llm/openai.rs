//! OpenAI-compatible chat-completions client.
//!
//! Groq, OpenAI and most hosted inference gateways accept the same
//! `POST {base}/chat/completions` shape, so one client covers them; the
//! default target is Groq.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{ChatModel, GenerationParams, ModelError, PromptTurn};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
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
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for an OpenAI-compatible completion endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiCompatClient {
    http: Client,
    api_key: String,
    endpoint: String,
    model: String,
    provider: String,
}

impl OpenAiCompatClient {
    /// Build a client. `timeout` of `None` means a call waits as long as the
    /// provider takes.
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        model: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ModelError> {
        let mut builder = Client::builder().connect_timeout(Duration::from_secs(10));
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            http: builder.build()?,
            api_key: api_key.into(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.into(),
            provider: "groq".to_owned(),
        })
    }

    /// Groq with the default model.
    pub fn groq(api_key: impl Into<String>) -> Result<Self, ModelError> {
        Self::new(api_key, DEFAULT_BASE_URL, DEFAULT_MODEL, None)
    }

    /// Override the provider label reported by [`ChatModel::provider`].
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatModel for OpenAiCompatClient {
    async fn complete(
        &self,
        turns: &[PromptTurn],
        params: &GenerationParams,
    ) -> Result<String, ModelError> {
        let request = CompletionRequest {
            model: &self.model,
            messages: turns
                .iter()
                .map(|t| WireMessage {
                    role: t.role.as_str(),
                    content: &t.content,
                })
                .collect(),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        debug!(
            provider = %self.provider,
            model = %self.model,
            turns = turns.len(),
            temperature = params.temperature,
            max_tokens = ?params.max_tokens,
            "sending completion request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .inspect_err(|e| error!(provider = %self.provider, error = %e, "completion request failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_owned());
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.clone());
            error!(provider = %self.provider, status = status.as_u16(), %message, "provider error");
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
                body,
            });
        }

        let parsed: CompletionResponse = response.json().await?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ModelError::InvalidResponse("response contained no completion text".into()))?;

        info!(provider = %self.provider, model = %self.model, output_len = text.len(), "completion received");
        Ok(text)
    }

    fn provider(&self) -> &str {
        &self.provider
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::{Value, json};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> OpenAiCompatClient {
        OpenAiCompatClient::new("test-key", &server.uri(), "test-model", None).unwrap()
    }

    fn turns() -> Vec<PromptTurn> {
        vec![PromptTurn::system("be brief"), PromptTurn::user("hello")]
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "test-model",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "hello"}
                ],
                "max_tokens": 50
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "hi there"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server)
            .complete(&turns(), &GenerationParams::new(0.6, Some(50)))
            .await
            .unwrap();
        assert_eq!(text, "hi there");
    }

    #[tokio::test]
    async fn omits_max_tokens_when_uncapped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "ok"}}]
            })))
            .mount(&server)
            .await;

        client(&server)
            .complete(&turns(), &GenerationParams::new(0.7, None))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: Value = requests[0].body_json().unwrap();
        assert!(body.get("max_tokens").is_none());
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn provider_error_message_is_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Invalid API Key", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .complete(&turns(), &GenerationParams::new(0.7, None))
            .await
            .unwrap_err();
        match err {
            ModelError::Api {
                status,
                message,
                body,
            } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API Key");
                assert!(body.contains("invalid_request_error"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_is_kept_raw() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
            .mount(&server)
            .await;

        let err = client(&server)
            .complete(&turns(), &GenerationParams::new(0.7, None))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "API returned 503: upstream overloaded");
    }

    #[tokio::test]
    async fn empty_choices_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = client(&server)
            .complete(&turns(), &GenerationParams::new(0.7, None))
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidResponse(_)));
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let c = OpenAiCompatClient::new("k", "https://api.groq.com/openai/v1/", "m", None).unwrap();
        assert_eq!(c.endpoint(), "https://api.groq.com/openai/v1/chat/completions");
        assert_eq!(c.provider(), "groq");
        assert_eq!(c.with_provider("openai").provider(), "openai");
    }
}
