//! HTTP client for the chat-completions API.
//!
//! Provides [`CompletionClient`], which handles request construction and
//! bearer authentication. The upstream payload is relayed verbatim; there is
//! no retry and no rate limiting, and a slow upstream call blocks only the
//! request that made it.

use std::time::Duration;

use clinic_types::NonEmptyText;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use crate::types::{ChatMessage, CompletionRequest};
use crate::ChatError;

/// Endpoint of the upstream chat-completions API.
const API_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Model requested when the deployment does not configure one.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// How long a single completion call may take before the request errors.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the upstream completion service.
///
/// Holds the API credential in its default headers so it never reaches the
/// browser or the CLI; constructed once at startup and cloned into handlers.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: reqwest::Client,
    model: String,
    base_url: String,
}

impl CompletionClient {
    /// Creates a new completion client.
    ///
    /// # Arguments
    /// * `api_key` - Upstream API key, sent as a bearer token
    /// * `model` - Model identifier to request completions from
    pub fn new(api_key: &NonEmptyText, model: &NonEmptyText) -> Result<Self, ChatError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", api_key.as_str());
        let mut auth_value = HeaderValue::from_str(&bearer)
            .map_err(|e| ChatError::Config(format!("invalid API key header value: {e}")))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ChatError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            model: model.as_str().to_owned(),
            base_url: API_BASE_URL.to_owned(),
        })
    }

    /// Returns the model identifier requested from the upstream service.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Posts `transcript` to the completions endpoint and relays the upstream
    /// JSON payload unmodified.
    ///
    /// A non-success upstream status is surfaced as [`ChatError::Upstream`]
    /// carrying the status and body for the server log.
    pub async fn complete(
        &self,
        transcript: &[ChatMessage],
    ) -> Result<serde_json::Value, ChatError> {
        let request = CompletionRequest {
            model: &self.model,
            messages: transcript,
        };

        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, turns = transcript.len(), "completion response received");

        let body = response.text().await?;
        if !status.is_success() {
            return Err(ChatError::Upstream { status, body });
        }

        serde_json::from_str(&body).map_err(ChatError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: String) -> CompletionClient {
        let key = NonEmptyText::new("test-key").unwrap();
        let model = NonEmptyText::new(DEFAULT_MODEL).unwrap();
        CompletionClient::new(&key, &model)
            .unwrap()
            .with_base_url(base_url)
    }

    fn transcript() -> Vec<ChatMessage> {
        vec![
            ChatMessage::new("system", "You are a helpful assistant."),
            ChatMessage::new("user", "I have a fever."),
        ]
    }

    #[tokio::test]
    async fn relays_the_upstream_payload_verbatim() {
        let server = MockServer::start().await;
        let payload = json!({
            "id": "chatcmpl-123",
            "choices": [{"message": {"role": "assistant", "content": "Rest and hydrate."}}],
            "usage": {"total_tokens": 42}
        });

        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({"model": DEFAULT_MODEL})))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let relayed = client.complete(&transcript()).await.unwrap();

        assert_eq!(relayed, payload);
    }

    #[tokio::test]
    async fn sends_the_full_transcript() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "messages": [
                    {"role": "system", "content": "You are a helpful assistant."},
                    {"role": "user", "content": "I have a fever."}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        client.complete(&transcript()).await.unwrap();
    }

    #[tokio::test]
    async fn upstream_failure_carries_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429).set_body_string("{\"error\": \"rate limited\"}"),
            )
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let err = client.complete(&transcript()).await.unwrap_err();

        match err {
            ChatError::Upstream { status, body } => {
                assert_eq!(status, reqwest::StatusCode::TOO_MANY_REQUESTS);
                assert!(body.contains("rate limited"));
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_success_body_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let err = client.complete(&transcript()).await.unwrap_err();

        assert!(matches!(err, ChatError::Decode(_)));
    }
}
