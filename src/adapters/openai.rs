use crate::config::ProviderConfig;
use crate::core::ChatProvider;
use crate::utils::error::{PostgenError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for OpenAI-compatible chat-completion endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        Ok(Self {
            client: builder.build()?,
            api_key: config.api_key.clone(),
            endpoint: format!("{}/chat/completions", config.api_base.trim_end_matches('/')),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAiClient {
    async fn complete_json(&self, prompt: &str) -> Result<Option<String>> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            response_format: ResponseFormat {
                r#type: "json_object",
            },
        };

        tracing::debug!("Sending chat completion to {} (model {})", self.endpoint, self.model);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Provider response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PostgenError::ProviderStatus {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| PostgenError::missing_field("choices"))?;

        Ok(choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn config(api_base: String) -> ProviderConfig {
        ProviderConfig {
            api_key: "sk-test".to_string(),
            api_base,
            model: DEFAULT_MODEL.to_string(),
            timeout_seconds: Some(5),
        }
    }

    fn completion(content: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
            ]
        })
    }

    #[tokio::test]
    async fn test_complete_json_sends_json_object_request() {
        let server = MockServer::start();
        let content = r#"{"posts":[{"platform":"Twitter","content":"Hi"}]}"#;

        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer sk-test")
                .body_contains(r#""response_format":{"type":"json_object"}"#)
                .body_contains(r#""role":"user""#)
                .body_contains(r#""model":"gpt-4o""#);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(completion(serde_json::json!(content)));
        });

        let client = OpenAiClient::new(&config(server.url("/v1"))).unwrap();
        let result = client.complete_json("Generate posts").await.unwrap();

        api_mock.assert();
        assert_eq!(result.as_deref(), Some(content));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(completion(serde_json::json!("{}")));
        });

        let client = OpenAiClient::new(&config(server.url("/v1/"))).unwrap();
        client.complete_json("prompt").await.unwrap();

        api_mock.assert();
    }

    #[tokio::test]
    async fn test_null_content_is_none() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(completion(serde_json::Value::Null));
        });

        let client = OpenAiClient::new(&config(server.base_url())).unwrap();
        let result = client.complete_json("prompt").await.unwrap();

        api_mock.assert();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_error_status_is_provider_status() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(401)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"error": {"message": "Incorrect API key"}}));
        });

        let client = OpenAiClient::new(&config(server.base_url())).unwrap();
        let err = client.complete_json("prompt").await.unwrap_err();

        api_mock.assert();
        match err {
            PostgenError::ProviderStatus { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Incorrect API key"));
            }
            other => panic!("expected ProviderStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_missing_field() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"choices": []}));
        });

        let client = OpenAiClient::new(&config(server.base_url())).unwrap();
        let err = client.complete_json("prompt").await.unwrap_err();

        assert!(matches!(err, PostgenError::MissingField { ref field } if field == "choices"));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_transport_error() {
        // grab a free port, then release it so nothing is listening there
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = OpenAiClient::new(&config(format!("http://127.0.0.1:{}", port))).unwrap();
        let err = client.complete_json("prompt").await.unwrap_err();
        assert!(matches!(err, PostgenError::Provider(_)));
    }
}
