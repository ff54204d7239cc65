//! LLM client: the single point of entry for chat-completion calls.
//!
//! No other module may call the completion API directly. One inbound request
//! maps to exactly one outbound call; failures are not retried.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::upstream::{interpret_upstream_error, UpstreamFailure};

pub mod prompts;

pub const SERVICE: &str = "OpenAI";
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error(transparent)]
    Upstream(#[from] UpstreamFailure),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("LLM content is not a JSON object")]
    NotAnObject,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    response_format: ResponseFormat,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

impl CompletionResponse {
    /// Extracts the non-empty text of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

/// Wraps the chat-completions endpoint with JSON-object output helpers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(client: Client, api_key: String, base_url: String, model: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a single call to the completion API, returning the full response object.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<CompletionResponse, LlmError> {
        let request_body = CompletionRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| UpstreamFailure::unreachable(SERVICE, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(interpret_upstream_error(SERVICE, status, &body).into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamFailure::unreachable(SERVICE, &e))?;
        let completion: CompletionResponse = serde_json::from_slice(&body)?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(completion)
    }

    /// Calls the LLM and parses the text response as a JSON object.
    /// The prompt must instruct the model to return a JSON object.
    pub async fn call_json_object(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<Map<String, Value>, LlmError> {
        let response = self.call(prompt, system).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        parse_json_object(text)
    }
}

/// Parses completion text as a JSON object, tolerating Markdown code fences.
pub fn parse_json_object(text: &str) -> Result<Map<String, Value>, LlmError> {
    match serde_json::from_str::<Value>(strip_json_fences(text))? {
        Value::Object(map) => Ok(map),
        _ => Err(LlmError::NotAnObject),
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn client_for(server: &MockServer) -> LlmClient {
        LlmClient::new(
            Client::new(),
            "sk-test".to_string(),
            server.url("/v1"),
            "gpt-4o".to_string(),
        )
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_parse_json_object_rejects_arrays() {
        assert!(matches!(
            parse_json_object("[1, 2, 3]"),
            Err(LlmError::NotAnObject)
        ));
        assert!(matches!(
            parse_json_object("not json"),
            Err(LlmError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_call_sends_json_object_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/chat/completions")
                    .header("authorization", "Bearer sk-test")
                    .json_body_partial(
                        r#"{"model":"gpt-4o","response_format":{"type":"json_object"}}"#,
                    );
                then.status(200).json_body(json!({
                    "choices": [{"message": {"role": "assistant", "content": "{\"summary\":\"ok\"}"}}],
                    "usage": {"prompt_tokens": 10, "completion_tokens": 3}
                }));
            })
            .await;

        let object = client_for(&server)
            .call_json_object("job", "system")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(object.get("summary"), Some(&json!("ok")));
    }

    #[tokio::test]
    async fn test_partial_usage_does_not_fail_the_completion() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200).json_body(json!({
                    "choices": [{"message": {"content": "{\"summary\":\"ok\"}"}}],
                    "usage": {"total_tokens": 13}
                }));
            })
            .await;

        let object = client_for(&server)
            .call_json_object("job", "system")
            .await
            .unwrap();
        assert_eq!(object.get("summary"), Some(&json!("ok")));
    }

    #[tokio::test]
    async fn test_empty_choices_is_empty_content() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200).json_body(json!({"choices": []}));
            })
            .await;

        let err = client_for(&server)
            .call_json_object("job", "system")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_error_status_is_interpreted() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(429)
                    .json_body(json!({"error": {"message": "Rate limit reached"}}));
            })
            .await;

        match client_for(&server).call("job", "system").await {
            Err(LlmError::Upstream(failure)) => {
                assert_eq!(failure.message, "Rate limit reached");
                assert_eq!(failure.status.map(|s| s.as_u16()), Some(429));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
