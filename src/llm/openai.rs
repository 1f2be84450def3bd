//! OpenAI-compatible chat-completions client.
//!
//! Works against any endpoint that implements `POST {base_url}/chat/completions`
//! with bearer authentication: OpenAI, the Hugging Face inference router, or a
//! self-hosted server. Transient failures (transport errors, 429, 5xx) are
//! retried with exponential backoff; client errors are returned immediately.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{GenerationError, GenerationRequest, TextGenerator};
use crate::config::LlmSettings;

/// Delay before the first retry. Doubles on each subsequent retry.
const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(500);

/// How much of an error body is kept for logs and error messages.
const ERROR_BODY_LIMIT: usize = 500;

/// Chat-completions client for OpenAI-compatible APIs.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleGenerator {
    model: String,
    api_key: Option<String>,
    base_url: String,
    max_retries: u32,
    client: reqwest::Client,
}

impl OpenAiCompatibleGenerator {
    /// Build a client from settings. Each HTTP request gets an equal share
    /// of the overall budget, see [`request_timeout`].
    pub fn new(settings: &LlmSettings) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout(settings))
            .build()?;

        Ok(Self {
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            max_retries: settings.max_retries,
            client,
        })
    }

    /// Whether a credential is configured at all.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Build the request body for the Chat Completions API.
    pub fn build_request_body(&self, request: &GenerationRequest) -> Value {
        serde_json::json!({
            "model": self.model,
            "messages": request.messages(),
            "max_tokens": request.sampling.max_output_tokens,
            "temperature": request.sampling.temperature,
        })
    }

    /// Extract reply text from a Chat Completions response.
    pub fn parse_completion_response(response: &Value) -> Result<String, GenerationError> {
        let content = response
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| GenerationError::Malformed("no message content in first choice".into()))?;

        if let Some(usage) = response.get("usage") {
            log::debug!(
                "Chat completion token usage: prompt={}, completion={}, total={}",
                usage.get("prompt_tokens").and_then(|v| v.as_i64()).unwrap_or(0),
                usage.get("completion_tokens").and_then(|v| v.as_i64()).unwrap_or(0),
                usage.get("total_tokens").and_then(|v| v.as_i64()).unwrap_or(0),
            );
        }

        let text = content.trim();
        if text.is_empty() {
            return Err(GenerationError::Malformed("empty message content".into()));
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl TextGenerator for OpenAiCompatibleGenerator {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential)?;

        let body = self.build_request_body(request);
        let endpoint = self.endpoint();

        let mut last_error = GenerationError::Internal("no attempt was made".into());
        let mut retry_delay = INITIAL_RETRY_DELAY;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                log::warn!(
                    "Chat completion retry attempt {} after {:?}: {}",
                    attempt,
                    retry_delay,
                    last_error
                );
                tokio::time::sleep(retry_delay).await;
                retry_delay *= 2;
            }

            let response = match self
                .client
                .post(&endpoint)
                .bearer_auth(api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    last_error = GenerationError::Network(e);
                    continue;
                }
            };

            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                last_error = GenerationError::RateLimited;
                continue;
            }

            let response_text = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    last_error = GenerationError::Network(e);
                    continue;
                }
            };

            if status.is_server_error() {
                last_error = GenerationError::Api {
                    status: status.as_u16(),
                    body: truncate(&response_text),
                };
                continue;
            }

            if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
                return Err(GenerationError::Auth {
                    status: status.as_u16(),
                });
            }

            if !status.is_success() {
                return Err(GenerationError::Api {
                    status: status.as_u16(),
                    body: truncate(&response_text),
                });
            }

            let response_json: Value = serde_json::from_str(&response_text).map_err(|e| {
                GenerationError::Malformed(format!("{} - body: {}", e, truncate(&response_text)))
            })?;

            return Self::parse_completion_response(&response_json);
        }

        Err(last_error)
    }
}

/// Per-HTTP-request timeout: the generation budget split across the first
/// request and every retry, so a slow request leaves room for the next one.
pub fn request_timeout(settings: &LlmSettings) -> Duration {
    settings.timeout / settings.max_retries.saturating_add(1)
}

fn truncate(text: &str) -> String {
    text.chars().take(ERROR_BODY_LIMIT).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::SamplingConfig;

    fn settings(api_key: Option<&str>) -> LlmSettings {
        LlmSettings {
            api_key: api_key.map(String::from),
            base_url: "https://router.huggingface.co/v1/".to_string(),
            model: "test-model".to_string(),
            ..LlmSettings::default()
        }
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let generator = OpenAiCompatibleGenerator::new(&settings(Some("k"))).unwrap();
        assert_eq!(
            generator.endpoint(),
            "https://router.huggingface.co/v1/chat/completions"
        );
    }

    #[test]
    fn test_build_request_body() {
        let generator = OpenAiCompatibleGenerator::new(&settings(Some("k"))).unwrap();
        let request = GenerationRequest::new("I had a rough day")
            .with_system_prompt("You are supportive.")
            .with_sampling(SamplingConfig::default());

        let body = generator.build_request_body(&request);
        assert_eq!(body["model"], "test-model");
        assert_eq!(body["max_tokens"], 250);
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "I had a rough day");
    }

    #[test]
    fn test_parse_completion_response() {
        let response = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "  I'm here for you.  "}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        });
        let text = OpenAiCompatibleGenerator::parse_completion_response(&response).unwrap();
        assert_eq!(text, "I'm here for you.");
    }

    #[test]
    fn test_parse_rejects_missing_choices() {
        let response = serde_json::json!({"error": "nope"});
        let err = OpenAiCompatibleGenerator::parse_completion_response(&response).unwrap_err();
        assert!(matches!(err, GenerationError::Malformed(_)));
    }

    #[test]
    fn test_parse_rejects_blank_content() {
        let response = serde_json::json!({"choices": [{"message": {"content": "   "}}]});
        let err = OpenAiCompatibleGenerator::parse_completion_response(&response).unwrap_err();
        assert!(matches!(err, GenerationError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_missing_credential_fails_without_request() {
        let generator = OpenAiCompatibleGenerator::new(&settings(None)).unwrap();
        assert!(!generator.has_credential());

        let err = generator
            .generate(&GenerationRequest::new("hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::MissingCredential));
    }

    #[test]
    fn test_request_timeout_splits_budget_across_attempts() {
        let mut settings = settings(Some("k"));
        settings.timeout = Duration::from_secs(20);

        settings.max_retries = 0;
        assert_eq!(request_timeout(&settings), Duration::from_secs(20));

        settings.max_retries = 1;
        assert_eq!(request_timeout(&settings), Duration::from_secs(10));

        settings.max_retries = 3;
        assert_eq!(request_timeout(&settings), Duration::from_secs(5));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let long = "é".repeat(ERROR_BODY_LIMIT + 10);
        assert_eq!(truncate(&long).chars().count(), ERROR_BODY_LIMIT);
    }
}
