// src/provider/openai_compat.rs — Generic OpenAI-compatible chat provider
//
// Talks to any `/chat/completions` endpoint: OpenAI, Ollama, Groq, vLLM,
// OpenRouter, and similar.

use std::time::Duration;

use async_trait::async_trait;

use super::{ChatRequest, ChatResponse, Choice, Message, ModelInfo, ModelProvider, Role};
use super::{StopReason, TokenUsage};
use crate::infra::errors::ProviderError;

/// Used when the server rate-limits without a usable Retry-After header.
const DEFAULT_RETRY_AFTER_MS: u64 = 5_000;

pub struct OpenAICompatProvider {
    id_str: String,
    name_str: String,
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAICompatProvider {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        api_key: Option<String>,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ProviderError> {
        let id_str = id.into();
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            "faithjudge/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ProviderError::Provider {
            provider: id_str.clone(),
            message: format!("Failed to build HTTP client: {e}"),
            retriable: false,
        })?;

        Ok(Self {
            id_str,
            name_str: name.into(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn provider_error(&self, message: impl Into<String>, retriable: bool) -> ProviderError {
        ProviderError::Provider {
            provider: self.id_str.clone(),
            message: message.into(),
            retriable,
        }
    }
}

#[async_trait]
impl ModelProvider for OpenAICompatProvider {
    fn id(&self) -> &str {
        &self.id_str
    }

    fn name(&self) -> &str {
        &self.name_str
    }

    fn models(&self) -> Vec<ModelInfo> {
        // Arbitrary model ids are served; nothing to advertise up front.
        Vec::new()
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        let body = build_body(&request);

        tracing::debug!(
            provider = %self.id_str,
            model = %request.model,
            messages = request.messages.len(),
            "Sending chat completion request"
        );

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| {
                self.provider_error(e.to_string(), is_transient(e.is_timeout(), e.is_connect()))
            })?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if let Some(err) = classify_status(&self.id_str, status, retry_after.as_deref()) {
            let err = match err {
                ProviderError::Provider {
                    provider,
                    message,
                    retriable,
                } => {
                    let error_body = response.text().await.unwrap_or_default();
                    ProviderError::Provider {
                        provider,
                        message: format!("{message}: {error_body}"),
                        retriable,
                    }
                }
                other => other,
            };
            tracing::debug!(provider = %self.id_str, %status, "Chat completion failed");
            return Err(err);
        }

        let resp: serde_json::Value = response
            .json()
            .await
            .map_err(|e| self.provider_error(format!("Failed to parse response: {}", e), false))?;

        let parsed = parse_response(&resp)
            .ok_or_else(|| self.provider_error("Response has no 'choices' array", false))?;

        tracing::debug!(
            provider = %self.id_str,
            choices = parsed.choices.len(),
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            "Chat completion received"
        );

        Ok(parsed)
    }
}

/// Error for a non-2xx status, `None` on success. 429 becomes `RateLimited`,
/// 5xx a retriable `Provider` error, anything else a terminal one.
pub(crate) fn classify_status(
    provider: &str,
    status: reqwest::StatusCode,
    retry_after: Option<&str>,
) -> Option<ProviderError> {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_ms = retry_after
            .and_then(parse_retry_after_ms)
            .unwrap_or(DEFAULT_RETRY_AFTER_MS);
        return Some(ProviderError::RateLimited {
            provider: provider.to_string(),
            retry_after_ms,
        });
    }
    if status.is_success() {
        return None;
    }
    Some(ProviderError::Provider {
        provider: provider.to_string(),
        message: format!("HTTP {status}"),
        retriable: status.is_server_error(),
    })
}

/// Transport failures worth retrying: timeouts and refused/failed connects.
fn is_transient(timeout: bool, connect: bool) -> bool {
    timeout || connect
}

/// JSON body for `/chat/completions`.
pub(crate) fn build_body(request: &ChatRequest) -> serde_json::Value {
    let messages: Vec<serde_json::Value> = request
        .messages
        .iter()
        .map(|m| {
            serde_json::json!({
                "role": m.role.as_str(),
                "content": m.content,
            })
        })
        .collect();

    let mut body = serde_json::json!({
        "model": request.model,
        "messages": messages,
    });
    if let Some(max_tokens) = request.max_tokens {
        body["max_tokens"] = serde_json::json!(max_tokens);
    }
    if let Some(temp) = request.temperature {
        body["temperature"] = serde_json::json!(temp);
    }
    body
}

/// Parse a completion body. `None` when the `choices` array is missing.
pub(crate) fn parse_response(resp: &serde_json::Value) -> Option<ChatResponse> {
    let choices = resp["choices"]
        .as_array()?
        .iter()
        .enumerate()
        .map(|(i, choice)| Choice {
            index: u32::try_from(choice["index"].as_u64().unwrap_or(i as u64))
                .unwrap_or(u32::MAX),
            message: Message {
                role: Role::Assistant,
                content: choice["message"]["content"]
                    .as_str()
                    .unwrap_or("")
                    .to_string(),
            },
            finish_reason: StopReason::from_finish_reason(choice["finish_reason"].as_str()),
        })
        .collect();

    let usage = TokenUsage {
        input_tokens: token_count(&resp["usage"]["prompt_tokens"]),
        output_tokens: token_count(&resp["usage"]["completion_tokens"]),
    };

    Some(ChatResponse { choices, usage })
}

/// Missing counts are zero; counts past `u32::MAX` clamp to it.
fn token_count(value: &serde_json::Value) -> u32 {
    value
        .as_u64()
        .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX))
}

/// Retry-After in whole seconds. HTTP-date values and values too large to
/// express in milliseconds are not supported.
fn parse_retry_after_ms(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()?.checked_mul(1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_build_body_full() {
        let req = ChatRequest {
            model: "gpt-4.1-mini".into(),
            messages: vec![Message::system("sys"), Message::user("hello")],
            max_tokens: Some(500),
            temperature: Some(0.5),
        };
        let body = build_body(&req);
        assert_eq!(body["model"], "gpt-4.1-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "sys");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["max_tokens"], 500);
        assert!((body["temperature"].as_f64().unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_build_body_omits_unset_options() {
        let req = ChatRequest {
            model: "m".into(),
            messages: vec![Message::user("x")],
            ..Default::default()
        };
        let body = build_body(&req);
        assert!(body.get("max_tokens").is_none());
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_parse_response_choices_and_usage() {
        let resp = serde_json::json!({
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "first"}, "finish_reason": "stop"},
                {"index": 1, "message": {"role": "assistant", "content": "second"}, "finish_reason": "length"}
            ],
            "usage": {"prompt_tokens": 812, "completion_tokens": 96}
        });
        let parsed = parse_response(&resp).unwrap();
        assert_eq!(parsed.choices.len(), 2);
        assert_eq!(parsed.first_content(), Some("first"));
        assert_eq!(parsed.choices[1].finish_reason, StopReason::MaxTokens);
        assert_eq!(parsed.usage.total(), 908);
    }

    #[test]
    fn test_parse_response_null_content() {
        let resp = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        });
        let parsed = parse_response(&resp).unwrap();
        assert_eq!(parsed.first_content(), Some(""));
        assert_eq!(parsed.choices[0].finish_reason, StopReason::Unknown);
    }

    #[test]
    fn test_parse_response_empty_choices() {
        let parsed = parse_response(&serde_json::json!({"choices": []})).unwrap();
        assert!(parsed.choices.is_empty());
    }

    #[test]
    fn test_parse_response_missing_choices() {
        assert!(parse_response(&serde_json::json!({"error": "boom"})).is_none());
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after_ms("3"), Some(3000));
        assert_eq!(parse_retry_after_ms(" 10 "), Some(10_000));
        assert_eq!(parse_retry_after_ms("Wed, 21 Oct 2015 07:28:00 GMT"), None);
        assert_eq!(parse_retry_after_ms("18446744073709552"), None);
        assert_eq!(parse_retry_after_ms(&u64::MAX.to_string()), None);
    }

    #[test]
    fn test_parse_response_clamps_oversized_counts() {
        let resp = serde_json::json!({
            "choices": [{"index": 8_589_934_592u64, "message": {"content": "x"}}],
            "usage": {"prompt_tokens": 8_589_934_592u64, "completion_tokens": 7}
        });
        let parsed = parse_response(&resp).unwrap();
        assert_eq!(parsed.choices[0].index, u32::MAX);
        assert_eq!(parsed.usage.input_tokens, u32::MAX);
        assert_eq!(parsed.usage.output_tokens, 7);
        assert_eq!(parsed.usage.total(), u32::MAX);
    }

    // ─── Status classification ──────────────────────────────────

    #[test]
    fn test_classify_success() {
        assert!(classify_status("openai", StatusCode::OK, None).is_none());
        assert!(classify_status("openai", StatusCode::OK, Some("30")).is_none());
    }

    #[test]
    fn test_classify_rate_limited_with_header() {
        let err = classify_status("openai", StatusCode::TOO_MANY_REQUESTS, Some("12")).unwrap();
        assert!(matches!(
            &err,
            ProviderError::RateLimited { provider, retry_after_ms: 12_000 } if provider == "openai"
        ));
        assert!(err.is_retriable());
    }

    #[test]
    fn test_classify_rate_limited_without_header() {
        for header in [None, Some("soon"), Some("18446744073709552")] {
            let err = classify_status("openai", StatusCode::TOO_MANY_REQUESTS, header).unwrap();
            assert!(matches!(
                err,
                ProviderError::RateLimited {
                    retry_after_ms: DEFAULT_RETRY_AFTER_MS,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_classify_server_error_is_retriable() {
        let err = classify_status("ollama", StatusCode::SERVICE_UNAVAILABLE, None).unwrap();
        match err {
            ProviderError::Provider {
                provider,
                message,
                retriable,
            } => {
                assert_eq!(provider, "ollama");
                assert!(message.contains("503"));
                assert!(retriable);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_classify_client_error_is_terminal() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::BAD_REQUEST, StatusCode::NOT_FOUND] {
            let err = classify_status("openai", status, Some("5")).unwrap();
            assert!(matches!(
                err,
                ProviderError::Provider {
                    retriable: false,
                    ..
                }
            ));
            assert!(!err.is_retriable());
        }
    }

    #[test]
    fn test_transport_failures() {
        assert!(is_transient(true, false));
        assert!(is_transient(false, true));
        assert!(!is_transient(false, false));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let p = OpenAICompatProvider::new(
            "ollama",
            "Ollama",
            None,
            "http://localhost:11434/v1/",
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(p.base_url(), "http://localhost:11434/v1");
        assert_eq!(p.id(), "ollama");
        assert!(p.models().is_empty());
    }
}
