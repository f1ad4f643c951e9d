use async_trait::async_trait;
use lexquiz_core::{
    config::{Config, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL},
    provider::{ChatProvider, ProviderError},
    types::ChatTurn,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::persona::conversation;

/// Calls Google Gemini's `generateContent` REST endpoint.
///
/// Stateless: the whole conversation (persona, acknowledgement, history,
/// new message) is sent on every call.
pub struct GeminiBackend {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl GeminiBackend {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.into(),
            timeout_secs: 30,
        }
    }

    /// Backend for the configured key, or `None` when no key is set.
    pub fn from_config(config: &Config) -> Option<Self> {
        if !config.provider_enabled() {
            return None;
        }
        Some(
            Self::new(config.gemini_api_key.clone())
                .with_model(config.gemini_model.clone())
                .with_base_url(config.gemini_base_url.clone())
                .with_timeout(config.provider_timeout_s),
        )
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Request body for a conversation turn.
pub fn build_request(message: &str, history: &[ChatTurn]) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: conversation(message, history)
            .into_iter()
            .map(|(speaker, text)| GeminiContent {
                role: speaker.as_str().into(),
                parts: vec![GeminiPart { text }],
            })
            .collect(),
    }
}

/// Map a non-success response to a provider error.
///
/// Key problems are checked before quota problems; anything else keeps the
/// HTTP status and provider message.
pub fn classify_error(http_status: u16, body: &str) -> ProviderError {
    let (message, api_status) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) => (env.error.message, env.error.status),
        Err(_) => (body.trim().to_string(), String::new()),
    };

    if message.contains("API_KEY")
        || message.contains("API key")
        || api_status == "UNAUTHENTICATED"
        || matches!(http_status, 401 | 403)
    {
        return ProviderError::InvalidCredential(message);
    }
    if message.contains("quota")
        || message.contains("RESOURCE_EXHAUSTED")
        || api_status == "RESOURCE_EXHAUSTED"
        || http_status == 429
    {
        return ProviderError::QuotaExceeded(message);
    }
    ProviderError::Api {
        status: http_status,
        message,
    }
}

fn extract_text(body: &str) -> Result<String, ProviderError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::Transport(format!("failed to parse gemini response: {e}")))?;

    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }
    Ok(text)
}

#[async_trait]
impl ChatProvider for GeminiBackend {
    fn name(&self) -> &str {
        &self.model
    }

    async fn converse(&self, message: &str, history: &[ChatTurn]) -> Result<String, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::NotConfigured);
        }

        let request_body = build_request(message, history);

        info!(
            model = %self.model,
            history_len = history.len(),
            "calling gemini generateContent"
        );

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let response = match client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                warn!(model = %self.model, timeout_secs = self.timeout_secs, "gemini request timed out");
                return Err(ProviderError::Timeout(self.timeout_secs));
            },
            Err(e) => {
                warn!(model = %self.model, "gemini request failed: {}", e);
                return Err(ProviderError::Transport(e.to_string()));
            },
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!(model = %self.model, status = %status, "gemini returned non-200: {}", body);
            return Err(classify_error(status.as_u16(), &body));
        }

        let output = extract_text(&body)?;

        info!(model = %self.model, output_len = output.len(), "gemini response received");

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_errors_win_over_quota_wording() {
        let body = r#"{"error":{"code":400,"message":"API key not valid; quota unknown","status":"INVALID_ARGUMENT"}}"#;
        assert!(matches!(classify_error(400, body), ProviderError::InvalidCredential(_)));
    }

    #[test]
    fn resource_exhausted_is_quota() {
        let body = r#"{"error":{"code":429,"message":"Too many requests","status":"RESOURCE_EXHAUSTED"}}"#;
        assert!(matches!(classify_error(429, body), ProviderError::QuotaExceeded(_)));
    }

    #[test]
    fn plain_text_server_error_keeps_status() {
        match classify_error(503, "upstream unavailable\n") {
            ProviderError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "upstream unavailable");
            },
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parts_are_concatenated() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Article 21 "},{"text":"protects life."}]}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "Article 21 protects life.");
    }

    #[test]
    fn missing_candidates_is_empty_response() {
        assert!(matches!(extract_text(r#"{"candidates":[]}"#), Err(ProviderError::EmptyResponse)));
        assert!(matches!(
            extract_text(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#),
            Err(ProviderError::EmptyResponse)
        ));
    }

    #[test]
    fn endpoint_includes_model() {
        let b = GeminiBackend::new("k").with_base_url("http://127.0.0.1:9/").with_model("gemini-x");
        assert_eq!(b.endpoint(), "http://127.0.0.1:9/v1beta/models/gemini-x:generateContent");
    }
}
