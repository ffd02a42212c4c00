//! Generative Advice Provider
//!
//! A provider turns one prompt into one piece of text. There is no session or
//! conversation state: every call is a single request/response.
//!
//! `OpenAiProvider` talks to any OpenAI-compatible `/v1/chat/completions`
//! endpoint and reads only `choices[0].message.content`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::prompt::Prompt;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Ways a provider call can fail. The resolver treats all of them the same.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("advice provider not configured (no API key)")]
    Unavailable,

    #[error("advice provider timed out after {0:?}")]
    Timeout(Duration),

    #[error("advice provider transport error: {0}")]
    Transport(String),

    #[error("advice provider bad response: {0}")]
    BadResponse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout(Duration::ZERO)
        } else if e.is_decode() {
            ProviderError::BadResponse(e.to_string())
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}

#[async_trait]
pub trait AdviceProvider: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Generate text for a prompt. Implementations should not retry.
    async fn generate(&self, prompt: &Prompt) -> Result<String, ProviderError>;
}

// ============================================================================
// OpenAI-compatible client
// ============================================================================

/// Connection settings for an OpenAI-compatible endpoint
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            max_tokens: 120,
            temperature: 0.6,
            timeout: Duration::from_secs(4),
        }
    }
}

pub struct OpenAiProvider {
    settings: OpenAiSettings,
    http_client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(settings: OpenAiSettings) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self { settings, http_client })
    }

    pub fn has_credentials(&self) -> bool {
        self.settings
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

#[async_trait]
impl AdviceProvider for OpenAiProvider {
    fn name(&self) -> &str {
        &self.settings.model
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let api_key = match self.settings.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(ProviderError::Unavailable),
        };

        let request = ChatRequest {
            model: &self.settings.model,
            messages: [
                ChatMessage { role: "system", content: &prompt.system },
                ChatMessage { role: "user", content: &prompt.user },
            ],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let response = self.http_client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| match ProviderError::from(e) {
                ProviderError::Timeout(_) => ProviderError::Timeout(self.settings.timeout),
                other => other,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::BadResponse(format!("HTTP {}", status)));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::BadResponse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| ProviderError::BadResponse("no generated text".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        let provider = OpenAiProvider::new(OpenAiSettings {
            base_url: "http://localhost:9999/v1/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:9999/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_missing_key_is_unavailable_without_network() {
        let provider = OpenAiProvider::new(OpenAiSettings {
            api_key: Some("   ".to_string()),
            // Unroutable: any attempt to connect would fail differently
            base_url: "http://192.0.2.1:1/v1".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert!(!provider.has_credentials());

        let prompt = Prompt { system: "s".into(), user: "u".into() };
        let err = provider.generate(&prompt).await.unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ProviderError::Timeout(Duration::from_secs(4)).to_string(),
            "advice provider timed out after 4s"
        );
        assert!(ProviderError::BadResponse("HTTP 500".into()).to_string().contains("HTTP 500"));
    }
}
