//! HTTP transport for the chat completion service.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::message::ChatMessage;
use crate::config::ChatConfig;
use crate::error::SalutisError;

/// Sends a conversation to a completion service and returns the raw reply.
#[cfg_attr(test, mockall::automock)]
pub trait ChatTransport {
    /// Send `messages` and return the content of the first choice.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// response without a first choice.
    fn send(&self, messages: &[ChatMessage]) -> Result<String, SalutisError>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
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
    content: String,
}

/// Blocking HTTP transport for an OpenAI-style `chat/completions` endpoint.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: Option<String>,
}

impl HttpTransport {
    /// Build a transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &ChatConfig) -> Result<Self, SalutisError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SalutisError::Chat(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        })
    }

    /// The endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ChatTransport for HttpTransport {
    fn send(&self, messages: &[ChatMessage]) -> Result<String, SalutisError> {
        let request = CompletionRequest {
            messages,
            model: self.model.as_deref(),
        };
        debug!(endpoint = %self.endpoint, messages = messages.len(), "sending chat request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .map_err(|e| SalutisError::Chat(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SalutisError::Chat(format!("AI API error: {status}")));
        }

        let body: CompletionResponse = response
            .json()
            .map_err(|e| SalutisError::Chat(format!("Malformed response: {e}")))?;

        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| SalutisError::Chat("Response contained no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_missing_model() {
        let messages = vec![ChatMessage::user("hi")];
        let request = CompletionRequest {
            messages: &messages,
            model: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"messages":[{"role":"user","content":"hi"}]}"#);
    }

    #[test]
    fn test_request_includes_model() {
        let messages = vec![ChatMessage::user("hi")];
        let request = CompletionRequest {
            messages: &messages,
            model: Some("qwen"),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.ends_with(r#""model":"qwen"}"#));
    }

    #[test]
    fn test_response_parses_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Breathe."}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Breathe.");
    }

    #[test]
    fn test_transport_from_config() {
        let transport = HttpTransport::from_config(&ChatConfig::default()).unwrap();
        assert_eq!(transport.endpoint(), "https://ai.hackclub.com/chat/completions");
    }
}
