use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AdvisorConfig;
use crate::error::{NutriError, Result};
use crate::models::ChatMessage;

/// Longest error body echoed back in a `Completion` error.
const MAX_ERROR_BODY: usize = 300;

/// A single completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: Option<u32>,

    /// Ask the model for a JSON object.
    pub json_mode: bool,
}

impl CompletionRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: 0.7,
            max_tokens: None,
            json_mode: false,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn json(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

/// A text-completion backend.
pub trait CompletionClient {
    /// Run the request and return the assistant's message content.
    fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

// ─────────────────────────────────────────────────────────────────────────────
// OpenAI-compatible wire format
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
}

#[derive(Debug, Deserialize)]
struct WireResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for any endpoint speaking the OpenAI chat-completions API.
pub struct OpenAiClient {
    http: Client,
    url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &AdvisorConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(NutriError::MissingApiKey)?
            .to_string();

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.completions_url(),
            api_key,
            model: config.model.clone(),
        })
    }

    fn wire_request<'a>(&'a self, request: &'a CompletionRequest) -> WireRequest<'a> {
        WireRequest {
            model: &self.model,
            messages: request
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request
                .json_mode
                .then_some(ResponseFormat { kind: "json_object" }),
        }
    }
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String> {
        debug!(
            model = %self.model,
            messages = request.messages.len(),
            json = request.json_mode,
            "Sending completion request"
        );

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&self.wire_request(request))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(%status, "Completion API returned an error");
            return Err(NutriError::Completion(format!(
                "{}: {}",
                status,
                truncate(&body, MAX_ERROR_BODY)
            )));
        }

        let parsed: WireResponse = response.json()?;
        extract_content(parsed)
    }
}

fn extract_content(response: WireResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| NutriError::Completion("empty response from model".to_string()))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatMessage;

    fn client() -> OpenAiClient {
        OpenAiClient::new(&AdvisorConfig {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_new_requires_key() {
        let result = OpenAiClient::new(&AdvisorConfig::default());
        assert!(matches!(result, Err(NutriError::MissingApiKey)));
    }

    #[test]
    fn test_wire_request_json_mode() {
        let client = client();
        let request = CompletionRequest::new(vec![
            ChatMessage::system("You are a nutritionist."),
            ChatMessage::user("Plan my week"),
        ])
        .json();

        let value = serde_json::to_value(client.wire_request(&request)).unwrap();
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "Plan my week");
        assert_eq!(value["response_format"]["type"], "json_object");
        assert!(value.get("max_tokens").is_none());
    }

    #[test]
    fn test_wire_request_plain_text() {
        let client = client();
        let request = CompletionRequest::new(vec![ChatMessage::user("hi")])
            .with_temperature(0.8)
            .with_max_tokens(500);

        let value = serde_json::to_value(client.wire_request(&request)).unwrap();
        assert_eq!(value["max_tokens"], 500);
        assert!(value.get("response_format").is_none());
    }

    #[test]
    fn test_extract_content() {
        let response: WireResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": "Hello"}}]}"#).unwrap();
        assert_eq!(extract_content(response).unwrap(), "Hello");

        let empty: WireResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            extract_content(empty),
            Err(NutriError::Completion(_))
        ));

        let null: WireResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(extract_content(null).is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }
}
