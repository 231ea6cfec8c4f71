//! OpenAI-compatible chat completion client
//!
//! One blocking POST to `{api_base}/chat/completions` per call:
//! - Bearer auth with the configured key
//! - No retries, no streaming
//! - No explicit timeout; a hung request hangs the command

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChatMessage, Generator};
use crate::config::GenerationConfig;
use crate::error::{ObsError, Result};

/// Request body for `/chat/completions`
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
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
    #[serde(default)]
    content: Option<String>,
}

/// Blocking client for an OpenAI-compatible completion endpoint
pub struct OpenAiClient {
    agent: ureq::Agent,
    api_key: String,
    settings: GenerationConfig,
    user_agent: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, settings: GenerationConfig) -> Self {
        // Non-2xx responses come back as normal responses so the error body
        // can be surfaced
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build();
        let agent = ureq::Agent::new_with_config(config);
        let user_agent = format!("obs/{} ({})", env!("CARGO_PKG_VERSION"), std::env::consts::OS);

        Self {
            agent,
            api_key: api_key.into(),
            settings,
            user_agent,
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.api_base.trim_end_matches('/')
        )
    }
}

impl Generator for OpenAiClient {
    #[tracing::instrument(skip(self, messages), fields(model = %self.settings.model, messages = messages.len()))]
    fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let body = CompletionRequest {
            model: &self.settings.model,
            messages,
            temperature: self.settings.temperature,
        };

        let mut response = self
            .agent
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("User-Agent", self.user_agent.as_str())
            .send_json(&body)
            .map_err(|e| ObsError::generation(format!("error calling completion API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.body_mut().read_to_string().unwrap_or_default();
            return Err(ObsError::generation(format!(
                "completion API returned {}: {}",
                status,
                error_text.trim()
            )));
        }

        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ObsError::generation(format!("error reading completion: {}", e)))?;
        let content = parse_completion(&text)?;

        debug!(chars = content.len(), "completion_received");
        Ok(content)
    }
}

/// Extract the first choice's message content from a response body
fn parse_completion(body: &str) -> Result<String> {
    let parsed: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| ObsError::generation(format!("invalid completion response: {}", e)))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ObsError::generation("completion response contained no content"))
}
