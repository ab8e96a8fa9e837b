use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::prompt::SYSTEM_PROMPT;
use super::TextCompare;
use crate::config::LlmConfig;
use crate::error::EvalError;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI chat-completions backend for text comparison.
pub struct OpenAiChat {
    http: reqwest::Client,
    api_key: String,
    config: LlmConfig,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
    top_p: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl OpenAiChat {
    pub fn new(api_key: &str, config: LlmConfig) -> Result<Self, EvalError> {
        if api_key.is_empty() {
            return Err(EvalError::ResourceUnavailable(
                "OPENAI API key is not configured".to_string(),
            ));
        }

        info!("OpenAI comparison backend ready (model: {})", config.model);

        Ok(Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            config,
        })
    }
}

#[async_trait::async_trait]
impl TextCompare for OpenAiChat {
    async fn complete(&self, prompt: &str) -> Result<String, EvalError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: self.config.top_p,
        };

        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| EvalError::Transport(format!("comparison request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Comparison backend error ({}): {}", status, body);
            return Err(EvalError::Transport(format!(
                "comparison backend returned {}: {}",
                status, body
            )));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            EvalError::Contract(format!("comparison backend returned malformed JSON: {}", e))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| {
                EvalError::Contract("comparison backend returned no content".to_string())
            })
    }
}
