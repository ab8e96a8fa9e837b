use serde::Deserialize;
use tracing::{error, info};

use super::{SpeechToText, SttResponse};
use crate::config::SttConfig;
use crate::error::EvalError;

const TRANSCRIPTION_URL: &str = "https://api.openai.com/v1/audio/transcriptions";

/// OpenAI Whisper transcription backend.
pub struct OpenAiStt {
    http: reqwest::Client,
    api_key: String,
    config: SttConfig,
}

#[derive(Debug, Deserialize)]
struct TranscriptionBody {
    text: String,
}

impl OpenAiStt {
    pub fn new(api_key: &str, config: SttConfig) -> Result<Self, EvalError> {
        if api_key.is_empty() {
            return Err(EvalError::ResourceUnavailable(
                "OPENAI API key is not configured".to_string(),
            ));
        }

        info!("OpenAI STT backend ready (model: {})", config.model);

        Ok(Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            config,
        })
    }

    /// Map a backend-reported error body onto the failure taxonomy. Format
    /// and size complaints are the caller's problem, everything else is
    /// transport.
    fn map_api_error(status: reqwest::StatusCode, body: &str) -> EvalError {
        let lowered = body.to_lowercase();
        if lowered.contains("unrecognized file format") || lowered.contains("invalid file format")
        {
            return EvalError::ConstraintViolation(
                "unsupported or corrupt audio file format".to_string(),
            );
        }
        if status == reqwest::StatusCode::PAYLOAD_TOO_LARGE || lowered.contains("too large") {
            return EvalError::ConstraintViolation(
                "file exceeds the backend's 25MB limit".to_string(),
            );
        }
        EvalError::Transport(format!("stt backend returned {}: {}", status, body))
    }
}

#[async_trait::async_trait]
impl SpeechToText for OpenAiStt {
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<SttResponse, EvalError> {
        let file_part = reqwest::multipart::Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| EvalError::Transport(format!("failed to build upload: {}", e)))?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("model", self.config.model.clone())
            .text("response_format", self.config.response_format.clone())
            .text("temperature", self.config.temperature.to_string());

        if let Some(language) = self.config.language_hint() {
            form = form.text("language", language.to_string());
        }

        let response = self
            .http
            .post(TRANSCRIPTION_URL)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| EvalError::Transport(format!("stt request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| EvalError::Transport(format!("failed to read stt response: {}", e)))?;

        if !status.is_success() {
            error!("STT backend error ({}): {}", status, body);
            return Err(Self::map_api_error(status, &body));
        }

        let text = if self.config.response_format == "json" {
            let parsed: TranscriptionBody = serde_json::from_str(&body).map_err(|e| {
                EvalError::Contract(format!("stt backend returned malformed JSON: {}", e))
            })?;
            parsed.text
        } else {
            body
        };

        // The transcription endpoint does not expose a confidence value;
        // the client substitutes its fixed default.
        Ok(SttResponse {
            text,
            confidence: None,
        })
    }
}
