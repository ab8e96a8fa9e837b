use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use super::SpeechToText;
use crate::error::EvalError;

/// Whisper's hard upload limit.
const MAX_FILE_BYTES: u64 = 25 * 1024 * 1024;

/// Anything under 1KB has no usable audio content.
const MIN_FILE_BYTES: u64 = 1024;

/// Outcome of transcribing one audio file. Immutable once produced.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptionResult {
    pub file_path: String,
    pub file_name: String,
    pub transcript: Option<String>,
    pub confidence: f64,
    pub success: bool,
    pub error: Option<String>,
}

impl TranscriptionResult {
    pub fn succeeded(path: &Path, transcript: String, confidence: f64) -> Self {
        Self {
            file_path: path.display().to_string(),
            file_name: file_name_of(path),
            transcript: Some(transcript),
            confidence,
            success: true,
            error: None,
        }
    }

    pub fn failed(path: &Path, error: &EvalError) -> Self {
        Self {
            file_path: path.display().to_string(),
            file_name: file_name_of(path),
            transcript: None,
            confidence: 0.0,
            success: false,
            error: Some(error.to_string()),
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Validates an audio file against backend constraints and drives the
/// speech-to-text capability. Does not retry: STT failures for a given file
/// are not transient from this component's point of view.
pub struct TranscriptionClient {
    backend: Arc<dyn SpeechToText>,
}

impl TranscriptionClient {
    pub fn new(backend: Arc<dyn SpeechToText>) -> Self {
        Self { backend }
    }

    /// Transcribe an audio file, returning (text, confidence).
    ///
    /// Fails with distinct error kinds for an empty path, a missing file, a
    /// file outside the size limits, and a backend that recognized no speech.
    pub async fn transcribe(&self, path: &Path) -> Result<(String, f64), EvalError> {
        if path.as_os_str().is_empty() {
            return Err(EvalError::InvalidInput(
                "audio file path must not be empty".to_string(),
            ));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|_| EvalError::NotFound(path.display().to_string()))?;

        let file_size = metadata.len();
        if file_size > MAX_FILE_BYTES {
            return Err(EvalError::ConstraintViolation(format!(
                "file is {:.1}MB, exceeding the 25MB limit",
                file_size as f64 / 1024.0 / 1024.0
            )));
        }
        if file_size < MIN_FILE_BYTES {
            return Err(EvalError::ConstraintViolation(
                "file is under 1KB and likely contains no audio".to_string(),
            ));
        }

        info!(
            "Transcribing {} ({:.1} KB)",
            file_name_of(path),
            file_size as f64 / 1024.0
        );

        let audio = std::fs::read(path)
            .map_err(|e| EvalError::NotFound(format!("{}: {}", path.display(), e)))?;

        let response = self.backend.transcribe(audio, &file_name_of(path)).await?;

        let transcript = response.text.trim();
        if transcript.is_empty() {
            return Err(EvalError::Contract(
                "no speech recognized; the file may be corrupt or contain no speech".to_string(),
            ));
        }

        Ok((transcript.to_string(), response.confidence.unwrap_or(1.0)))
    }
}
