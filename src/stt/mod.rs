pub mod client;
pub mod openai;

pub use client::{TranscriptionClient, TranscriptionResult};
pub use openai::OpenAiStt;

use crate::error::EvalError;

/// Raw output of a speech-to-text backend.
#[derive(Debug, Clone)]
pub struct SttResponse {
    /// Transcribed text, untrimmed.
    pub text: String,
    /// Confidence in [0, 1] if the backend exposes one.
    pub confidence: Option<f64>,
}

/// Speech-to-text capability.
///
/// Given the raw bytes of an audio file, return transcribed text or fail.
/// Backends are opaque and replaceable; tests stub this trait directly.
#[async_trait::async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<SttResponse, EvalError>;
}
