// Tests for TranscriptionClient's input validation and result normalization,
// with the speech-to-text backend stubbed out.

use speech_eval::audio::write_wav;
use speech_eval::stt::{SpeechToText, SttResponse, TranscriptionClient};
use speech_eval::EvalError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

struct StubStt {
    response: Result<SttResponse, &'static str>,
}

impl StubStt {
    fn returning(text: &str, confidence: Option<f64>) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(SttResponse {
                text: text.to_string(),
                confidence,
            }),
        })
    }

    fn failing(message: &'static str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message),
        })
    }
}

#[async_trait::async_trait]
impl SpeechToText for StubStt {
    async fn transcribe(&self, _audio: Vec<u8>, _file_name: &str) -> Result<SttResponse, EvalError> {
        match &self.response {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(EvalError::Transport(message.to_string())),
        }
    }
}

/// Write a valid WAV file comfortably over the 1KB floor.
fn fixture_wav(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("sample.wav");
    let samples = vec![0i16; 16_000]; // one second of silence
    write_wav(&path, &samples, 16_000, 1).expect("fixture WAV");
    path
}

#[tokio::test]
async fn test_empty_path_is_invalid_input() {
    let client = TranscriptionClient::new(StubStt::returning("hi", None));
    let err = client.transcribe(Path::new("")).await.unwrap_err();
    assert!(matches!(err, EvalError::InvalidInput(_)));
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let client = TranscriptionClient::new(StubStt::returning("hi", None));
    let err = client
        .transcribe(Path::new("/nonexistent/audio.wav"))
        .await
        .unwrap_err();
    assert!(matches!(err, EvalError::NotFound(_)));
}

#[tokio::test]
async fn test_tiny_file_violates_size_floor() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tiny.wav");
    std::fs::write(&path, b"RIFF").unwrap();

    let client = TranscriptionClient::new(StubStt::returning("hi", None));
    let err = client.transcribe(&path).await.unwrap_err();
    assert!(matches!(err, EvalError::ConstraintViolation(_)));
}

#[tokio::test]
async fn test_successful_transcription_trims_text() {
    let dir = TempDir::new().unwrap();
    let path = fixture_wav(&dir);

    let client = TranscriptionClient::new(StubStt::returning("  hello world \n", None));
    let (text, confidence) = client.transcribe(&path).await.unwrap();

    assert_eq!(text, "hello world");
    // Backend exposed no confidence, so the fixed default applies
    assert_eq!(confidence, 1.0);
}

#[tokio::test]
async fn test_backend_confidence_passes_through() {
    let dir = TempDir::new().unwrap();
    let path = fixture_wav(&dir);

    let client = TranscriptionClient::new(StubStt::returning("hello", Some(0.85)));
    let (_, confidence) = client.transcribe(&path).await.unwrap();

    assert_eq!(confidence, 0.85);
}

#[tokio::test]
async fn test_blank_transcript_is_contract_failure() {
    let dir = TempDir::new().unwrap();
    let path = fixture_wav(&dir);

    let client = TranscriptionClient::new(StubStt::returning("   \n ", None));
    let err = client.transcribe(&path).await.unwrap_err();
    assert!(matches!(err, EvalError::Contract(_)));
}

#[tokio::test]
async fn test_backend_transport_error_propagates() {
    let dir = TempDir::new().unwrap();
    let path = fixture_wav(&dir);

    let client = TranscriptionClient::new(StubStt::failing("connection reset"));
    let err = client.transcribe(&path).await.unwrap_err();
    assert!(matches!(err, EvalError::Transport(_)));
}
