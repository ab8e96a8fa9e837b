use super::state::AppState;
use crate::eval::EvaluationResult;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RecordingResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StopRecordingResponse {
    pub status: String,
    /// Path of the encoded WAV file, present when audio was captured
    pub audio_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordingStatusResponse {
    pub is_recording: bool,
    pub duration_secs: f64,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    /// Path to an uploaded or recorded audio file
    pub audio_path: String,
    pub reference_text: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /record/start
/// Start the process-wide recording session
pub async fn start_recording(State(state): State<AppState>) -> impl IntoResponse {
    // Opening the device blocks, so run it off the async workers
    let recorder = Arc::clone(&state.recorder);
    let started = tokio::task::spawn_blocking(move || {
        let mut recorder = recorder.blocking_lock();
        recorder.start_recording()
    })
    .await;

    match started {
        Ok(true) => {
            info!("Recording session started");
            (
                StatusCode::OK,
                Json(RecordingResponse {
                    status: "recording".to_string(),
                    message: "Recording started".to_string(),
                }),
            )
                .into_response()
        }
        Ok(false) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "Could not start recording: already recording or no input device"
                    .to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Recording task panicked: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Recording task failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// POST /record/stop
/// Stop the recording session and return the encoded WAV path
pub async fn stop_recording(State(state): State<AppState>) -> impl IntoResponse {
    // Stop waits up to the bounded join timeout, so run it off the async
    // workers as well
    let recorder = Arc::clone(&state.recorder);
    let stopped: Result<Option<PathBuf>, _> = tokio::task::spawn_blocking(move || {
        let mut recorder = recorder.blocking_lock();
        recorder.stop_recording()
    })
    .await;

    match stopped {
        Ok(Some(path)) => (
            StatusCode::OK,
            Json(StopRecordingResponse {
                status: "stopped".to_string(),
                audio_path: Some(path.display().to_string()),
            }),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "No active recording or no audio captured".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Recording task panicked: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Recording task failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /record/status
pub async fn recording_status(State(state): State<AppState>) -> impl IntoResponse {
    let recorder = state.recorder.lock().await;

    (
        StatusCode::OK,
        Json(RecordingStatusResponse {
            is_recording: recorder.is_recording(),
            duration_secs: recorder.recording_duration_secs(),
        }),
    )
}

/// POST /evaluate
/// Run the full evaluation pipeline. Always returns a well-formed result;
/// failures are carried inside it rather than as an HTTP error.
pub async fn evaluate(
    State(state): State<AppState>,
    Json(req): Json<EvaluateRequest>,
) -> Json<EvaluationResult> {
    let path = PathBuf::from(req.audio_path);
    let result = state.orchestrator.evaluate(&path, &req.reference_text).await;
    Json(result)
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
