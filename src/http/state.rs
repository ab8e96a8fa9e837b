use crate::audio::AudioRecorder;
use crate::eval::EvaluationOrchestrator;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The process-wide recording session (at most one active at a time)
    pub recorder: Arc<Mutex<AudioRecorder>>,

    /// Evaluation pipeline with its backends injected at startup
    pub orchestrator: Arc<EvaluationOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: EvaluationOrchestrator) -> Self {
        Self {
            recorder: Arc::new(Mutex::new(AudioRecorder::new())),
            orchestrator: Arc::new(orchestrator),
        }
    }
}
