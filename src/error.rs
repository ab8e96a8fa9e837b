use thiserror::Error;

/// Failure taxonomy for the evaluation pipeline.
///
/// Low-level components return these; `EvaluationOrchestrator` is the single
/// boundary that converts them into a non-throwing `EvaluationResult`.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Empty or missing required argument (empty path, empty reference text).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Referenced audio file does not exist or cannot be read.
    #[error("audio file not found: {0}")]
    NotFound(String),

    /// Input violates a hard limit (file too large / too small, bad format).
    #[error("{0}")]
    ConstraintViolation(String),

    /// Network or API failure talking to a backend. The only retriable kind.
    #[error("backend transport error: {0}")]
    Transport(String),

    /// Backend returned output that violates its contract (unparsable or
    /// malformed structured data). Retrying a deterministic parse failure is
    /// pointless, so this is never retried.
    #[error("backend contract violation: {0}")]
    Contract(String),

    /// A required service could not be constructed (missing credentials,
    /// no audio device).
    #[error("service unavailable: {0}")]
    ResourceUnavailable(String),
}

impl EvalError {
    /// Whether the comparator's bounded retry loop may retry this failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, EvalError::Transport(_))
    }
}
