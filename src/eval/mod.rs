pub mod orchestrator;
pub mod result;

pub use orchestrator::EvaluationOrchestrator;
pub use result::{AccuracyLevel, EvaluationMetrics, EvaluationResult, ProcessingStatus};
