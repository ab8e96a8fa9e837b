use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::compare::ComparisonReport;
use crate::config::EvaluationThresholds;
use crate::stt::TranscriptionResult;

/// Coarse accuracy tier derived from the numeric score via ordered,
/// inclusive thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyLevel {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
    Failed,
}

impl AccuracyLevel {
    pub fn from_score(score: f64, thresholds: &EvaluationThresholds) -> Self {
        if score >= thresholds.excellent {
            AccuracyLevel::Excellent
        } else if score >= thresholds.good {
            AccuracyLevel::Good
        } else if score >= thresholds.fair {
            AccuracyLevel::Fair
        } else {
            AccuracyLevel::NeedsImprovement
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    Completed,
    Failed,
}

/// Derived metrics for one evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationMetrics {
    pub accuracy_score: f64,
    pub semantic_similarity: f64,
    pub accuracy_level: AccuracyLevel,
    pub confidence: f64,
    pub processing_status: ProcessingStatus,
}

impl EvaluationMetrics {
    pub fn completed(
        report: &ComparisonReport,
        confidence: f64,
        thresholds: &EvaluationThresholds,
    ) -> Self {
        Self {
            accuracy_score: report.accuracy_score,
            semantic_similarity: report.semantic_similarity,
            accuracy_level: AccuracyLevel::from_score(report.accuracy_score, thresholds),
            confidence,
            processing_status: ProcessingStatus::Completed,
        }
    }

    pub fn failed() -> Self {
        Self {
            accuracy_score: 0.0,
            semantic_similarity: 0.0,
            accuracy_level: AccuracyLevel::Failed,
            confidence: 0.0,
            processing_status: ProcessingStatus::Failed,
        }
    }
}

/// Complete record of one evaluation request. Immutable after construction
/// and owned solely by the caller; there is no shared evaluation store.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    pub evaluation_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub audio_file: String,
    pub reference_text: String,
    pub transcription: TranscriptionResult,
    pub comparison: ComparisonReport,
    pub evaluation_metrics: EvaluationMetrics,
    /// Wall-clock seconds from entry to exit, recorded on every path.
    pub processing_time_secs: f64,
    pub success: bool,
    pub error_message: Option<String>,
}
