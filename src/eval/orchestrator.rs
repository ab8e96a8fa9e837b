use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

use super::result::{EvaluationMetrics, EvaluationResult};
use crate::compare::{ComparisonReport, TextComparator};
use crate::config::EvaluationThresholds;
use crate::stt::{TranscriptionClient, TranscriptionResult};

/// Drives one evaluation end to end: transcription, comparison, derived
/// metrics, aggregation. Stateless per call; services are injected once at
/// construction.
pub struct EvaluationOrchestrator {
    transcriber: TranscriptionClient,
    comparator: TextComparator,
    thresholds: EvaluationThresholds,
}

impl EvaluationOrchestrator {
    pub fn new(
        transcriber: TranscriptionClient,
        comparator: TextComparator,
        thresholds: EvaluationThresholds,
    ) -> Self {
        Self {
            transcriber,
            comparator,
            thresholds,
        }
    }

    /// Evaluate one audio file against a reference text.
    ///
    /// Never fails: every failure mode is captured into the returned record's
    /// `success` and `error_message` fields, so callers need no error
    /// handling of their own.
    pub async fn evaluate(&self, audio_path: &Path, reference_text: &str) -> EvaluationResult {
        let started = Instant::now();
        let evaluation_id = Uuid::new_v4();

        info!(
            "Starting evaluation {} for {}",
            evaluation_id,
            audio_path.display()
        );

        let (transcription, comparison, metrics, error_message) =
            match self.transcriber.transcribe(audio_path).await {
                Ok((transcript, confidence)) => {
                    info!(
                        "Transcription complete: {}",
                        truncate_for_log(&transcript, 30)
                    );

                    let transcription =
                        TranscriptionResult::succeeded(audio_path, transcript.clone(), confidence);

                    match self.comparator.compare(&transcript, reference_text).await {
                        Ok(report) => {
                            let metrics = EvaluationMetrics::completed(
                                &report,
                                confidence,
                                &self.thresholds,
                            );
                            (transcription, report, metrics, None)
                        }
                        Err(e) => {
                            error!("Comparison failed: {}", e);
                            (
                                transcription,
                                ComparisonReport::failed(&e),
                                EvaluationMetrics::failed(),
                                Some(e.to_string()),
                            )
                        }
                    }
                }
                Err(e) => {
                    error!("Transcription failed: {}", e);
                    (
                        TranscriptionResult::failed(audio_path, &e),
                        ComparisonReport::failed(&e),
                        EvaluationMetrics::failed(),
                        Some(e.to_string()),
                    )
                }
            };

        let processing_time_secs = round_2(started.elapsed().as_secs_f64());
        let success = error_message.is_none();

        info!(
            "Evaluation {} finished in {:.2}s (success: {})",
            evaluation_id, processing_time_secs, success
        );

        EvaluationResult {
            evaluation_id,
            timestamp: Utc::now(),
            audio_file: audio_path.display().to_string(),
            reference_text: reference_text.to_string(),
            transcription,
            comparison,
            evaluation_metrics: metrics,
            processing_time_secs,
            success,
            error_message,
        }
    }
}

fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn truncate_for_log(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(max_chars).collect();
        format!("{}...", prefix)
    }
}
