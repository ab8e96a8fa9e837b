use std::sync::Arc;
use tracing::{info, warn};

use super::decode::{decode_report, repair_report, strip_code_fences};
use super::normalize::TextNormalizer;
use super::prompt::build_comparison_prompt;
use super::{ComparisonReport, TextCompare};
use crate::error::EvalError;

/// Total attempts against the comparison backend, including the first.
const MAX_ATTEMPTS: u32 = 3;

/// Compares a transcript against a reference text via a generative backend:
/// normalize both sides, build the few-shot prompt, call the backend with
/// bounded retry, then decode and repair the response.
pub struct TextComparator {
    backend: Arc<dyn TextCompare>,
    normalizer: TextNormalizer,
}

impl TextComparator {
    pub fn new(backend: Arc<dyn TextCompare>, normalizer: TextNormalizer) -> Self {
        Self {
            backend,
            normalizer,
        }
    }

    pub async fn compare(
        &self,
        transcribed_text: &str,
        reference_text: &str,
    ) -> Result<ComparisonReport, EvalError> {
        if transcribed_text.trim().is_empty() {
            return Err(EvalError::InvalidInput(
                "transcribed text must not be empty".to_string(),
            ));
        }
        if reference_text.trim().is_empty() {
            return Err(EvalError::InvalidInput(
                "reference text must not be empty".to_string(),
            ));
        }

        let transcribed = self.normalizer.normalize(transcribed_text);
        let reference = self.normalizer.normalize(reference_text);

        let prompt = build_comparison_prompt(&reference, &transcribed);
        let raw = self.complete_with_retry(&prompt).await?;

        let payload = decode_report(strip_code_fences(&raw))?;
        let report = repair_report(payload);

        info!(
            "Comparison complete: accuracy {:.1}%, similarity {:.1}%",
            report.accuracy_score, report.semantic_similarity
        );

        Ok(report)
    }

    /// Bounded retry on transport failures only. A parse or contract failure
    /// is deterministic and surfaces immediately.
    async fn complete_with_retry(&self, prompt: &str) -> Result<String, EvalError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.backend.complete(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transport() && attempt < MAX_ATTEMPTS => {
                    warn!(
                        "Comparison backend call failed (attempt {}/{}): {}",
                        attempt, MAX_ATTEMPTS, e
                    );
                }
                Err(e) if e.is_transport() => {
                    return Err(EvalError::Transport(format!(
                        "comparison backend failed after {} attempts: {}",
                        MAX_ATTEMPTS, e
                    )));
                }
                Err(e) => return Err(e),
            }
        }
    }
}
