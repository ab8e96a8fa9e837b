pub mod comparator;
pub mod decode;
pub mod normalize;
pub mod openai;
pub mod prompt;

pub use comparator::TextComparator;
pub use decode::{decode_report, repair_report, strip_code_fences};
pub use normalize::TextNormalizer;
pub use openai::OpenAiChat;

use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// Text-comparison capability.
///
/// Given a prompt, return the backend's raw text output (expected to contain
/// embedded JSON) or fail. Backends are opaque and replaceable.
#[async_trait::async_trait]
pub trait TextCompare: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, EvalError>;
}

/// Edit-operation counts reported by the comparison backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorAnalysis {
    pub substitutions: u64,
    pub deletions: u64,
    pub insertions: u64,
    pub total_errors: u64,
}

/// Structured result of comparing a transcript against a reference text.
///
/// After `repair_report` every field is present and both scores lie in
/// [0, 100] regardless of what the backend produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub summary: String,
    pub accuracy_score: f64,
    pub semantic_similarity: f64,
    pub error_analysis: ErrorAnalysis,
    pub key_differences: Vec<String>,
    pub suggestions: Vec<String>,
    pub reasoning: String,
    pub success: bool,
    pub error: Option<String>,
}

impl ComparisonReport {
    /// Placeholder report for an evaluation that failed before or during
    /// comparison. Suggestions point at the usual operator checks.
    pub fn failed(error: &EvalError) -> Self {
        Self {
            summary: "evaluation failed".to_string(),
            accuracy_score: 0.0,
            semantic_similarity: 0.0,
            error_analysis: ErrorAnalysis::default(),
            key_differences: Vec::new(),
            suggestions: vec![
                "check the audio file".to_string(),
                "verify network connectivity".to_string(),
            ],
            reasoning: format!("evaluation aborted: {}", error),
            success: false,
            error: Some(error.to_string()),
        }
    }
}
