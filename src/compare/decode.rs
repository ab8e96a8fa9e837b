use serde_json::Value;
use tracing::warn;

use super::{ComparisonReport, ErrorAnalysis};
use crate::error::EvalError;

/// Remove the Markdown code-fence wrapper some backends put around their
/// JSON output.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        text = stripped;
    } else if let Some(stripped) = text.strip_prefix("```") {
        text = stripped;
    }
    if let Some(stripped) = text.strip_suffix("```") {
        text = stripped;
    }
    text.trim()
}

/// Parse backend output into JSON. The payload must decode and must be an
/// object; anything else is a contract violation, not a transport failure,
/// and is never retried.
pub fn decode_report(raw: &str) -> Result<Value, EvalError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| {
        warn!("Comparison payload failed to parse: {}", e);
        EvalError::Contract(format!("unparsable comparison payload: {}", e))
    })?;

    if !value.is_object() {
        return Err(EvalError::Contract(
            "comparison payload is not a JSON object".to_string(),
        ));
    }

    Ok(value)
}

/// Repair a decoded payload into a complete report.
///
/// Missing fields are backfilled with defaults, a non-object error_analysis
/// is replaced wholesale, and both scores are clamped into [0, 100]. This
/// step is infallible: backend output is not contractually guaranteed and
/// must never crash the pipeline.
pub fn repair_report(value: Value) -> ComparisonReport {
    ComparisonReport {
        summary: string_field(&value, "summary", "analysis complete"),
        accuracy_score: score_field(&value, "accuracy_score"),
        semantic_similarity: score_field(&value, "semantic_similarity"),
        error_analysis: error_analysis_field(&value),
        key_differences: string_list_field(&value, "key_differences"),
        suggestions: string_list_field(&value, "suggestions"),
        reasoning: string_field(&value, "reasoning", ""),
        success: true,
        error: None,
    }
}

fn string_field(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

fn score_field(value: &Value, key: &str) -> f64 {
    let raw = value.get(key);
    raw.and_then(Value::as_f64)
        .or_else(|| {
            // Some backends emit scores as strings; coerce before clamping.
            raw.and_then(Value::as_str)
                .and_then(|s| s.trim().parse().ok())
        })
        .unwrap_or(0.0)
        .clamp(0.0, 100.0)
}

fn string_list_field(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn error_analysis_field(value: &Value) -> ErrorAnalysis {
    match value.get("error_analysis") {
        Some(Value::Object(counts)) => {
            let count = |key: &str| counts.get(key).and_then(Value::as_u64).unwrap_or(0);
            ErrorAnalysis {
                substitutions: count("substitutions"),
                deletions: count("deletions"),
                insertions: count("insertions"),
                total_errors: count("total_errors"),
            }
        }
        // Anything that is not a mapping is replaced wholesale.
        _ => ErrorAnalysis::default(),
    }
}
