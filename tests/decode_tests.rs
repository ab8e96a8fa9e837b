// Unit tests for the comparison-response decode pipeline
//
// The three steps (fence stripping, JSON decode, field repair) are exercised
// in isolation: backend output is not contractually guaranteed, and the
// repair step must produce a complete in-range report from whatever arrives.

use speech_eval::compare::{decode_report, repair_report, strip_code_fences, ErrorAnalysis};
use speech_eval::EvalError;

#[test]
fn test_strip_json_code_fence() {
    let raw = "```json\n{\"accuracy_score\": 50}\n```";
    assert_eq!(strip_code_fences(raw), "{\"accuracy_score\": 50}");
}

#[test]
fn test_strip_bare_code_fence() {
    let raw = "```\n{\"a\": 1}\n```";
    assert_eq!(strip_code_fences(raw), "{\"a\": 1}");
}

#[test]
fn test_strip_is_noop_without_fences() {
    assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
    assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
}

#[test]
fn test_decode_rejects_malformed_payload() {
    let err = decode_report("not json at all").unwrap_err();
    assert!(matches!(err, EvalError::Contract(_)));
}

#[test]
fn test_decode_rejects_non_object_payload() {
    let err = decode_report("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, EvalError::Contract(_)));
}

#[test]
fn test_repair_backfills_missing_fields() {
    // Payload missing key_differences, suggestions, reasoning and
    // error_analysis: every field must come back with its default
    let value = decode_report(r#"{"accuracy_score": 70, "semantic_similarity": 75}"#).unwrap();
    let report = repair_report(value);

    assert_eq!(report.accuracy_score, 70.0);
    assert_eq!(report.semantic_similarity, 75.0);
    assert_eq!(report.key_differences, Vec::<String>::new());
    assert_eq!(report.suggestions, Vec::<String>::new());
    assert_eq!(report.reasoning, "");
    assert_eq!(report.error_analysis, ErrorAnalysis::default());
    assert!(report.success);
    assert!(report.error.is_none());
}

#[test]
fn test_repair_clamps_scores_into_range() {
    let value =
        decode_report(r#"{"accuracy_score": -10, "semantic_similarity": 150}"#).unwrap();
    let report = repair_report(value);

    assert_eq!(report.accuracy_score, 0.0);
    assert_eq!(report.semantic_similarity, 100.0);
}

#[test]
fn test_repair_coerces_string_scores() {
    let value =
        decode_report(r#"{"accuracy_score": "85", "semantic_similarity": "not a number"}"#)
            .unwrap();
    let report = repair_report(value);

    assert_eq!(report.accuracy_score, 85.0);
    assert_eq!(report.semantic_similarity, 0.0);
}

#[test]
fn test_repair_replaces_non_mapping_error_analysis() {
    let value = decode_report(
        r#"{"accuracy_score": 50, "error_analysis": "substitutions: lots"}"#,
    )
    .unwrap();
    let report = repair_report(value);

    assert_eq!(report.error_analysis, ErrorAnalysis::default());
}

#[test]
fn test_repair_keeps_well_formed_error_analysis() {
    let value = decode_report(
        r#"{
            "error_analysis": {
                "substitutions": 1,
                "deletions": 2,
                "insertions": 3,
                "total_errors": 6
            }
        }"#,
    )
    .unwrap();
    let report = repair_report(value);

    assert_eq!(
        report.error_analysis,
        ErrorAnalysis {
            substitutions: 1,
            deletions: 2,
            insertions: 3,
            total_errors: 6,
        }
    );
}

#[test]
fn test_repair_drops_non_string_list_entries() {
    let value = decode_report(r#"{"key_differences": ["one", 2, null, "three"]}"#).unwrap();
    let report = repair_report(value);

    assert_eq!(report.key_differences, vec!["one", "three"]);
}

#[test]
fn test_full_pipeline_on_fenced_payload() {
    let raw = "```json\n{\"summary\": \"ok\", \"accuracy_score\": 99.5}\n```";
    let report = repair_report(decode_report(strip_code_fences(raw)).unwrap());

    assert_eq!(report.summary, "ok");
    assert_eq!(report.accuracy_score, 99.5);
}
