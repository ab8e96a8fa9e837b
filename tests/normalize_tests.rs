// Unit tests for text normalization
//
// Both sides of a comparison pass through the same normalizer; these tests
// pin down each configurable sub-step and the idempotence guarantee.

use speech_eval::compare::TextNormalizer;
use speech_eval::config::EvaluationConfig;

fn normalizer(normalization: bool, punctuation_ignore: bool, case_sensitive: bool) -> TextNormalizer {
    TextNormalizer::new(&EvaluationConfig {
        text_normalization: normalization,
        punctuation_ignore,
        case_sensitive,
        min_similarity_threshold: 60.0,
        high_accuracy_threshold: 90.0,
    })
}

#[test]
fn test_collapses_whitespace_runs() {
    let n = normalizer(true, false, true);
    assert_eq!(n.normalize("hello   world\t\n again"), "hello world again");
}

#[test]
fn test_maps_full_width_punctuation_to_ascii() {
    let n = normalizer(true, false, true);
    assert_eq!(n.normalize("你好，世界。"), "你好,世界.");
    assert_eq!(n.normalize("「引用」『內文』？！"), "\"引用\"'內文'?!");
}

#[test]
fn test_strips_punctuation_when_ignored() {
    let n = normalizer(true, true, true);
    assert_eq!(n.normalize("hello, world! (yes)"), "hello world yes");
    // Full-width marks are first mapped to ASCII, then stripped
    assert_eq!(n.normalize("你好，世界。"), "你好世界");
}

#[test]
fn test_case_folds_by_default() {
    let n = normalizer(true, true, false);
    assert_eq!(n.normalize("Hello WORLD"), "hello world");
}

#[test]
fn test_case_preserved_when_sensitive() {
    let n = normalizer(true, true, true);
    assert_eq!(n.normalize("Hello WORLD"), "Hello WORLD");
}

#[test]
fn test_all_steps_disabled_only_trims() {
    let n = normalizer(false, false, true);
    assert_eq!(n.normalize("  Keep, This!  "), "Keep, This!");
}

#[test]
fn test_normalization_is_idempotent() {
    let n = normalizer(true, true, false);

    for input in [
        "Hello,   World! 「你好」",
        "already normalized text",
        "今天天氣真好",
        "",
    ] {
        let once = n.normalize(input);
        let twice = n.normalize(&once);
        assert_eq!(once, twice, "normalize must be idempotent for {:?}", input);
    }
}

#[test]
fn test_empty_and_whitespace_inputs() {
    let n = normalizer(true, true, false);
    assert_eq!(n.normalize(""), "");
    assert_eq!(n.normalize("   \t\n "), "");
}
