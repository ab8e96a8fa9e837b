use crate::config::EvaluationConfig;

/// Full-width punctuation the STT backends emit for CJK input, mapped to the
/// ASCII equivalents the comparison prompt expects.
const FULL_WIDTH_MAP: [(char, char); 10] = [
    ('，', ','),
    ('。', '.'),
    ('？', '?'),
    ('！', '!'),
    ('：', ':'),
    ('；', ';'),
    ('「', '"'),
    ('」', '"'),
    ('『', '\''),
    ('』', '\''),
];

/// ASCII punctuation removed when punctuation is ignored.
const STRIP_SET: &str = ".,!?;:()\"'-";

/// Applies the configured normalization rules to both sides of a comparison.
/// Normalization is idempotent: a normalized string normalizes to itself.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    text_normalization: bool,
    punctuation_ignore: bool,
    case_sensitive: bool,
}

impl TextNormalizer {
    pub fn new(config: &EvaluationConfig) -> Self {
        Self {
            text_normalization: config.text_normalization,
            punctuation_ignore: config.punctuation_ignore,
            case_sensitive: config.case_sensitive,
        }
    }

    pub fn normalize(&self, text: &str) -> String {
        let mut text = text.trim().to_string();

        if self.text_normalization {
            text = text
                .chars()
                .map(|c| {
                    FULL_WIDTH_MAP
                        .iter()
                        .find(|(full, _)| *full == c)
                        .map(|(_, ascii)| *ascii)
                        .unwrap_or(c)
                })
                .collect();
        }

        if self.punctuation_ignore {
            text.retain(|c| !STRIP_SET.contains(c));
        }

        if self.text_normalization {
            // Collapse after stripping so removed punctuation cannot leave
            // double spaces behind.
            text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        }

        if !self.case_sensitive {
            text = text.to_lowercase();
        }

        text.trim().to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self {
            text_normalization: true,
            punctuation_ignore: true,
            case_sensitive: false,
        }
    }
}
