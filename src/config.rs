use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// OpenAI API credential, shared by the STT and comparison backends.
    pub api_key: String,
    pub http: HttpConfig,
    pub stt: SttConfig,
    pub llm: LlmConfig,
    pub evaluation: EvaluationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SttConfig {
    pub model: String,
    /// Language hint for the STT backend; "auto" means let it detect.
    pub language: String,
    pub response_format: String,
    pub temperature: f64,
}

impl SttConfig {
    pub fn language_hint(&self) -> Option<&str> {
        match self.language.as_str() {
            "" | "auto" => None,
            lang => Some(lang),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationConfig {
    /// Collapse whitespace and map full-width punctuation to ASCII.
    pub text_normalization: bool,
    /// Strip punctuation before comparison.
    pub punctuation_ignore: bool,
    /// Keep letter case when comparing (off by default).
    pub case_sensitive: bool,
    pub min_similarity_threshold: f64,
    pub high_accuracy_threshold: f64,
}

/// Ordered tier cutoffs derived from the configured thresholds.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationThresholds {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
}

impl Config {
    /// Load configuration from SPEECH_EVAL_* environment variables
    /// (double underscore separates nesting, e.g. SPEECH_EVAL_STT__MODEL).
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("api_key", "")?
            .set_default("http.bind", "127.0.0.1")?
            .set_default("http.port", 8080)?
            .set_default("stt.model", "whisper-1")?
            .set_default("stt.language", "auto")?
            .set_default("stt.response_format", "json")?
            .set_default("stt.temperature", 0.0)?
            .set_default("llm.model", "gpt-4o-mini")?
            .set_default("llm.temperature", 0.3)?
            .set_default("llm.max_tokens", 800)?
            .set_default("llm.top_p", 0.9)?
            .set_default("evaluation.text_normalization", true)?
            .set_default("evaluation.punctuation_ignore", true)?
            .set_default("evaluation.case_sensitive", false)?
            .set_default("evaluation.min_similarity_threshold", 60.0)?
            .set_default("evaluation.high_accuracy_threshold", 90.0)?
            .add_source(config::Environment::with_prefix("SPEECH_EVAL").separator("__"))
            .build()?;

        let cfg: Config = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations the pipeline cannot run with. Called at startup;
    /// a failure here aborts the process before any service is built.
    pub fn validate(&self) -> Result<()> {
        let eval = &self.evaluation;
        if !(0.0..=100.0).contains(&eval.min_similarity_threshold) {
            anyhow::bail!(
                "min_similarity_threshold must be within 0-100, got {}",
                eval.min_similarity_threshold
            );
        }
        if !(0.0..=100.0).contains(&eval.high_accuracy_threshold) {
            anyhow::bail!(
                "high_accuracy_threshold must be within 0-100, got {}",
                eval.high_accuracy_threshold
            );
        }
        Ok(())
    }

    /// Tier cutoffs: excellent is the high-accuracy threshold, good never
    /// drops below 75 even when the similarity floor does, fair is the floor.
    pub fn thresholds(&self) -> EvaluationThresholds {
        EvaluationThresholds {
            excellent: self.evaluation.high_accuracy_threshold,
            good: self.evaluation.min_similarity_threshold.max(75.0),
            fair: self.evaluation.min_similarity_threshold,
        }
    }
}
