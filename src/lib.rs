pub mod audio;
pub mod compare;
pub mod config;
pub mod error;
pub mod eval;
pub mod http;
pub mod stt;

pub use audio::AudioRecorder;
pub use compare::{
    ComparisonReport, ErrorAnalysis, OpenAiChat, TextComparator, TextCompare, TextNormalizer,
};
pub use config::Config;
pub use error::EvalError;
pub use eval::{AccuracyLevel, EvaluationOrchestrator, EvaluationResult};
pub use http::{create_router, AppState};
pub use stt::{OpenAiStt, SpeechToText, TranscriptionClient, TranscriptionResult};
