use anyhow::{Context, Result};
use speech_eval::compare::{OpenAiChat, TextComparator, TextNormalizer};
use speech_eval::eval::EvaluationOrchestrator;
use speech_eval::http::{create_router, AppState};
use speech_eval::stt::{OpenAiStt, TranscriptionClient};
use speech_eval::Config;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = Config::load().context("Failed to load configuration")?;

    info!("speech-eval v0.1.0");
    info!(
        "STT model: {}, comparison model: {}",
        cfg.stt.model, cfg.llm.model
    );

    // Service construction fails here, at startup, when credentials are
    // missing; there are no nullable globals to discover later.
    let stt = Arc::new(OpenAiStt::new(&cfg.api_key, cfg.stt.clone())?);
    let llm = Arc::new(OpenAiChat::new(&cfg.api_key, cfg.llm.clone())?);

    let orchestrator = EvaluationOrchestrator::new(
        TranscriptionClient::new(stt),
        TextComparator::new(llm, TextNormalizer::new(&cfg.evaluation)),
        cfg.thresholds(),
    );

    let state = AppState::new(orchestrator);
    let router = create_router(state);

    let addr = format!("{}:{}", cfg.http.bind, cfg.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);
    axum::serve(listener, router).await?;

    Ok(())
}
