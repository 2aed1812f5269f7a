//! Interactive TV viewing log.
//!
//! Run with: cargo run
//!
//! Needs `OPENAI_API_KEY` and `TVDB_TOKEN`, either exported or in a `.env` file.
//! Set `RUST_LOG=debug` to see request and response bodies.

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use watchlog::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the prompt on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = WatchLogConfig::load().context("failed to load credentials")?;

    let sink = CsvSink::new(&config.log_file);
    sink.ensure_header()
        .with_context(|| format!("failed to set up watch log at {}", config.log_file.display()))?;

    let gateway = Arc::new(OpenAIGateway::with_config(config.openai.clone()));
    let resolver = ShowInfoResolver::with_config(config.tvdb.clone());
    let tools: Vec<Box<dyn LlmTool>> = vec![Box::new(ShowInfoTool::new(resolver))];

    let assistant = WatchLogAssistant::new(gateway, tools, sink)
        .with_models(config.model.clone(), config.follow_up_model.clone())
        .with_completion_config(config.completion.clone());
    let mut state = ConversationState::default();

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    assistant.run(&mut state, stdin.lock(), &mut stdout).await?;

    Ok(())
}
