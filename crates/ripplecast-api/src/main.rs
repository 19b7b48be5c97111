//! Ripplecast API server

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ripplecast_api::{app, ApiConfig, AppState};
use ripplecast_domain::DomainGraph;
use ripplecast_engine::{ImpactOrchestrator, OrchestratorConfig};
use ripplecast_providers::{GeneratorConfig, HttpEmbedder, OpenAiCompatGenerator};
use ripplecast_retrieval::{ContextRetriever, VectorIndex};

#[derive(Debug, Parser)]
#[command(name = "ripplecast-api", about = "Change-impact analysis service")]
struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = ApiConfig::load(args.config.as_deref()).context("loading config")?;

    let graph = Arc::new(DomainGraph::builtin().context("loading domain catalogue")?);

    // Index problems are fatal here, not masked per request.
    let index = VectorIndex::load(&config.index_path).context("loading retrieval index")?;

    let orchestrator = match config.api_key() {
        Some(api_key) => {
            let embedder = Arc::new(HttpEmbedder::new(
                config.provider.base_url.clone(),
                api_key.clone(),
                config.provider.embedding_model.clone(),
                config.provider.embedding_dimension,
            ));
            let retriever =
                Arc::new(ContextRetriever::new(index, embedder).with_k(config.retrieval_k));

            let generator = Arc::new(OpenAiCompatGenerator::new(GeneratorConfig::new(
                config.provider.base_url.clone(),
                api_key,
                config.provider.chat_model.clone(),
            ))?);

            let orchestrator_config = OrchestratorConfig {
                task_timeout: config.task_timeout_secs.map(Duration::from_secs),
            };

            Some(Arc::new(ImpactOrchestrator::new(
                graph,
                retriever,
                generator,
                orchestrator_config,
            )))
        }
        None => {
            warn!("starting without a generation capability; /analyze will return errors");
            None
        }
    };

    let router = app(AppState::new(orchestrator));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "ripplecast listening");

    axum::serve(listener, router).await.context("serving")?;
    Ok(())
}
