//! Offline retrieval-index builder
//!
//! Reads a document corpus, embeds every passage, and writes the JSON
//! artifact the API server loads at startup.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ripplecast_providers::HttpEmbedder;
use ripplecast_retrieval::build_index;

#[derive(Debug, Parser)]
#[command(name = "ripplecast-index", about = "Build the Ripplecast retrieval index")]
struct Args {
    /// Corpus: a directory of text files (one passage per file) or a single
    /// file (one passage per non-empty line)
    docs: PathBuf,

    /// Where to write the index artifact
    #[arg(short, long, default_value = "ripplecast_index.json")]
    output: PathBuf,

    /// OpenAI-compatible API base URL
    #[arg(long, default_value = "https://api.openai.com/v1")]
    base_url: String,

    /// Embedding model
    #[arg(long, default_value = "text-embedding-3-small")]
    model: String,

    /// Embedding dimension
    #[arg(long, default_value_t = 1536)]
    dimension: usize,

    /// Environment variable holding the API key
    #[arg(long, default_value = "RIPPLECAST_API_KEY")]
    api_key_env: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let api_key = std::env::var(&args.api_key_env)
        .with_context(|| format!("{} is not set", args.api_key_env))?;

    let passages = read_corpus(&args.docs)?;
    if passages.is_empty() {
        bail!("no passages found under {}", args.docs.display());
    }
    info!(passages = passages.len(), "embedding corpus");

    let embedder = HttpEmbedder::new(args.base_url, api_key, args.model, args.dimension);
    let index = build_index(&embedder, &passages).await?;

    index
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(output = %args.output.display(), "index written");

    Ok(())
}

fn read_corpus(path: &PathBuf) -> anyhow::Result<Vec<String>> {
    let mut passages = Vec::new();

    if path.is_dir() {
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                let content = std::fs::read_to_string(entry.path())?;
                let trimmed = content.trim();
                if !trimmed.is_empty() {
                    passages.push(trimmed.to_string());
                }
            }
        }
        // Directory iteration order is platform-dependent.
        passages.sort();
    } else {
        let content = std::fs::read_to_string(path)?;
        passages.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        );
    }

    Ok(passages)
}
