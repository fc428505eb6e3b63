use anyhow::Result;
use axum::Router;
use clap::Parser;
use questions_core::tokenizer::ensure_resources;
use questions_core::{RetrievalConfig, FILE_MATCHES, SENTENCE_MATCHES};
use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};
use server::build_app;
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Corpus directory path
    #[arg(long, default_value = "./corpus")]
    corpus: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Default number of files to pull sentences from
    #[arg(long, default_value_t = FILE_MATCHES)]
    files: usize,
    /// Default number of sentences per answer
    #[arg(long, default_value_t = SENTENCE_MATCHES)]
    sentences: usize,
    /// Stem words before matching
    #[arg(long, default_value_t = false)]
    stem: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    ensure_resources();
    let config = RetrievalConfig { file_matches: args.files, sentence_matches: args.sentences, stem: args.stem };
    let app: Router = build_app(&args.corpus, config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, corpus = %args.corpus, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
