use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use lazy_static::lazy_static;
use questions_core::{Corpus, RetrievalConfig, Retriever, ScoredFile, ScoredSentence, Tokenizer};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

const MAX_MATCHES: usize = 100;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"(?u)[\p{L}\p{N}][\p{L}\p{N}_'\x{2019}]*").expect("valid regex");
}

#[derive(Deserialize)]
pub struct QueryParams {
    pub q: String,
    pub files: Option<usize>,
    pub sentences: Option<usize>,
    #[serde(default)]
    pub highlight: bool,
}

#[derive(Serialize)]
pub struct QueryResponse {
    pub query: String,
    pub tokens: Vec<String>,
    pub took_s: f64,
    pub files: Vec<ScoredFile>,
    pub sentences: Vec<ScoredSentence>,
}

#[derive(Clone)]
pub struct AppState {
    pub retriever: Arc<Retriever>,
}

/// Load the corpus under `corpus_dir` and build the router around it.
pub fn build_app<P: AsRef<std::path::Path>>(corpus_dir: P, config: RetrievalConfig) -> Result<Router> {
    let corpus = Corpus::load(corpus_dir)?;
    let retriever = Retriever::new(corpus, config)?;
    Ok(router(Arc::new(retriever)))
}

pub fn router(retriever: Arc<Retriever>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/query", get(query_handler))
        .route("/doc/:name", get(doc_handler))
        .with_state(AppState { retriever })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn query_handler(State(state): State<AppState>, Query(params): Query<QueryParams>) -> Result<Json<QueryResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let config = state.retriever.config();
    let files = params.files.unwrap_or(config.file_matches).clamp(1, MAX_MATCHES);
    let sentences = params.sentences.unwrap_or(config.sentence_matches).clamp(1, MAX_MATCHES);

    let answer = state
        .retriever
        .answer_with(&params.q, files, sentences)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let mut sentences = answer.sentences;
    if params.highlight {
        let terms: HashSet<String> = answer.query.iter().cloned().collect();
        for s in sentences.iter_mut() {
            s.text = highlight_terms(&s.text, &terms, state.retriever.tokenizer());
        }
    }

    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, took_s = elapsed.as_secs_f64(), "answered query");
    Ok(Json(QueryResponse { query: params.q, tokens: answer.query, took_s: elapsed.as_secs_f64(), files: answer.files, sentences }))
}

pub async fn doc_handler(State(state): State<AppState>, Path(name): Path<String>) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    match state.retriever.corpus().get(&name) {
        Some(text) => Ok(Json(serde_json::json!({ "name": name, "text": text }))),
        None => Err((StatusCode::NOT_FOUND, format!("no document named {name}"))),
    }
}

/// Wrap every word of `text` whose tokens include a query term in `<em>`.
///
/// Words go through the same tokenizer as the query, so stemmed terms still
/// match their surface forms. The text is scanned once, so inserted markup is
/// never matched again.
fn highlight_terms(text: &str, terms: &HashSet<String>, tokenizer: &dyn Tokenizer) -> String {
    if terms.is_empty() { return text.to_string(); }
    WORD.replace_all(text, |caps: &regex::Captures| {
        let word = &caps[0];
        if tokenizer.tokenize(word).iter().any(|t| terms.contains(t)) {
            format!("<em>{word}</em>")
        } else {
            word.to_string()
        }
    })
    .into_owned()
}
