use anyhow::Result;
use clap::{Parser, ValueEnum};
use questions_core::tokenizer::ensure_resources;
use questions_core::{Corpus, RetrievalConfig, Retriever, FILE_MATCHES, SENTENCE_MATCHES};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "questions")]
#[command(about = "Answer questions from a directory of text files", long_about = None)]
pub struct Cli {
    /// Directory of plain-text documents
    pub corpus: PathBuf,
    /// Number of top-ranked files to pull sentences from
    #[arg(long, default_value_t = FILE_MATCHES)]
    pub files: usize,
    /// Number of sentences to print per query
    #[arg(long, default_value_t = SENTENCE_MATCHES)]
    pub sentences: usize,
    /// Stem words before matching
    #[arg(long, default_value_t = false)]
    pub stem: bool,
    /// Answer this query and exit instead of prompting
    #[arg(long)]
    pub query: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Matching sentences only
    Plain,
    /// Selected files and sentences with their scores
    Scores,
    /// One JSON object per query
    Json,
}

impl Cli {
    pub fn config(&self) -> RetrievalConfig {
        RetrievalConfig { file_matches: self.files, sentence_matches: self.sentences, stem: self.stem }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    ensure_resources();
    let corpus = Corpus::load(&cli.corpus)?;
    let retriever = Retriever::new(corpus, cli.config())?;
    tracing::info!(corpus = %cli.corpus.display(), config = ?retriever.config(), "ready for queries");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.query {
        Some(query) => answer_query(&retriever, query, cli.format, &mut out),
        None => prompt_loop(&retriever, io::stdin().lock(), &mut out, cli.format),
    }
}

/// Prompt for queries until `input` is exhausted.
pub fn prompt_loop<R: BufRead, W: Write>(retriever: &Retriever, mut input: R, out: &mut W, format: OutputFormat) -> Result<()> {
    loop {
        write!(out, "Query: ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        let query = line.trim();
        if query.is_empty() { continue; }
        answer_query(retriever, query, format, out)?;
    }
}

pub fn answer_query<W: Write>(retriever: &Retriever, query: &str, format: OutputFormat, out: &mut W) -> Result<()> {
    let answer = retriever.answer(query)?;
    match format {
        OutputFormat::Plain => {
            for sentence in answer.sentence_texts() {
                writeln!(out, "{sentence}")?;
            }
        }
        OutputFormat::Scores => {
            for file in &answer.files {
                writeln!(out, "file {} (tf-idf {:.4})", file.name, file.score)?;
            }
            for s in &answer.sentences {
                writeln!(out, "  [idf {:.4}, density {:.3}] {}", s.score, s.density, s.text)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &answer)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
