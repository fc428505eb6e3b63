use crate::idf::IdfTable;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredFile {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSentence {
    pub text: String,
    pub score: f64,
    /// Fraction of the sentence's tokens that are query terms.
    pub density: f64,
}

/// Query terms in ascending order. Every score sums over this order so equal
/// inputs always produce bit-identical floats.
fn sorted_terms(query: &HashSet<String>) -> Vec<&str> {
    let mut terms: Vec<&str> = query.iter().map(String::as_str).collect();
    terms.sort_unstable();
    terms
}

fn file_score(terms: &[&str], tokens: &[String], idf: &IdfTable) -> f64 {
    terms
        .iter()
        .map(|term| {
            let count = tokens.iter().filter(|t| t == term).count();
            idf.weight(term) * count as f64
        })
        .sum()
}

/// Summed TF-IDF of the query terms in `tokens`.
pub fn tf_idf_score(query: &HashSet<String>, tokens: &[String], idf: &IdfTable) -> f64 {
    file_score(&sorted_terms(query), tokens, idf)
}

/// Score every file and return all of them, best first.
pub fn score_files(query: &HashSet<String>, files: &HashMap<String, Vec<String>>, idf: &IdfTable) -> Vec<ScoredFile> {
    let terms = sorted_terms(query);
    let mut scored: Vec<ScoredFile> = files
        .iter()
        .map(|(name, tokens)| ScoredFile { name: name.clone(), score: file_score(&terms, tokens, idf) })
        .collect();
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    scored
}

/// Names of the `n` files with the highest summed TF-IDF for `query`.
///
/// Equal scores are ordered by name, ascending.
pub fn top_files(query: &HashSet<String>, files: &HashMap<String, Vec<String>>, idf: &IdfTable, n: usize) -> Vec<String> {
    score_files(query, files, idf).into_iter().take(n).map(|f| f.name).collect()
}

/// Matched-term IDF sum and query density for one sentence.
fn sentence_score(terms: &[&str], tokens: &[String], idf: &IdfTable) -> (f64, f64) {
    let mut matched = 0usize;
    let mut score = 0.0;
    for term in terms {
        if tokens.iter().any(|t| t == term) {
            matched += 1;
            score += idf.weight(term);
        }
    }
    let density = if tokens.is_empty() { 0.0 } else { matched as f64 / tokens.len() as f64 };
    (score, density)
}

/// Score every sentence and return all of them, best first.
pub fn score_sentences(
    query: &HashSet<String>,
    sentences: &HashMap<String, Vec<String>>,
    idf: &IdfTable,
) -> Vec<ScoredSentence> {
    let terms = sorted_terms(query);
    let mut scored: Vec<ScoredSentence> = sentences
        .iter()
        .map(|(text, tokens)| {
            let (score, density) = sentence_score(&terms, tokens, idf);
            ScoredSentence { text: text.clone(), score, density }
        })
        .collect();
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.density.partial_cmp(&a.density).unwrap_or(Ordering::Equal))
            .then_with(|| a.text.cmp(&b.text))
    });
    scored
}

/// The `n` sentences with the highest matched IDF, denser sentences first on
/// ties and then by text, ascending.
pub fn top_sentences(
    query: &HashSet<String>,
    sentences: &HashMap<String, Vec<String>>,
    idf: &IdfTable,
    n: usize,
) -> Vec<String> {
    score_sentences(query, sentences, idf).into_iter().take(n).map(|s| s.text).collect()
}
