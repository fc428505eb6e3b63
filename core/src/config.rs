use serde::{Deserialize, Serialize};

/// Number of top files whose sentences are considered.
pub const FILE_MATCHES: usize = 1;
/// Number of sentences returned per query.
pub const SENTENCE_MATCHES: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub file_matches: usize,
    pub sentence_matches: usize,
    /// Apply Snowball English stemming to documents and queries.
    pub stem: bool,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { file_matches: FILE_MATCHES, sentence_matches: SENTENCE_MATCHES, stem: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: RetrievalConfig = serde_json::from_str(r#"{"sentence_matches": 3}"#).unwrap();
        assert_eq!(cfg, RetrievalConfig { sentence_matches: 3, ..RetrievalConfig::default() });
    }
}
