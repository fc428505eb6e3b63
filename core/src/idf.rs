use crate::error::{QaError, Result};
use std::collections::{HashMap, HashSet};

/// Token -> `ln(D / df)` for one collection.
///
/// Only tokens that occur in at least one document of the collection have an
/// entry. Tables built over different collections are independent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdfTable {
    values: HashMap<String, f64>,
    num_docs: usize,
}

impl IdfTable {
    pub fn get(&self, token: &str) -> Option<f64> {
        self.values.get(token).copied()
    }

    /// IDF of `token`, or 0.0 when the collection never contains it.
    pub fn weight(&self, token: &str) -> f64 {
        self.get(token).unwrap_or(0.0)
    }

    pub fn contains(&self, token: &str) -> bool { self.values.contains_key(token) }

    pub fn len(&self) -> usize { self.values.len() }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    /// Number of documents the table was computed over.
    pub fn num_docs(&self) -> usize { self.num_docs }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(t, v)| (t.as_str(), *v))
    }
}

/// Compute the IDF of every token appearing in `documents`.
///
/// Document frequency counts presence, not occurrences. Documents with no
/// tokens still count toward the total.
pub fn compute_idf<K>(documents: &HashMap<K, Vec<String>>) -> Result<IdfTable> {
    if documents.is_empty() {
        return Err(QaError::EmptyCollection { what: "document collection" });
    }
    let num_docs = documents.len();

    let mut df: HashMap<&str, u32> = HashMap::new();
    for tokens in documents.values() {
        let seen_in_doc: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        for term in seen_in_doc {
            *df.entry(term).or_insert(0) += 1;
        }
    }

    let n = num_docs as f64;
    let values = df
        .into_iter()
        .map(|(term, df_t)| (term.to_string(), (n / df_t as f64).ln()))
        .collect();
    Ok(IdfTable { values, num_docs })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(entries: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(id, toks)| (id.to_string(), toks.iter().map(|t| t.to_string()).collect()))
            .collect()
    }

    #[test]
    fn idf_matches_log_ratio() {
        let d = docs(&[("a", &["cat", "cat", "dog"]), ("b", &["dog"]), ("c", &["bird"])]);
        let idf = compute_idf(&d).unwrap();
        assert_eq!(idf.num_docs(), 3);
        assert_eq!(idf.len(), 3);
        assert!((idf.get("cat").unwrap() - (3.0f64).ln()).abs() < 1e-12);
        assert!((idf.get("dog").unwrap() - (1.5f64).ln()).abs() < 1e-12);
    }

    #[test]
    fn term_in_every_document_is_zero_not_missing() {
        let d = docs(&[("a", &["cat"]), ("b", &["cat", "dog"])]);
        let idf = compute_idf(&d).unwrap();
        assert_eq!(idf.get("cat"), Some(0.0));
        assert!(idf.get("dog").unwrap() > 0.0);
    }

    #[test]
    fn values_are_non_negative_and_zero_only_when_universal() {
        let d = docs(&[
            ("a", &["x", "y", "z"]),
            ("b", &["x", "y"]),
            ("c", &["x"]),
            ("d", &[]),
        ]);
        let idf = compute_idf(&d).unwrap();
        for (term, value) in idf.iter() {
            assert!(value > 0.0, "{term} occurs in fewer than all documents");
        }
        let all = docs(&[("a", &["x"]), ("b", &["x", "y"])]);
        let idf = compute_idf(&all).unwrap();
        for (term, value) in idf.iter() {
            assert!(value >= 0.0);
            assert_eq!(value == 0.0, term == "x");
        }
    }

    #[test]
    fn absent_tokens_are_undefined() {
        let d = docs(&[("a", &["cat"])]);
        let idf = compute_idf(&d).unwrap();
        assert_eq!(idf.get("dog"), None);
        assert_eq!(idf.weight("dog"), 0.0);
    }

    #[test]
    fn empty_token_sequences_count_toward_total() {
        let d = docs(&[("a", &["cat"]), ("b", &[])]);
        let idf = compute_idf(&d).unwrap();
        assert!((idf.get("cat").unwrap() - (2.0f64).ln()).abs() < 1e-12);
    }

    #[test]
    fn scope_changes_values() {
        let wide = docs(&[("a", &["cat", "dog"]), ("b", &["dog"]), ("c", &["fish"]), ("d", &["owl"])]);
        let narrow = docs(&[("a", &["cat", "dog"]), ("b", &["dog"])]);
        let wide_idf = compute_idf(&wide).unwrap();
        let narrow_idf = compute_idf(&narrow).unwrap();
        assert_ne!(wide_idf.get("dog"), narrow_idf.get("dog"));
        assert_eq!(narrow_idf.get("dog"), Some(0.0));
    }

    #[test]
    fn empty_collection_is_an_error() {
        let d: HashMap<String, Vec<String>> = HashMap::new();
        assert!(matches!(compute_idf(&d), Err(QaError::EmptyCollection { .. })));
    }
}
