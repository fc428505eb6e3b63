use crate::config::RetrievalConfig;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::idf::{compute_idf, IdfTable};
use crate::rank::{score_files, score_sentences, ScoredFile, ScoredSentence};
use crate::sentences::{extract_sentences, SentenceSplitter, UnicodeSentenceSplitter};
use crate::tokenizer::{EnglishTokenizer, Tokenizer};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Result of one query, best matches first.
///
/// A query with no searchable terms (all stopwords or punctuation) gets an
/// empty answer: no files and no sentences, even though the corpus is not
/// empty. Otherwise `files` holds `min(n, corpus size)` entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Answer {
    /// Normalized query terms, sorted.
    pub query: Vec<String>,
    pub files: Vec<ScoredFile>,
    pub sentences: Vec<ScoredSentence>,
}

impl Answer {
    pub fn sentence_texts(&self) -> impl Iterator<Item = &str> {
        self.sentences.iter().map(|s| s.text.as_str())
    }

    pub fn is_empty(&self) -> bool { self.sentences.is_empty() }
}

/// File-level IDF is computed once here; sentence-level IDF is recomputed
/// from the candidate sentences on every query.
pub struct Retriever {
    corpus: Corpus,
    file_words: HashMap<String, Vec<String>>,
    file_idf: IdfTable,
    tokenizer: Box<dyn Tokenizer>,
    splitter: Box<dyn SentenceSplitter>,
    config: RetrievalConfig,
}

impl Retriever {
    /// Build with the English tokenizer and Unicode sentence splitter.
    pub fn new(corpus: Corpus, config: RetrievalConfig) -> Result<Self> {
        Self::with_components(
            corpus,
            config,
            Box::new(EnglishTokenizer::new(config.stem)),
            Box::new(UnicodeSentenceSplitter),
        )
    }

    pub fn with_components(
        corpus: Corpus,
        config: RetrievalConfig,
        tokenizer: Box<dyn Tokenizer>,
        splitter: Box<dyn SentenceSplitter>,
    ) -> Result<Self> {
        let file_words: HashMap<String, Vec<String>> = corpus
            .iter()
            .map(|(name, text)| (name.to_string(), tokenizer.tokenize(text)))
            .collect();
        let file_idf = compute_idf(&file_words)?;
        tracing::info!(num_docs = file_words.len(), num_terms = file_idf.len(), "computed file idf");
        Ok(Self { corpus, file_words, file_idf, tokenizer, splitter, config })
    }

    pub fn config(&self) -> &RetrievalConfig { &self.config }

    pub fn corpus(&self) -> &Corpus { &self.corpus }

    pub fn file_idf(&self) -> &IdfTable { &self.file_idf }

    /// Tokens of `document`, if it is in the corpus.
    pub fn file_tokens(&self, document: &str) -> Option<&[String]> {
        self.file_words.get(document).map(Vec::as_slice)
    }

    pub fn tokenizer(&self) -> &dyn Tokenizer { self.tokenizer.as_ref() }

    pub fn query_terms(&self, text: &str) -> HashSet<String> {
        self.tokenizer.tokenize(text).into_iter().collect()
    }

    /// Answer `text` with the configured number of files and sentences.
    pub fn answer(&self, text: &str) -> Result<Answer> {
        self.answer_with(text, self.config.file_matches, self.config.sentence_matches)
    }

    pub fn answer_with(&self, text: &str, file_matches: usize, sentence_matches: usize) -> Result<Answer> {
        let query = self.query_terms(text);
        let mut sorted_query: Vec<String> = query.iter().cloned().collect();
        sorted_query.sort();

        if query.is_empty() {
            tracing::warn!(query = text, "query has no searchable terms");
            return Ok(Answer { query: sorted_query, ..Answer::default() });
        }

        let mut files = score_files(&query, &self.file_words, &self.file_idf);
        files.truncate(file_matches);
        tracing::debug!(terms = ?sorted_query, files = ?files.iter().map(|f| &f.name).collect::<Vec<_>>(), "selected files");

        let texts = files.iter().filter_map(|f| self.corpus.get(&f.name));
        let candidates = extract_sentences(texts, self.splitter.as_ref(), self.tokenizer.as_ref());
        tracing::debug!(num_sentences = candidates.len(), "extracted candidate sentences");
        if candidates.is_empty() {
            return Ok(Answer { query: sorted_query, files, sentences: Vec::new() });
        }

        let sentence_idf = compute_idf(&candidates)?;
        let mut sentences = score_sentences(&query, &candidates, &sentence_idf);
        sentences.truncate(sentence_matches);

        Ok(Answer { query: sorted_query, files, sentences })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QaError;

    fn animals() -> Corpus {
        Corpus::from_documents([
            ("doc1.txt", "The cat sat on the mat."),
            ("doc2.txt", "Dogs bark loudly at night."),
        ])
    }

    #[test]
    fn answers_with_the_matching_sentence() {
        let r = Retriever::new(animals(), RetrievalConfig::default()).unwrap();
        let answer = r.answer("cat").unwrap();
        assert_eq!(answer.query, vec!["cat"]);
        assert_eq!(answer.files.len(), 1);
        assert_eq!(answer.files[0].name, "doc1.txt");
        assert_eq!(answer.sentence_texts().collect::<Vec<_>>(), vec!["The cat sat on the mat."]);
        assert_eq!(r.file_tokens("doc1.txt").unwrap(), ["cat", "sat", "mat"]);
    }

    #[test]
    fn stopword_only_query_yields_nothing() {
        let r = Retriever::new(animals(), RetrievalConfig::default()).unwrap();
        let answer = r.answer("what is the").unwrap();
        assert!(answer.is_empty());
        assert!(answer.files.is_empty());
    }

    #[test]
    fn empty_corpus_is_rejected() {
        let err = Retriever::new(Corpus::default(), RetrievalConfig::default()).err();
        assert!(matches!(err, Some(QaError::EmptyCollection { .. })));
    }

    #[test]
    fn selected_file_without_sentences() {
        let corpus = Corpus::from_documents([("a.txt", "cat cat cat"), ("b.txt", "")]);
        let r = Retriever::new(corpus, RetrievalConfig::default()).unwrap();
        let answer = r.answer("dog").unwrap();
        // every file scores zero, the name tiebreak picks a.txt
        assert_eq!(answer.files[0].name, "a.txt");
        assert_eq!(answer.sentences.len(), 1);
        assert_eq!(answer.sentences[0].score, 0.0);

        let r = Retriever::new(Corpus::from_documents([("b.txt", "...")]), RetrievalConfig::default()).unwrap();
        let answer = r.answer("dog").unwrap();
        assert_eq!(answer.files.len(), 1);
        assert!(answer.sentences.is_empty());
    }

    #[test]
    fn sentence_idf_is_scoped_to_candidates() {
        // "cat" is in both files, so it is worth nothing at file level, but
        // only one candidate sentence has it.
        let corpus = Corpus::from_documents([
            ("a.txt", "A cat naps. Birds sing. Owls hoot at the owl tree."),
            ("b.txt", "A cat hunts."),
        ]);
        let config = RetrievalConfig { file_matches: 1, sentence_matches: 3, stem: false };
        let r = Retriever::new(corpus, config).unwrap();
        assert_eq!(r.file_idf().get("cat"), Some(0.0));

        let answer = r.answer("cat owl").unwrap();
        assert_eq!(answer.files[0].name, "a.txt");
        assert!(answer.sentences[0].score > 0.0);
        let cat = answer.sentences.iter().find(|s| s.text == "A cat naps.").unwrap();
        assert!((cat.score - (3.0f64).ln()).abs() < 1e-12);
    }

    #[test]
    fn repeated_queries_are_identical() {
        let r = Retriever::new(animals(), RetrievalConfig { file_matches: 2, sentence_matches: 2, stem: false }).unwrap();
        assert_eq!(r.answer("cat dogs night").unwrap(), r.answer("cat dogs night").unwrap());
    }
}
