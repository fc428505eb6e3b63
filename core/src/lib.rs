//! Two-stage question answering over a directory of text files: TF-IDF file
//! ranking followed by IDF/density sentence ranking.

pub mod config;
pub mod corpus;
pub mod error;
pub mod idf;
pub mod pipeline;
pub mod rank;
pub mod sentences;
pub mod tokenizer;

pub use config::{RetrievalConfig, FILE_MATCHES, SENTENCE_MATCHES};
pub use corpus::Corpus;
pub use error::{QaError, Result};
pub use idf::{compute_idf, IdfTable};
pub use pipeline::{Answer, Retriever};
pub use rank::{score_files, score_sentences, top_files, top_sentences, ScoredFile, ScoredSentence};
pub use sentences::{extract_sentences, SentenceSplitter, UnicodeSentenceSplitter};
pub use tokenizer::{EnglishTokenizer, Tokenizer};
