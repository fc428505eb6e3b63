use crate::tokenizer::Tokenizer;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// Splits one passage of text into sentences.
pub trait SentenceSplitter: Send + Sync {
    fn split<'a>(&self, passage: &'a str) -> Vec<&'a str>;
}

/// UAX#29 sentence boundaries, trimmed, with blank pieces dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentenceSplitter;

impl SentenceSplitter for UnicodeSentenceSplitter {
    fn split<'a>(&self, passage: &'a str) -> Vec<&'a str> {
        passage
            .unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Build the sentence collection for the given document texts.
///
/// Every line is a hard passage boundary. Sentences that tokenize to nothing
/// are dropped, and identical sentence text is kept once.
pub fn extract_sentences<'t, I>(texts: I, splitter: &dyn SentenceSplitter, tokenizer: &dyn Tokenizer) -> HashMap<String, Vec<String>>
where
    I: IntoIterator<Item = &'t str>,
{
    let mut sentences = HashMap::new();
    for text in texts {
        for passage in text.lines() {
            for sentence in splitter.split(passage) {
                let tokens = tokenizer.tokenize(sentence);
                if !tokens.is_empty() {
                    sentences.insert(sentence.to_string(), tokens);
                }
            }
        }
    }
    sentences
}
