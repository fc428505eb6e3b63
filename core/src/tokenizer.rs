use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;
use std::collections::HashSet;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)[\p{L}\p{N}][\p{L}\p{N}_']*").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "d","did","didn't","do","does","doesn't","doing","don","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "just","let's","ll","m","me","more","most","mustn't","my","myself",
            "no","nor","not","now","o","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "re","s","same","she","she'd","she'll","she's","should","should've","shouldn't","so","some","such",
            "t","than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","ve","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","will","with","won't","would","wouldn't",
            "y","you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Force the shared regex, stopword set and stemmer to be built.
///
/// Safe to call any number of times; only the first call does work. Binaries
/// call it once at startup so the first query does not pay for it.
pub fn ensure_resources() {
    lazy_static::initialize(&RE);
    lazy_static::initialize(&STEMMER);
    lazy_static::initialize(&STOPWORDS);
}

/// Turns raw text into the normalized word tokens used for scoring.
pub trait Tokenizer: Send + Sync {
    /// Ordered tokens of `text`; duplicates are kept.
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// NFKC + lowercase + English stopword removal, with optional Snowball stemming.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishTokenizer {
    stem: bool,
}

impl EnglishTokenizer {
    pub fn new(stem: bool) -> Self { Self { stem } }

    pub fn stemming(&self) -> bool { self.stem }
}

impl Tokenizer for EnglishTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = text
            .nfkc()
            .map(|c| if c == '\u{2019}' { '\'' } else { c })
            .collect::<String>()
            .to_lowercase();
        let mut tokens = Vec::new();
        for mat in RE.find_iter(&normalized) {
            let raw = mat.as_str();
            if is_stopword(raw) { continue; }
            let word = raw.trim_end_matches('\'');
            let word = word.strip_suffix("'s").unwrap_or(word);
            if word.is_empty() || is_stopword(word) { continue; }
            if self.stem {
                tokens.push(STEMMER.stem(word).into_owned());
            } else {
                tokens.push(word.to_string());
            }
        }
        tokens
    }
}

/// Tokenize with the default (non-stemming) English tokenizer.
pub fn tokenize(text: &str) -> Vec<String> {
    EnglishTokenizer::default().tokenize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("The cat sat on the mat.");
        assert_eq!(t, vec!["cat", "sat", "mat"]);
    }

    #[test]
    fn stemming_is_opt_in() {
        let plain = EnglishTokenizer::new(false).tokenize("Running, runner's run!");
        assert!(plain.contains(&"running".to_string()));
        assert!(plain.contains(&"runner".to_string()));

        let stemmed = EnglishTokenizer::new(true).tokenize("Running, runner's run!");
        assert!(stemmed.iter().all(|w| w != "running"));
        assert!(stemmed.iter().any(|w| w == "run"));
    }

    #[test]
    fn contractions_and_possessives() {
        let t = tokenize("It’s the dog’s bone, don't touch the dogs' toys");
        assert_eq!(t, vec!["dog", "bone", "touch", "dogs", "toys"]);
    }

    #[test]
    fn keeps_numbers() {
        assert_eq!(tokenize("Founded in 1990!"), vec!["founded", "1990"]);
    }

    #[test]
    fn ensure_resources_is_idempotent() {
        ensure_resources();
        ensure_resources();
        assert_eq!(tokenize("Cats"), vec!["cats"]);
    }
}
