//! Keyword extraction from raw resume and job description text
//!
//! Tokens are runs that start with an ASCII letter and continue with letters,
//! digits, `.`, `+`, `#` or `-`, at least three characters long and bounded by
//! word boundaries, so `Node.js` and `Scikit-learn` survive as single tokens.
//! Any other character splits.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

const KEYWORD_PATTERN: &str = r"\b[A-Za-z][A-Za-z0-9.+#-]{2,}\b";

/// Regex-backed keyword tokenizer. Holds no mutable state.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    pattern: Regex,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    pub fn new() -> Self {
        let pattern = Regex::new(KEYWORD_PATTERN).expect("Invalid keyword regex");
        Self { pattern }
    }

    /// Distinct keyword tokens as they appear in `text`, case preserved.
    pub fn extract(&self, text: &str) -> HashSet<String> {
        self.pattern
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Distinct keyword tokens, lower-cased.
    pub fn extract_normalized(&self, text: &str) -> HashSet<String> {
        self.pattern
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }
}

fn shared_extractor() -> &'static KeywordExtractor {
    static EXTRACTOR: OnceLock<KeywordExtractor> = OnceLock::new();
    EXTRACTOR.get_or_init(KeywordExtractor::new)
}

/// Extract keyword tokens with the process-wide extractor, case preserved.
pub fn extract_keywords(text: &str) -> HashSet<String> {
    shared_extractor().extract(text)
}

/// Lower-cased keyword set, the form the scorer compares on.
pub fn extract_normalized_keywords(text: &str) -> HashSet<String> {
    shared_extractor().extract_normalized(text)
}
