// ============================================================
// Layer 4 — Word Tokenizer
// ============================================================
// Splits raw comment text into word tokens before the
// vocabulary step. Punctuation glued to a word ("idiot!!!")
// would otherwise become a distinct vocabulary entry, so each
// run of alphanumeric characters becomes one token and each
// remaining non-whitespace character becomes a token of its
// own. The tokens are rejoined with single spaces, which
// normalises spacing for everything downstream.

/// Splits text into word and punctuation tokens.
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Tokenize text into alphanumeric word runs and standalone
    /// punctuation characters. Whitespace only separates tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut word = String::new();

        for c in text.chars() {
            if c.is_alphanumeric() {
                word.push(c);
            } else {
                if !word.is_empty() {
                    tokens.push(std::mem::take(&mut word));
                }
                if !c.is_whitespace() {
                    tokens.push(c.to_string());
                }
            }
        }
        if !word.is_empty() {
            tokens.push(word);
        }

        tokens
    }

    /// Tokenize and rejoin with single spaces.
    pub fn normalize(&self, text: &str) -> String {
        self.tokenize(text).join(" ")
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_punctuation_from_words() {
        let t = WordTokenizer::new();
        assert_eq!(t.tokenize("hello, world!"), vec!["hello", ",", "world", "!"]);
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        let t = WordTokenizer::new();
        assert_eq!(t.normalize("hello   there\n\tfriend"), "hello there friend");
    }

    #[test]
    fn test_repeated_punctuation_becomes_single_tokens() {
        let t = WordTokenizer::new();
        assert_eq!(t.normalize("what?!?"), "what ? ! ?");
    }

    #[test]
    fn test_unicode_words_survive() {
        let t = WordTokenizer::new();
        assert_eq!(t.tokenize("naïve café"), vec!["naïve", "café"]);
    }

    #[test]
    fn test_empty_text() {
        let t = WordTokenizer::new();
        assert!(t.tokenize("").is_empty());
        assert_eq!(t.normalize(""), "");
    }
}
