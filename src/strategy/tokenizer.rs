//! Tokenization.

use std::collections::HashSet;

use crate::strategy::types::{TextTokenizer, Token};

/// Splits text into runs of alphanumeric characters.
///
/// Tokens whose lowercase form is in the stopword set are flagged but kept,
/// so offsets stay contiguous for multi-token matching.
#[derive(Debug, Clone, Default)]
pub struct SimpleTokenizer {
    stopwords: HashSet<String>,
}

impl SimpleTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stopwords<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stopwords: stopwords
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    fn token(&self, text: &str, start: usize, end: usize) -> Token {
        let word = &text[start..end];
        Token {
            text: word.to_string(),
            offset: start,
            stopword: self.stopwords.contains(&word.to_lowercase()),
        }
    }
}

impl TextTokenizer for SimpleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut start: Option<usize> = None;

        for (i, c) in text.char_indices() {
            if c.is_alphanumeric() {
                if start.is_none() {
                    start = Some(i);
                }
            } else if let Some(s) = start.take() {
                tokens.push(self.token(text, s, i));
            }
        }
        if let Some(s) = start {
            tokens.push(self.token(text, s, text.len()));
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_follow_source_text() {
        let tokens = SimpleTokenizer::new().tokenize("Hello, wide world!");
        let words: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, vec!["Hello", "wide", "world"]);
        assert_eq!(tokens[1].offset, 7);
        assert_eq!(tokens[2].end(), 17);
    }

    #[test]
    fn test_multibyte_characters() {
        let text = "Zürich ist schön";
        let tokens = SimpleTokenizer::new().tokenize(text);
        assert_eq!(tokens.len(), 3);
        assert_eq!(&text[tokens[2].offset..tokens[2].end()], "schön");
    }

    #[test]
    fn test_stopwords_are_flagged() {
        let tokens = SimpleTokenizer::with_stopwords(["The", "of"]).tokenize("the city of Rome");
        let flags: Vec<_> = tokens.iter().map(|t| t.stopword).collect();
        assert_eq!(flags, vec![true, false, true, false]);
    }
}
