//! Regex-based word tokenizer.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{RephraseError, Result};

/// Decimal numbers and words with interior apostrophes or hyphens are single tokens,
/// ellipses and dashes stay together, and every other symbol is a token of
/// its own.
const DEFAULT_PATTERN: &str = r"\d+(?:[.,]\d+)+|\w+(?:['’-]\w+)*|\.{2,}|-{2,}|[^\w\s]";

static DEFAULT_REGEX: LazyLock<Arc<Regex>> =
    LazyLock::new(|| Arc::new(Regex::new(DEFAULT_PATTERN).expect("default token pattern is valid")));

/// A tokenizer that extracts word and punctuation tokens with a regex.
#[derive(Clone, Debug)]
pub struct WordTokenizer {
    pattern: Arc<Regex>,
}

impl WordTokenizer {
    /// Create a tokenizer with the default word/punctuation pattern.
    pub fn new() -> Self {
        WordTokenizer {
            pattern: Arc::clone(&DEFAULT_REGEX),
        }
    }

    /// Create a tokenizer with a custom pattern; every match becomes a token.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| RephraseError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(WordTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Tokenize into a vector directly.
    pub fn tokens(&self, text: &str) -> Vec<Token> {
        self.pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, mat)| {
                Token::with_offsets(mat.as_str(), position, mat.start(), mat.end())
            })
            .collect()
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        Ok(Box::new(self.tokens(text).into_iter()))
    }

    fn name(&self) -> &'static str {
        "word"
    }
}
