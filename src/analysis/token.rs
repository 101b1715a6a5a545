//! Token types for text analysis.
//!
//! A [`Token`] is the unit that flows between the tokenizer, the tagger and the
//! transformation engines. It carries its surface text, its byte span in the
//! text it was cut from and, once tagged, a Penn-Treebank part-of-speech tag.
//!
//! # Examples
//!
//! ```
//! use rephrase::analysis::token::Token;
//!
//! let token = Token::with_offsets("world", 1, 6, 11).with_tag("NN");
//! assert_eq!(token.text, "world");
//! assert_eq!(token.start_offset, 6);
//! assert_eq!(token.tag(), "NN");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single token of text, optionally tagged with its part of speech.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The surface text of the token, possibly with attached punctuation
    pub text: String,

    /// The position of the token in its token sequence (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,

    /// Penn-Treebank part-of-speech tag, once tagged
    pub pos: Option<String>,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
            pos: None,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            pos: None,
        }
    }

    /// Attach a part-of-speech tag.
    pub fn with_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.pos = Some(tag.into());
        self
    }

    /// The part-of-speech tag, or an empty string when untagged.
    pub fn tag(&self) -> &str {
        self.pos.as_deref().unwrap_or("")
    }

    /// Get the length of the token text in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Lowercased surface text.
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pos {
            Some(tag) => write!(f, "{}/{}", self.text, tag),
            None => write!(f, "{}", self.text),
        }
    }
}

/// A token stream represents a sequence of tokens from the tokenizer.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("hello", 0);
        assert_eq!(token.text, "hello");
        assert_eq!(token.position, 0);
        assert_eq!(token.start_offset, 0);
        assert_eq!(token.end_offset, 0);
        assert!(token.pos.is_none());
        assert_eq!(token.tag(), "");
    }

    #[test]
    fn test_token_with_offsets() {
        let token = Token::with_offsets("world", 1, 6, 11);
        assert_eq!(token.text, "world");
        assert_eq!(token.position, 1);
        assert_eq!(token.start_offset, 6);
        assert_eq!(token.end_offset, 11);
    }

    #[test]
    fn test_token_display() {
        assert_eq!(format!("{}", Token::new("hello", 0)), "hello");
        assert_eq!(format!("{}", Token::new("ball", 0).with_tag("NN")), "ball/NN");
    }

    #[test]
    fn test_token_len_counts_chars() {
        assert_eq!(Token::new("café", 0).len(), 4);
    }
}
