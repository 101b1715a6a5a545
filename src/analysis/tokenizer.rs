//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of every transformation: they split input
//! text into [`Token`](crate::analysis::token::Token)s carrying byte offsets
//! into the source text.
//!
//! # Available Tokenizers
//!
//! - [`word::WordTokenizer`] - Regex word/punctuation tokenizer used by the engines
//! - [`sentence::SentenceSplitter`] - Sentence boundary detection
//!
//! # Examples
//!
//! ```
//! use rephrase::analysis::tokenizer::Tokenizer;
//! use rephrase::analysis::tokenizer::word::WordTokenizer;
//!
//! let tokenizer = WordTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world.").unwrap().collect();
//! assert_eq!(tokens.len(), 4);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a tokenizer can sit behind the shared,
/// read-only NLP oracle.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod sentence;
pub mod word;
