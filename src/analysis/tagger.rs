//! Part-of-speech taggers.
//!
//! A tagger assigns a Penn-Treebank tag to every token of a sentence. Taggers
//! see the whole token slice at once so they can use left context.
//!
//! # Examples
//!
//! ```
//! use rephrase::analysis::tagger::Tagger;
//! use rephrase::analysis::tagger::rule::RuleTagger;
//! use rephrase::analysis::tokenizer::word::WordTokenizer;
//!
//! let tokens = WordTokenizer::new().tokens("The ball was thrown by John.");
//! let tagged = RuleTagger::bundled().unwrap().tag(tokens).unwrap();
//! let tags: Vec<&str> = tagged.iter().map(|t| t.tag()).collect();
//! assert_eq!(tags, vec!["DT", "NN", "VBD", "VBN", "IN", "NNP", "."]);
//! ```

use crate::analysis::token::Token;
use crate::error::Result;

/// Trait for part-of-speech taggers.
pub trait Tagger: Send + Sync {
    /// Tag every token, returning the same tokens with `pos` filled in.
    fn tag(&self, tokens: Vec<Token>) -> Result<Vec<Token>>;

    /// Get the name of this tagger (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod model;
pub mod rule;
