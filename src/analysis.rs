//! Text analysis for Rephrase.
//!
//! This module provides tokenization, sentence splitting, part-of-speech
//! tagging and sense lookups, bundled behind the [`oracle::NlpOracle`] trait
//! that the transformation engines consume.

pub mod oracle;
pub mod pos;
pub mod sense;
pub mod tagger;
pub mod token;
pub mod tokenizer;
