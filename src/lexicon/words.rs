//! Case-insensitive word sets (adjectives eligible for emphasis, common words).

use std::fs;
use std::path::Path;

use ahash::AHashSet;

use crate::error::{RephraseError, Result};

/// A set of lowercase words with case-insensitive membership.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordSet {
    words: AHashSet<String>,
}

/// Adjectives eligible for emphasis insertion.
pub type AdjectiveSet = WordSet;

/// Words considered common enough to substitute when restricting synonyms.
pub type CommonWords = WordSet;

impl WordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        WordSet {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Parse a JSON array of words.
    pub fn from_json(json: &str) -> Result<Self> {
        let words: Vec<String> = serde_json::from_str(json).map_err(|e| {
            RephraseError::resource_load(format!("Word list must be a JSON array of strings: {e}"))
        })?;
        Ok(Self::from_words(words))
    }

    /// Load a JSON word array from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RephraseError::resource_load(format!(
                "Failed to read word list '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json(&content)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
