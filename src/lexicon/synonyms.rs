//! Synonym map: lowercase word → ordered candidate list.

use std::fs;
use std::path::Path;

use ahash::AHashMap;

use crate::error::{RephraseError, Result};
use crate::lexicon::words::WordSet;

/// Mapping from a lowercase word to its synonym candidates.
///
/// Candidate order is the order of the source data. An entry with an empty
/// candidate list behaves as if the word had no synonyms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SynonymMap {
    entries: AHashMap<String, Vec<String>>,
}

impl SynonymMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(word, candidates)` pairs. Keys are lowercased; a
    /// repeated key replaces the earlier entry.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(word, candidates)| {
                (
                    word.as_ref().to_lowercase(),
                    candidates.into_iter().map(Into::into).collect(),
                )
            })
            .collect();
        SynonymMap { entries }
    }

    /// Parse a JSON object of `word: [synonyms]`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: AHashMap<String, Vec<String>> = serde_json::from_str(json).map_err(|e| {
            RephraseError::resource_load(format!(
                "Synonym list must be a JSON object of word to synonym array: {e}"
            ))
        })?;
        Ok(Self::from_entries(raw))
    }

    /// Load a JSON synonym list from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RephraseError::resource_load(format!(
                "Failed to read synonym list '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json(&content)
    }

    /// Candidates for `word` (case-insensitive); `None` when absent or empty.
    pub fn get(&self, word: &str) -> Option<&[String]> {
        self.entries
            .get(&word.to_lowercase())
            .map(Vec::as_slice)
            .filter(|candidates| !candidates.is_empty())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    pub fn insert<S: Into<String>>(&mut self, word: &str, candidates: Vec<S>) {
        self.entries.insert(
            word.to_lowercase(),
            candidates.into_iter().map(Into::into).collect(),
        );
    }

    /// Keep only entries whose key is a common word and whose list is non-empty.
    pub fn restrict_to(&self, common: &WordSet) -> SynonymMap {
        let entries = self
            .entries
            .iter()
            .filter(|(word, candidates)| !candidates.is_empty() && common.contains(word))
            .map(|(word, candidates)| (word.clone(), candidates.clone()))
            .collect();
        SynonymMap { entries }
    }

    /// Number of entries, including empty ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
