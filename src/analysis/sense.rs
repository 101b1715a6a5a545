//! Word-sense inventory used for part-of-speech filtering of synonyms.
//!
//! The only question the engines ask is whether a word has *any* sense of a
//! given coarse part of speech. [`SenseLexicon`] answers it from the tagger
//! lexicon, an explicit sense table for words with several parts of speech,
//! the irregular-verb table and suffix heuristics.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::pos::CoarsePos;
use crate::analysis::tagger::rule::{self, ADJECTIVE_SUFFIXES, NOUN_SUFFIXES};
use crate::error::{RephraseError, Result};

/// Bundled word → coarse parts of speech table.
pub const BUNDLED_SENSES: &str = include_str!("../../resources/lexicon/senses.json");

/// Trait for has-sense lookups.
pub trait SenseInventory: Send + Sync {
    /// Whether `word` has at least one sense of the given coarse class.
    fn has_sense(&self, word: &str, pos: CoarsePos) -> bool;
}

/// Sense inventory backed by lexicons and suffix rules.
#[derive(Clone, Debug)]
pub struct SenseLexicon {
    tags: Arc<AHashMap<String, String>>,
    senses: AHashMap<String, Vec<CoarsePos>>,
}

impl SenseLexicon {
    /// Build from a word → tag lexicon and a word → senses table.
    pub fn new(tags: Arc<AHashMap<String, String>>, senses: AHashMap<String, Vec<CoarsePos>>) -> Self {
        SenseLexicon { tags, senses }
    }

    /// Build from a tag lexicon and a JSON sense table such as
    /// `{"run": ["noun", "verb"]}`.
    pub fn from_json(tags: Arc<AHashMap<String, String>>, json: &str) -> Result<Self> {
        let raw: AHashMap<String, Vec<String>> = serde_json::from_str(json)
            .map_err(|e| RephraseError::resource_load(format!("Invalid sense table: {e}")))?;

        let mut senses = AHashMap::with_capacity(raw.len());
        for (word, classes) in raw {
            let classes = classes
                .iter()
                .map(|class| class.parse::<CoarsePos>())
                .collect::<Result<Vec<_>>>()?;
            senses.insert(word.to_lowercase(), classes);
        }

        Ok(Self::new(tags, senses))
    }

    /// Load the sense table from a JSON file.
    pub fn from_file<P: AsRef<Path>>(tags: Arc<AHashMap<String, String>>, path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RephraseError::resource_load(format!("Failed to read sense table {}: {e}", path.display()))
        })?;
        Self::from_json(tags, &content)
    }

    fn lexicon_class(&self, word: &str) -> Option<CoarsePos> {
        self.tags.get(word).and_then(|tag| CoarsePos::from_tag(tag))
    }
}

impl SenseInventory for SenseLexicon {
    fn has_sense(&self, word: &str, pos: CoarsePos) -> bool {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return false;
        }

        if self.senses.get(&word).is_some_and(|classes| classes.contains(&pos)) {
            return true;
        }
        if self.lexicon_class(&word) == Some(pos) {
            return true;
        }
        if pos == CoarsePos::Verb && rule::is_irregular_verb_form(&word) {
            return true;
        }
        if pos == CoarsePos::Noun
            && let Some(stem) = word.strip_suffix('s')
            && self.lexicon_class(stem) == Some(CoarsePos::Noun)
        {
            return true;
        }

        match pos {
            CoarsePos::Adv => word.ends_with("ly"),
            CoarsePos::Adj => ADJECTIVE_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)),
            CoarsePos::Noun => NOUN_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)),
            CoarsePos::Verb => ["ize", "ise", "ify", "ate"]
                .iter()
                .any(|suffix| word.ends_with(suffix)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> SenseLexicon {
        let mut tags = AHashMap::new();
        tags.insert("large".to_string(), "JJ".to_string());
        tags.insert("sphere".to_string(), "NN".to_string());
        tags.insert("toss".to_string(), "VB".to_string());
        SenseLexicon::from_json(Arc::new(tags), r#"{"toss": ["verb", "noun"]}"#).unwrap()
    }

    #[test]
    fn test_lexicon_and_table_senses() {
        let senses = lexicon();
        assert!(senses.has_sense("large", CoarsePos::Adj));
        assert!(!senses.has_sense("large", CoarsePos::Verb));
        assert!(senses.has_sense("toss", CoarsePos::Noun));
        assert!(senses.has_sense("Sphere", CoarsePos::Noun));
        assert!(senses.has_sense("spheres", CoarsePos::Noun));
    }

    #[test]
    fn test_irregular_and_suffix_senses() {
        let senses = lexicon();
        assert!(senses.has_sense("threw", CoarsePos::Verb));
        assert!(senses.has_sense("swiftly", CoarsePos::Adv));
        assert!(senses.has_sense("happiness", CoarsePos::Noun));
        assert!(senses.has_sense("joyful", CoarsePos::Adj));
        assert!(!senses.has_sense("", CoarsePos::Noun));
    }

    #[test]
    fn test_bad_sense_table() {
        let tags = Arc::new(AHashMap::new());
        assert!(SenseLexicon::from_json(Arc::clone(&tags), "[1, 2]").is_err());
        assert!(SenseLexicon::from_json(tags, r#"{"x": ["pronoun"]}"#).is_err());
    }
}
