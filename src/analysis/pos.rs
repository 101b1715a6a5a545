//! Part-of-speech tag helpers.
//!
//! Tags follow the Penn Treebank convention (`NN`, `VBD`, `JJ`, ...). The
//! engines only ever ask coarse questions of a tag, which live here so the
//! tagset is interpreted in one place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RephraseError, Result};

/// Coarse part-of-speech class used for sense lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoarsePos {
    Adj,
    Verb,
    Noun,
    Adv,
}

impl CoarsePos {
    /// Map a fine-grained tag to its coarse class; unmapped tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.chars().next()? {
            'J' => Some(CoarsePos::Adj),
            'V' => Some(CoarsePos::Verb),
            'N' => Some(CoarsePos::Noun),
            'R' => Some(CoarsePos::Adv),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CoarsePos::Adj => "adj",
            CoarsePos::Verb => "verb",
            CoarsePos::Noun => "noun",
            CoarsePos::Adv => "adv",
        }
    }
}

impl fmt::Display for CoarsePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoarsePos {
    type Err = RephraseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "adj" | "a" | "s" => Ok(CoarsePos::Adj),
            "verb" | "v" => Ok(CoarsePos::Verb),
            "noun" | "n" => Ok(CoarsePos::Noun),
            "adv" | "r" => Ok(CoarsePos::Adv),
            other => Err(RephraseError::resource_load(format!(
                "unknown coarse part of speech '{other}'"
            ))),
        }
    }
}

pub fn is_proper_noun(tag: &str) -> bool {
    matches!(tag, "NNP" | "NNPS")
}

pub fn is_noun(tag: &str) -> bool {
    tag.starts_with("NN")
}

pub fn is_pronoun(tag: &str) -> bool {
    matches!(tag, "PRP" | "PRP$")
}

pub fn is_adjective(tag: &str) -> bool {
    tag.starts_with("JJ")
}

/// Finite or base verb forms that can head an active clause.
pub fn is_finite_verb(tag: &str) -> bool {
    matches!(tag, "VB" | "VBD" | "VBP" | "VBZ")
}

pub fn is_present_tense(tag: &str) -> bool {
    matches!(tag, "VBP" | "VBZ")
}

pub fn is_past_participle(tag: &str) -> bool {
    tag == "VBN"
}

/// Plain adverb tag (comparative/superlative adverbs are not fronted).
pub fn is_plain_adverb(tag: &str) -> bool {
    tag == "RB"
}

/// Tags that may continue a noun phrase once its head noun has been found.
pub fn continues_noun_phrase(tag: &str) -> bool {
    matches!(tag, "NN" | "NNS" | "NNP" | "NNPS" | "JJ" | "DT")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coarse_mapping() {
        assert_eq!(CoarsePos::from_tag("JJR"), Some(CoarsePos::Adj));
        assert_eq!(CoarsePos::from_tag("VBN"), Some(CoarsePos::Verb));
        assert_eq!(CoarsePos::from_tag("NNS"), Some(CoarsePos::Noun));
        assert_eq!(CoarsePos::from_tag("RB"), Some(CoarsePos::Adv));
        assert_eq!(CoarsePos::from_tag("DT"), None);
        assert_eq!(CoarsePos::from_tag(""), None);
    }

    #[test]
    fn test_tag_predicates() {
        assert!(is_proper_noun("NNP"));
        assert!(!is_proper_noun("NN"));
        assert!(is_finite_verb("VBZ"));
        assert!(!is_finite_verb("VBG"));
        assert!(continues_noun_phrase("DT"));
        assert!(!continues_noun_phrase("IN"));
    }

    #[test]
    fn test_coarse_from_str() {
        assert_eq!("noun".parse::<CoarsePos>().unwrap(), CoarsePos::Noun);
        assert_eq!("r".parse::<CoarsePos>().unwrap(), CoarsePos::Adv);
        assert!("pronoun".parse::<CoarsePos>().is_err());
    }
}
