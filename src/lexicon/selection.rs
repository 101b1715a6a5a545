//! Closed selectors for which lexical resources a call uses.
//!
//! Names coming from configuration files or the command line are parsed into
//! these enums up front, so an unknown list name is rejected before any text
//! is touched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RephraseError, Result};

/// Which synonym list to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynonymSource {
    /// The bundled primary list.
    #[default]
    #[serde(alias = "finnlp")]
    Primary,
    /// The bundled secondary list.
    #[serde(alias = "zaibacu")]
    Secondary,
    /// A list loaded at runtime.
    Custom,
}

/// Which adjective set to use for emphasis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjectiveSource {
    #[default]
    #[serde(alias = "normal")]
    Default,
    Custom,
}

impl FromStr for SynonymSource {
    type Err = RephraseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "primary" | "finnlp" => Ok(SynonymSource::Primary),
            "secondary" | "zaibacu" => Ok(SynonymSource::Secondary),
            "custom" => Ok(SynonymSource::Custom),
            other => Err(RephraseError::configuration(format!(
                "Invalid synonym list '{other}' (expected primary, secondary or custom)"
            ))),
        }
    }
}

impl FromStr for AdjectiveSource {
    type Err = RephraseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "default" | "normal" => Ok(AdjectiveSource::Default),
            "custom" => Ok(AdjectiveSource::Custom),
            other => Err(RephraseError::configuration(format!(
                "Invalid adjective list '{other}' (expected default or custom)"
            ))),
        }
    }
}

impl fmt::Display for SynonymSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SynonymSource::Primary => "primary",
            SynonymSource::Secondary => "secondary",
            SynonymSource::Custom => "custom",
        })
    }
}

impl fmt::Display for AdjectiveSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AdjectiveSource::Default => "default",
            AdjectiveSource::Custom => "custom",
        })
    }
}

/// The full resource choice for one call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceSelection {
    pub synonyms: SynonymSource,
    pub adjectives: AdjectiveSource,
    /// Restrict the synonym map to common words.
    pub common_words_only: bool,
}

impl ResourceSelection {
    pub fn new(synonyms: SynonymSource, adjectives: AdjectiveSource) -> Self {
        ResourceSelection {
            synonyms,
            adjectives,
            common_words_only: false,
        }
    }

    pub fn with_synonyms(mut self, synonyms: SynonymSource) -> Self {
        self.synonyms = synonyms;
        self
    }

    pub fn with_adjectives(mut self, adjectives: AdjectiveSource) -> Self {
        self.adjectives = adjectives;
        self
    }

    pub fn with_common_words_only(mut self, common_words_only: bool) -> Self {
        self.common_words_only = common_words_only;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sources_and_aliases() {
        assert_eq!("primary".parse::<SynonymSource>().unwrap(), SynonymSource::Primary);
        assert_eq!("FinNLP".parse::<SynonymSource>().unwrap(), SynonymSource::Primary);
        assert_eq!("zaibacu".parse::<SynonymSource>().unwrap(), SynonymSource::Secondary);
        assert_eq!("normal".parse::<AdjectiveSource>().unwrap(), AdjectiveSource::Default);
        assert_eq!("custom".parse::<AdjectiveSource>().unwrap(), AdjectiveSource::Custom);
    }

    #[test]
    fn test_unknown_source_is_configuration_error() {
        let error = "thesaurus".parse::<SynonymSource>().unwrap_err();
        assert!(matches!(error, RephraseError::Configuration(_)));
        assert!("fancy".parse::<AdjectiveSource>().is_err());
    }

    #[test]
    fn test_selection_serde() {
        let selection: ResourceSelection =
            serde_json::from_str(r#"{"synonyms": "zaibacu", "common_words_only": true}"#).unwrap();
        assert_eq!(selection.synonyms, SynonymSource::Secondary);
        assert_eq!(selection.adjectives, AdjectiveSource::Default);
        assert!(selection.common_words_only);
    }
}
