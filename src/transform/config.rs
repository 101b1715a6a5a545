//! Parameters of one transformation call.

use serde::{Deserialize, Serialize};

use crate::error::{RephraseError, Result};

/// Immutable parameter bag passed into every pipeline call.
///
/// Percentages are in `[0, 100]`; [`TransformationConfig::validate`] rejects
/// anything larger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformationConfig {
    /// Share of tokens to replace with synonyms.
    pub percent_synonyms: u8,

    /// Chance to add or remove emphasis on an eligible adjective.
    pub percent_adjectives: u8,

    /// Chance to try clause reordering on a sentence.
    pub percent_reorder: u8,

    /// Chance to try a voice change on a sentence.
    pub percent_voice_change: u8,

    /// Chance to try beginning variation on a sentence.
    pub percent_beginning_vary: u8,

    /// Leave quoted spans untouched.
    pub ignore_quotes: bool,

    /// Filter synonym candidates by part of speech.
    pub use_pos_filtering: bool,
}

impl Default for TransformationConfig {
    fn default() -> Self {
        Self {
            percent_synonyms: 30,
            percent_adjectives: 60,
            percent_reorder: 40,
            percent_voice_change: 20,
            percent_beginning_vary: 30,
            ignore_quotes: true,
            use_pos_filtering: true,
        }
    }
}

impl TransformationConfig {
    /// Defaults of the basic policy, which substitutes more aggressively.
    pub fn basic() -> Self {
        Self {
            percent_synonyms: 50,
            ..Self::default()
        }
    }

    /// Every percentage set to zero.
    pub fn unchanged() -> Self {
        Self {
            percent_synonyms: 0,
            percent_adjectives: 0,
            percent_reorder: 0,
            percent_voice_change: 0,
            percent_beginning_vary: 0,
            ..Self::default()
        }
    }

    pub fn with_percent_synonyms(mut self, percent: u8) -> Self {
        self.percent_synonyms = percent;
        self
    }

    pub fn with_percent_adjectives(mut self, percent: u8) -> Self {
        self.percent_adjectives = percent;
        self
    }

    pub fn with_percent_reorder(mut self, percent: u8) -> Self {
        self.percent_reorder = percent;
        self
    }

    pub fn with_percent_voice_change(mut self, percent: u8) -> Self {
        self.percent_voice_change = percent;
        self
    }

    pub fn with_percent_beginning_vary(mut self, percent: u8) -> Self {
        self.percent_beginning_vary = percent;
        self
    }

    pub fn with_ignore_quotes(mut self, ignore_quotes: bool) -> Self {
        self.ignore_quotes = ignore_quotes;
        self
    }

    pub fn with_pos_filtering(mut self, use_pos_filtering: bool) -> Self {
        self.use_pos_filtering = use_pos_filtering;
        self
    }

    /// Reject percentages above 100.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("percent_synonyms", self.percent_synonyms),
            ("percent_adjectives", self.percent_adjectives),
            ("percent_reorder", self.percent_reorder),
            ("percent_voice_change", self.percent_voice_change),
            ("percent_beginning_vary", self.percent_beginning_vary),
        ];

        for (name, value) in fields {
            if value > 100 {
                return Err(RephraseError::configuration(format!(
                    "{name} must be between 0 and 100, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TransformationConfig::default();
        assert_eq!(config.percent_synonyms, 30);
        assert_eq!(config.percent_adjectives, 60);
        assert!(config.ignore_quotes);
        assert_eq!(TransformationConfig::basic().percent_synonyms, 50);
    }

    #[test]
    fn test_validate() {
        assert!(TransformationConfig::default().validate().is_ok());
        let error = TransformationConfig::default()
            .with_percent_reorder(101)
            .validate()
            .unwrap_err();
        assert!(matches!(error, RephraseError::Configuration(_)));
    }

    #[test]
    fn test_partial_json() {
        let config: TransformationConfig =
            serde_json::from_str(r#"{"percent_synonyms": 10, "ignore_quotes": false}"#).unwrap();
        assert_eq!(config.percent_synonyms, 10);
        assert!(!config.ignore_quotes);
        assert_eq!(config.percent_reorder, 40);
    }
}
