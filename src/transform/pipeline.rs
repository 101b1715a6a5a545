//! The four transformation policies.
//!
//! Each policy is a fixed composition of engines that always runs in the same
//! order. Resources are resolved before a [`Pipeline`] is built, so engines
//! only ever see resolved handles.

use std::fmt;
use std::str::FromStr;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::analysis::oracle::NlpOracle;
use crate::error::{RephraseError, Result};
use crate::lexicon::store::ResolvedResources;
use crate::transform::basic::BasicEngine;
use crate::transform::config::TransformationConfig;
use crate::transform::contextual::ContextualEngine;
use crate::transform::structure::StructureEngine;
use crate::transform::structure::verbs::VerbTable;

/// A named composition of engines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// POS-naive substitution only.
    Basic,
    /// Context-aware substitution only.
    Contextual,
    /// Sentence structure variation only.
    Structure,
    /// Structure variation, then context-aware substitution.
    #[default]
    #[serde(alias = "advanced")]
    Combined,
}

impl Policy {
    pub const ALL: [Policy; 4] = [
        Policy::Basic,
        Policy::Contextual,
        Policy::Structure,
        Policy::Combined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Basic => "basic",
            Policy::Contextual => "contextual",
            Policy::Structure => "structure",
            Policy::Combined => "combined",
        }
    }

    /// Whether the policy needs the NLP oracle.
    pub fn uses_oracle(&self) -> bool {
        !matches!(self, Policy::Basic)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = RephraseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(Policy::Basic),
            "contextual" | "context" => Ok(Policy::Contextual),
            "structure" => Ok(Policy::Structure),
            "combined" | "advanced" => Ok(Policy::Combined),
            other => Err(RephraseError::configuration(format!(
                "Unknown policy '{other}' (expected basic, contextual, structure or combined)"
            ))),
        }
    }
}

/// Engines wired to one oracle and one set of resolved resources.
pub struct Pipeline<'a> {
    oracle: &'a dyn NlpOracle,
    resources: ResolvedResources,
    verbs: VerbTable,
}

impl<'a> Pipeline<'a> {
    pub fn new(oracle: &'a dyn NlpOracle, resources: ResolvedResources) -> Self {
        Pipeline {
            oracle,
            resources,
            verbs: VerbTable::default(),
        }
    }

    pub fn with_verb_table(mut self, verbs: VerbTable) -> Self {
        self.verbs = verbs;
        self
    }

    pub fn resources(&self) -> &ResolvedResources {
        &self.resources
    }

    /// Run `policy` over `text`.
    pub fn run<R: Rng + ?Sized>(
        &self,
        policy: Policy,
        text: &str,
        config: &TransformationConfig,
        rng: &mut R,
    ) -> Result<String> {
        config.validate()?;
        debug!("Running {policy} policy over {} bytes", text.len());

        match policy {
            Policy::Basic => Ok(BasicEngine::new().substitute(text, &self.resources, config, rng)),
            Policy::Contextual => self.contextual().substitute(text, &self.resources, config, rng),
            Policy::Structure => self.structure().vary(text, config, rng),
            Policy::Combined => {
                let restructured = self.structure().vary(text, config, rng)?;
                self.contextual()
                    .substitute(&restructured, &self.resources, config, rng)
            }
        }
    }

    fn contextual(&self) -> ContextualEngine<'a> {
        ContextualEngine::new(self.oracle)
    }

    fn structure(&self) -> StructureEngine<'a> {
        StructureEngine::new(self.oracle).with_verb_table(self.verbs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::oracle::LexiconOracle;
    use crate::lexicon::synonyms::SynonymMap;
    use crate::lexicon::words::AdjectiveSet;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn resources() -> ResolvedResources {
        ResolvedResources::new(
            SynonymMap::from_entries([("ball", vec!["sphere"]), ("threw", vec!["tossed"])]),
            AdjectiveSet::from_words(["happy"]),
        )
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("basic".parse::<Policy>().unwrap(), Policy::Basic);
        assert_eq!("Advanced".parse::<Policy>().unwrap(), Policy::Combined);
        assert_eq!("context".parse::<Policy>().unwrap(), Policy::Contextual);
        assert!(matches!(
            "fancy".parse::<Policy>(),
            Err(RephraseError::Configuration(_))
        ));
        for policy in Policy::ALL {
            assert_eq!(policy.as_str().parse::<Policy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_policy_serde() {
        let policy: Policy = serde_json::from_str("\"structure\"").unwrap();
        assert_eq!(policy, Policy::Structure);
        let policy: Policy = serde_json::from_str("\"advanced\"").unwrap();
        assert_eq!(policy, Policy::Combined);
        assert_eq!(serde_json::to_string(&Policy::Basic).unwrap(), "\"basic\"");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let oracle = LexiconOracle::bundled().unwrap();
        let pipeline = Pipeline::new(&oracle, resources());
        let config = TransformationConfig::default().with_percent_synonyms(101);
        let mut rng = StdRng::seed_from_u64(0);

        let result = pipeline.run(Policy::Basic, "text", &config, &mut rng);
        assert!(matches!(result, Err(RephraseError::Configuration(_))));
    }

    #[test]
    fn test_combined_zero_is_noop() {
        let oracle = LexiconOracle::bundled().unwrap();
        let pipeline = Pipeline::new(&oracle, resources());
        let config = TransformationConfig::unchanged();
        let text = "The ball was thrown by John. He was very happy, and he smiled.";

        for policy in Policy::ALL {
            let mut rng = StdRng::seed_from_u64(3);
            assert_eq!(pipeline.run(policy, text, &config, &mut rng).unwrap(), text);
        }
    }

    #[test]
    fn test_combined_runs_structure_then_substitution() {
        let oracle = LexiconOracle::bundled().unwrap();
        let pipeline = Pipeline::new(&oracle, resources());
        let config = TransformationConfig::unchanged()
            .with_percent_voice_change(100)
            .with_percent_synonyms(100);

        let outputs: Vec<String> = (0..32)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                pipeline
                    .run(Policy::Combined, "The ball was thrown by John.", &config, &mut rng)
                    .unwrap()
            })
            .collect();

        // The voice change produces "threw", which the synonym pass then replaces.
        assert!(outputs.iter().any(|o| o == "John tossed the sphere."));
    }
}
