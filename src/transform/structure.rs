//! Sentence structure variation.
//!
//! The input is split into sentences and each sentence goes through three
//! independent stages, each gated by its own percentage:
//!
//! 1. [`reorder`]: swap the clauses of a compound sentence;
//! 2. [`voice`]: passive → active (probability 0.7) or active → passive
//!    (probability 0.3);
//! 3. [`beginning`]: open with a transition phrase or a fronted adverb.
//!
//! Every stage re-analyzes the text produced by the previous one. Sentences
//! are rejoined with a single space, so the original inter-sentence
//! whitespace is not kept.
//!
//! # Examples
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use rephrase::analysis::oracle::LexiconOracle;
//! use rephrase::transform::config::TransformationConfig;
//! use rephrase::transform::structure::StructureEngine;
//!
//! let oracle = LexiconOracle::bundled().unwrap();
//! let engine = StructureEngine::new(&oracle);
//! let config = TransformationConfig::unchanged();
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let output = engine.vary("One. Two.", &config, &mut rng).unwrap();
//! assert_eq!(output, "One. Two.");
//! ```

use log::{debug, warn};
use rand::Rng;

use crate::analysis::oracle::NlpOracle;
use crate::analysis::pos;
use crate::error::Result;
use crate::transform::config::TransformationConfig;
use crate::transform::{chance, roll};

pub mod beginning;
pub mod reorder;
pub mod verbs;
pub mod voice;

use verbs::VerbTable;

/// Probability that a detected passive sentence is made active.
pub const PASSIVE_TO_ACTIVE: f64 = 0.7;

/// Probability that an active sentence is made passive.
pub const ACTIVE_TO_PASSIVE: f64 = 0.3;

/// The per-sentence structure engine.
pub struct StructureEngine<'a> {
    oracle: &'a dyn NlpOracle,
    verbs: VerbTable,
}

impl<'a> StructureEngine<'a> {
    pub fn new(oracle: &'a dyn NlpOracle) -> Self {
        StructureEngine {
            oracle,
            verbs: VerbTable::default(),
        }
    }

    /// Replace the participle table used for voice conversion.
    pub fn with_verb_table(mut self, verbs: VerbTable) -> Self {
        self.verbs = verbs;
        self
    }

    /// Vary every sentence of `text`.
    ///
    /// A sentence whose analysis fails is kept as it was; only a failure to
    /// split the text at all is returned as an error.
    pub fn vary<R: Rng + ?Sized>(
        &self,
        text: &str,
        config: &TransformationConfig,
        rng: &mut R,
    ) -> Result<String> {
        let sentences = self.oracle.split_sentences(text)?;
        let mut output = Vec::with_capacity(sentences.len());

        for (i, sentence) in sentences.iter().enumerate() {
            match self.vary_sentence(sentence, config, rng) {
                Ok(varied) => output.push(varied),
                Err(e) => {
                    warn!("Keeping sentence {i} unchanged: {e}");
                    output.push(sentence.clone());
                }
            }
        }

        Ok(output.join(" "))
    }

    /// Run the three stages over one sentence.
    pub fn vary_sentence<R: Rng + ?Sized>(
        &self,
        sentence: &str,
        config: &TransformationConfig,
        rng: &mut R,
    ) -> Result<String> {
        if config.ignore_quotes && sentence.contains('"') {
            return Ok(sentence.to_string());
        }

        let mut current = sentence.to_string();

        if roll(rng, config.percent_reorder) {
            let tokens = self.oracle.analyze(&current)?;
            let proper = tokens.first().is_some_and(|t| pos::is_proper_noun(t.tag()));
            if let Some(reordered) = reorder::reorder(&current, proper, rng) {
                debug!("Reordered clauses: {reordered}");
                current = reordered;
            }
        }

        if roll(rng, config.percent_voice_change) {
            let tokens = self.oracle.analyze(&current)?;
            let converted = if voice::detect_passive(&tokens).is_some() {
                if chance(rng, PASSIVE_TO_ACTIVE) {
                    voice::passive_to_active(&tokens, &self.verbs)
                } else {
                    None
                }
            } else if chance(rng, ACTIVE_TO_PASSIVE) {
                voice::active_to_passive(&tokens, &self.verbs)
            } else {
                None
            };
            if let Some(converted) = converted {
                debug!("Changed voice: {converted}");
                current = converted;
            }
        }

        if roll(rng, config.percent_beginning_vary) {
            let tokens = self.oracle.analyze(&current)?;
            if let Some(varied) = beginning::vary_beginning(&current, &tokens, rng) {
                debug!("Varied beginning: {varied}");
                current = varied;
            }
        }

        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::oracle::LexiconOracle;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn voice_only() -> TransformationConfig {
        TransformationConfig::unchanged().with_percent_voice_change(100)
    }

    #[test]
    fn test_zero_percent_rejoins_sentences() {
        let oracle = LexiconOracle::bundled().unwrap();
        let engine = StructureEngine::new(&oracle);
        let mut rng = StdRng::seed_from_u64(1);

        let output = engine
            .vary("The ball was thrown.  It flew far!", &TransformationConfig::unchanged(), &mut rng)
            .unwrap();
        assert_eq!(output, "The ball was thrown. It flew far!");
    }

    #[test]
    fn test_passive_becomes_active() {
        let oracle = LexiconOracle::bundled().unwrap();
        let engine = StructureEngine::new(&oracle);

        let outputs: Vec<String> = (0..32)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                engine
                    .vary_sentence("The ball was thrown by John.", &voice_only(), &mut rng)
                    .unwrap()
            })
            .collect();

        assert!(outputs.iter().any(|o| o == "John threw the ball."));
        assert!(
            outputs
                .iter()
                .all(|o| o == "John threw the ball." || o == "The ball was thrown by John.")
        );
    }

    #[test]
    fn test_active_becomes_passive() {
        let oracle = LexiconOracle::bundled().unwrap();
        let engine = StructureEngine::new(&oracle);

        let converted = (0..64).any(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            engine
                .vary_sentence("John threw the ball.", &voice_only(), &mut rng)
                .unwrap()
                == "The ball was thrown by John."
        });
        assert!(converted);
    }

    #[test]
    fn test_sentence_initial_name_keeps_capital() {
        let oracle = LexiconOracle::bundled().unwrap();
        let engine = StructureEngine::new(&oracle);
        let sentence = "Mary baked a cake for the party.";

        let outputs: Vec<String> = (0..64)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                engine.vary_sentence(sentence, &voice_only(), &mut rng).unwrap()
            })
            .collect();

        assert!(outputs.iter().any(|o| o != sentence));
        for output in &outputs {
            assert!(output.contains("Mary"), "{output:?}");
            assert!(!output.contains("mary"), "{output:?}");
        }
    }

    #[test]
    fn test_quoted_sentence_untouched() {
        let oracle = LexiconOracle::bundled().unwrap();
        let engine = StructureEngine::new(&oracle);
        let config = TransformationConfig::default()
            .with_percent_reorder(100)
            .with_percent_voice_change(100)
            .with_percent_beginning_vary(100);
        let sentence = "He said \"the ball was thrown by John\", and we left.";

        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(engine.vary_sentence(sentence, &config, &mut rng).unwrap(), sentence);
        }
    }

    #[test]
    fn test_custom_verb_table() {
        let oracle = LexiconOracle::bundled().unwrap();
        let engine = StructureEngine::new(&oracle).with_verb_table(VerbTable::empty());

        let converted = (0..32).find_map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let output = engine
                .vary_sentence("The ball was thrown by John.", &voice_only(), &mut rng)
                .unwrap();
            (output != "The ball was thrown by John.").then_some(output)
        });
        assert_eq!(converted.as_deref(), Some("John thrown the ball."));
    }

    #[test]
    fn test_seeded_determinism() {
        let oracle = LexiconOracle::bundled().unwrap();
        let engine = StructureEngine::new(&oracle);
        let config = TransformationConfig::default()
            .with_percent_reorder(100)
            .with_percent_voice_change(100)
            .with_percent_beginning_vary(100);
        let text = "The dog ran quickly, and the cat slept. The ball was thrown by John.";

        let a = engine.vary(text, &config, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = engine.vary(text, &config, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }
}
