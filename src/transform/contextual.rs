//! Context-aware substitution.
//!
//! Two passes with an explicit text boundary between them:
//!
//! 1. the synonym pass tokenizes and tags the input, samples exactly
//!    `min(floor(tokens * percent / 100), eligible)` token indices and replaces
//!    each with one of the three best-ranked synonyms;
//! 2. the emphasis pass tokenizes and tags the *text* produced by pass 1 (not
//!    its tokens) and adds or removes emphasis words before adjectives.
//!
//! A pass that changes nothing returns its input text untouched.

use log::debug;
use rand::Rng;
use rand::seq::{IndexedRandom, index};

use crate::analysis::oracle::NlpOracle;
use crate::error::Result;
use crate::lexicon::store::ResolvedResources;
use crate::transform::config::TransformationConfig;
use crate::transform::emphasis;
use crate::transform::quote::QuoteState;
use crate::transform::selector::{self, SynonymSelector};
use crate::util::text;

/// Number of top-ranked candidates a replacement is drawn from.
const TOP_CANDIDATES: usize = 3;

/// Outcome of the synonym pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynonymPass {
    /// The rewritten text.
    pub text: String,
    /// Token indices that were replaced.
    pub replaced: Vec<usize>,
    /// Number of tokens in the input.
    pub token_count: usize,
}

/// The context-aware substitution engine.
pub struct ContextualEngine<'a> {
    oracle: &'a dyn NlpOracle,
}

impl<'a> ContextualEngine<'a> {
    pub fn new(oracle: &'a dyn NlpOracle) -> Self {
        ContextualEngine { oracle }
    }

    /// Run both passes.
    pub fn substitute<R: Rng + ?Sized>(
        &self,
        input: &str,
        resources: &ResolvedResources,
        config: &TransformationConfig,
        rng: &mut R,
    ) -> Result<String> {
        let first = self.synonym_pass(input, resources, config, rng)?;
        self.emphasis_pass(&first.text, resources, config, rng)
    }

    /// Stage 1: POS-aware synonym replacement.
    pub fn synonym_pass<R: Rng + ?Sized>(
        &self,
        input: &str,
        resources: &ResolvedResources,
        config: &TransformationConfig,
        rng: &mut R,
    ) -> Result<SynonymPass> {
        let tokens = self.oracle.analyze(input)?;
        let token_count = tokens.len();
        let target = token_count * config.percent_synonyms as usize / 100;

        let eligible = selector::eligible_indices(&tokens);
        let mut selected = vec![false; token_count];
        let amount = target.min(eligible.len());
        for pick in index::sample(rng, eligible.len(), amount) {
            selected[eligible[pick]] = true;
        }

        let synonym_selector = SynonymSelector::new(self.oracle);
        let mut quotes = QuoteState::new();
        let mut output = Vec::with_capacity(token_count);
        let mut replaced = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            let quoted = quotes.observe_token(&token.text);
            if (quoted && config.ignore_quotes) || !selected[i] {
                output.push(token.text.clone());
                continue;
            }

            let (prefix, word, suffix) = text::split_punctuation(&token.text);
            let Some(candidates) = resources.synonyms.get(word) else {
                output.push(token.text.clone());
                continue;
            };

            let ranked = synonym_selector.select(
                &word.to_lowercase(),
                token.tag(),
                candidates,
                config.use_pos_filtering,
            );
            let top = &ranked[..ranked.len().min(TOP_CANDIDATES)];
            let Some(choice) = top.choose(rng) else {
                output.push(token.text.clone());
                continue;
            };

            let choice = if text::starts_uppercase(word) {
                text::capitalize_first(choice)
            } else {
                choice.clone()
            };
            output.push(format!("{prefix}{choice}{suffix}"));
            replaced.push(i);
        }

        debug!(
            "Synonym pass: {} of {} tokens replaced (target {}, eligible {})",
            replaced.len(),
            token_count,
            target,
            eligible.len()
        );

        let text = if replaced.is_empty() {
            input.to_string()
        } else {
            text::join_tokens(&output)
        };

        Ok(SynonymPass {
            text,
            replaced,
            token_count,
        })
    }

    /// Stage 2: emphasis over the re-tagged stage-1 text.
    pub fn emphasis_pass<R: Rng + ?Sized>(
        &self,
        input: &str,
        resources: &ResolvedResources,
        config: &TransformationConfig,
        rng: &mut R,
    ) -> Result<String> {
        let tokens = self.oracle.analyze(input)?;
        let (output, changed) = emphasis::emphasis_pass(
            &tokens,
            &resources.adjectives,
            config.percent_adjectives,
            config.ignore_quotes,
            rng,
        );

        if changed {
            Ok(text::join_tokens(&output))
        } else {
            Ok(input.to_string())
        }
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
            SynonymMap::from_entries([
                ("ball", vec!["sphere"]),
                ("threw", vec!["tossed"]),
                ("correct", vec!["right", "accurate"]),
                ("said", vec!["stated"]),
                ("loudly", vec!["noisily"]),
            ]),
            AdjectiveSet::from_words(["happy"]),
        )
    }

    #[test]
    fn test_full_replacement() {
        let oracle = LexiconOracle::bundled().unwrap();
        let engine = ContextualEngine::new(&oracle);
        let config = TransformationConfig::unchanged().with_percent_synonyms(100);
        let mut rng = StdRng::seed_from_u64(5);

        let pass = engine
            .synonym_pass("John threw the ball.", &resources(), &config, &mut rng)
            .unwrap();
        assert_eq!(pass.text, "John tossed the sphere.");
        assert_eq!(pass.replaced, vec![1, 3]);
    }

    #[test]
    fn test_replacement_count_bounded() {
        let oracle = LexiconOracle::bundled().unwrap();
        let engine = ContextualEngine::new(&oracle);
        let config = TransformationConfig::unchanged().with_percent_synonyms(25);
        let input = "John threw the ball and said the ball was correct.";

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pass = engine.synonym_pass(input, &resources(), &config, &mut rng).unwrap();
            assert!(pass.replaced.len() <= pass.token_count * 25 / 100);
        }
    }

    #[test]
    fn test_quotes_are_preserved() {
        let oracle = LexiconOracle::bundled().unwrap();
        let engine = ContextualEngine::new(&oracle);
        let config = TransformationConfig::default()
            .with_percent_synonyms(100)
            .with_percent_adjectives(100);
        let mut rng = StdRng::seed_from_u64(11);

        let output = engine
            .substitute("He said \"this is correct\" loudly.", &resources(), &config, &mut rng)
            .unwrap();
        assert!(output.contains("\"this is correct\""));
        assert!(output.contains("stated"));
        assert!(output.contains("noisily"));
    }

    #[test]
    fn test_quoted_words_replaced_when_quotes_not_ignored() {
        let oracle = LexiconOracle::bundled().unwrap();
        let engine = ContextualEngine::new(&oracle);
        let config = TransformationConfig::unchanged()
            .with_percent_synonyms(100)
            .with_ignore_quotes(false);

        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pass = engine
                .synonym_pass("He said \"this is correct\" loudly.", &resources(), &config, &mut rng)
                .unwrap();
            assert!(
                pass.text == "He stated \"this is right\" noisily."
                    || pass.text == "He stated \"this is accurate\" noisily.",
                "{:?}",
                pass.text
            );
        }
    }

    #[test]
    fn test_zero_percent_returns_input() {
        let oracle = LexiconOracle::bundled().unwrap();
        let engine = ContextualEngine::new(&oracle);
        let config = TransformationConfig::unchanged();
        let mut rng = StdRng::seed_from_u64(0);
        let input = "She was   very happy ( really ) , wasn't she?";

        assert_eq!(engine.substitute(input, &resources(), &config, &mut rng).unwrap(), input);
    }

    #[test]
    fn test_emphasis_removed_before_adjective() {
        let oracle = LexiconOracle::bundled().unwrap();
        let engine = ContextualEngine::new(&oracle);
        let config = TransformationConfig::unchanged().with_percent_adjectives(100);
        let mut rng = StdRng::seed_from_u64(0);

        let output = engine
            .emphasis_pass("He is very happy.", &resources(), &config, &mut rng)
            .unwrap();
        assert_eq!(output, "He is happy.");
    }
}
