//! Basic substitution: POS-naive synonym replacement and emphasis insertion.
//!
//! The text is cut at Unicode word boundaries, so whitespace and punctuation
//! are carried through exactly and only word segments are ever rewritten.

use log::debug;
use rand::Rng;
use rand::seq::{IndexedRandom, index};
use unicode_segmentation::UnicodeSegmentation;

use crate::lexicon::store::ResolvedResources;
use crate::transform::config::TransformationConfig;
use crate::transform::emphasis;
use crate::transform::quote::QuoteState;
use crate::transform::roll;
use crate::util::text;

/// The basic substitution engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicEngine;

impl BasicEngine {
    pub fn new() -> Self {
        BasicEngine
    }

    /// Whether a word segment may be replaced.
    pub fn is_eligible(word: &str) -> bool {
        word.chars().all(char::is_alphabetic)
            && word.chars().count() > 2
            && !text::is_all_caps(word)
    }

    /// Replace `round(words * percent_synonyms / 100)` randomly chosen eligible
    /// words with a random synonym, then prepend an emphasis word to each
    /// adjective with probability `percent_adjectives`.
    pub fn substitute<R: Rng + ?Sized>(
        &self,
        input: &str,
        resources: &ResolvedResources,
        config: &TransformationConfig,
        rng: &mut R,
    ) -> String {
        let segments: Vec<&str> = input.split_word_bounds().collect();

        let mut quotes = QuoteState::new();
        let protected: Vec<bool> = segments
            .iter()
            .map(|segment| quotes.observe_token(segment) && config.ignore_quotes)
            .collect();

        let word_count = segments
            .iter()
            .filter(|s| s.chars().any(char::is_alphanumeric))
            .count();
        let eligible: Vec<usize> = segments
            .iter()
            .enumerate()
            .filter(|(_, segment)| Self::is_eligible(segment))
            .map(|(i, _)| i)
            .collect();

        let target =
            ((word_count as f64 * config.percent_synonyms as f64 / 100.0).round() as usize).min(eligible.len());
        let mut selected = vec![false; segments.len()];
        for pick in index::sample(rng, eligible.len(), target) {
            selected[eligible[pick]] = true;
        }

        let mut output = String::with_capacity(input.len() + 16);
        let mut replaced = 0usize;
        let mut emphasized = 0usize;

        for (i, segment) in segments.iter().enumerate() {
            if protected[i] {
                output.push_str(segment);
                continue;
            }

            let mut word = segment.to_string();
            if selected[i]
                && let Some(candidates) = resources.synonyms.get(segment)
                && let Some(choice) = candidates.choose(rng)
            {
                word = if text::starts_uppercase(segment) {
                    text::capitalize_first(choice)
                } else {
                    choice.clone()
                };
                replaced += 1;
            }

            if Self::is_eligible(&word)
                && resources.adjectives.contains(&word)
                && roll(rng, config.percent_adjectives)
            {
                let (emphasis, adjective) = emphasis::emphasize(emphasis::choose_emphasis(rng), &word);
                output.push_str(&emphasis);
                output.push(' ');
                output.push_str(&adjective);
                emphasized += 1;
                continue;
            }

            output.push_str(&word);
        }

        debug!("Basic pass: {replaced} replaced, {emphasized} emphasized of {word_count} words");
        output
    }
}
