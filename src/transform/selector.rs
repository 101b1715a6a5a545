//! Synonym selection: part-of-speech filtering and contextual ranking.
//!
//! # Examples
//!
//! ```
//! use rephrase::transform::selector::rank;
//!
//! let candidates = vec!["enormous".to_string(), "large".to_string(), "huge".to_string()];
//! // "huge" and "large" are close in length to "big"; "huge" is shorter than "large".
//! assert_eq!(rank("big", &candidates), vec!["huge", "large", "enormous"]);
//! ```

use crate::analysis::oracle::NlpOracle;
use crate::analysis::pos::{self, CoarsePos};
use crate::analysis::token::Token;
use crate::util::text;

/// Whether a word is never replaced: proper nouns, acronyms and short words.
pub fn should_skip(word: &str, tag: &str) -> bool {
    let len = word.chars().count();
    pos::is_proper_noun(tag) || (text::is_all_caps(word) && len > 1) || len <= 2
}

/// Indices of tokens that may be replaced.
pub fn eligible_indices(tokens: &[Token]) -> Vec<usize> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| !should_skip(&token.text, token.tag()))
        .map(|(i, _)| i)
        .collect()
}

/// Score of a candidate against the original word.
pub fn score(word: &str, candidate: &str) -> usize {
    let word_len = word.chars().count();
    let candidate_len = candidate.chars().count();

    let mut score = 10usize.saturating_sub(word_len.abs_diff(candidate_len));

    let first = |s: &str| s.chars().next().map(|c| c.to_lowercase().collect::<String>());
    if first(word).is_some() && first(word) == first(candidate) {
        score += 2;
    }
    if candidate_len < word_len {
        score += 1;
    }
    score
}

/// Rank candidates by descending score; equal scores keep their input order.
pub fn rank(word: &str, candidates: &[String]) -> Vec<String> {
    let mut scored: Vec<(usize, &String)> = candidates
        .iter()
        .map(|candidate| (score(word, candidate), candidate))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, c)| c.clone()).collect()
}

/// Filters and ranks synonym candidates using the NLP oracle's sense lookups.
pub struct SynonymSelector<'a> {
    oracle: &'a dyn NlpOracle,
}

impl<'a> SynonymSelector<'a> {
    pub fn new(oracle: &'a dyn NlpOracle) -> Self {
        SynonymSelector { oracle }
    }

    /// Keep candidates that have a sense of the tag's coarse class.
    ///
    /// Tags without a coarse class pass every candidate through, and when no
    /// candidate survives the unfiltered list is returned.
    pub fn filter_by_pos(&self, candidates: &[String], tag: &str) -> Vec<String> {
        let Some(coarse) = CoarsePos::from_tag(tag) else {
            return candidates.to_vec();
        };

        let filtered: Vec<String> = candidates
            .iter()
            .filter(|candidate| self.oracle.has_sense(&candidate.to_lowercase(), coarse))
            .cloned()
            .collect();

        if filtered.is_empty() {
            candidates.to_vec()
        } else {
            filtered
        }
    }

    /// The ranked preference list for `word`.
    pub fn select(
        &self,
        word: &str,
        tag: &str,
        candidates: &[String],
        use_pos_filter: bool,
    ) -> Vec<String> {
        if candidates.is_empty() {
            return Vec::new();
        }
        let pool = if use_pos_filter {
            self.filter_by_pos(candidates, tag)
        } else {
            candidates.to_vec()
        };
        rank(word, &pool)
    }
}
