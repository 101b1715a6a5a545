//! Active/passive voice detection and conversion over tagged tokens.
//!
//! Both conversions are heuristic. They never attempt agreement beyond the
//! `is`/`was` choice and give up (returning `None`) whenever the pieces they
//! need cannot be found.

use crate::analysis::pos;
use crate::analysis::token::Token;
use crate::transform::structure::verbs::VerbTable;
use crate::util::text;

/// Forms of "be" that open a passive construction.
pub const BE_FORMS: &[&str] = &["is", "are", "was", "were", "be", "been", "being", "am"];

/// Auxiliary forms never taken as the main verb of an active clause.
const AUXILIARIES: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "am", "have", "has", "had", "do", "does",
    "did",
];

/// Tokens that end an agent phrase.
const AGENT_TERMINALS: &[&str] = &[",", ".", "!", "?", ";"];

/// Nominative ↔ accusative pronoun pairs.
const PRONOUN_CASES: &[(&str, &str)] = &[
    ("i", "me"),
    ("he", "him"),
    ("she", "her"),
    ("we", "us"),
    ("they", "them"),
];

/// Positions of a detected passive construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassiveMatch {
    pub be_index: usize,
    pub participle_index: usize,
    /// Index of the first `by` after the participle, if any.
    pub by_index: Option<usize>,
}

fn is_be_form(word: &str) -> bool {
    BE_FORMS.contains(&word.to_lowercase().as_str())
}

/// Find the first be-form immediately followed by a past participle.
pub fn detect_passive(tokens: &[Token]) -> Option<PassiveMatch> {
    let be_index = tokens
        .windows(2)
        .position(|pair| is_be_form(&pair[0].text) && pos::is_past_participle(pair[1].tag()))?;
    let participle_index = be_index + 1;
    let by_index = tokens[participle_index + 1..]
        .iter()
        .position(|t| t.text.eq_ignore_ascii_case("by"))
        .map(|offset| participle_index + 1 + offset);

    Some(PassiveMatch {
        be_index,
        participle_index,
        by_index,
    })
}

/// Switch a pronoun to its accusative form; other words pass through.
fn to_accusative(word: &str) -> String {
    let lower = word.to_lowercase();
    match PRONOUN_CASES.iter().find(|(nominative, _)| *nominative == lower) {
        Some((_, accusative)) => accusative.to_string(),
        None => word.to_string(),
    }
}

/// Switch a pronoun to its nominative form; other words pass through.
fn to_nominative(word: &str) -> String {
    let lower = word.to_lowercase();
    match PRONOUN_CASES.iter().find(|(_, accusative)| *accusative == lower) {
        Some((nominative, _)) => nominative.to_string(),
        None => word.to_string(),
    }
}

/// Surface words of a phrase that is leaving subject position.
///
/// The leading capital is dropped unless the phrase starts with a proper noun
/// or `I`, and a pronoun head takes its accusative form.
fn demote(phrase: &[Token]) -> Vec<String> {
    phrase
        .iter()
        .enumerate()
        .map(|(i, token)| {
            if i > 0 {
                return token.text.clone();
            }
            if pos::is_pronoun(token.tag()) {
                text::decapitalize_first(&to_accusative(&token.text))
            } else if pos::is_proper_noun(token.tag()) || token.text == "I" {
                token.text.clone()
            } else {
                text::decapitalize_first(&token.text)
            }
        })
        .collect()
}

/// Surface words of a phrase that is moving into subject position.
fn promote(phrase: &[Token]) -> Vec<String> {
    phrase
        .iter()
        .enumerate()
        .map(|(i, token)| {
            if i == 0 && pos::is_pronoun(token.tag()) {
                to_nominative(&token.text)
            } else {
                token.text.clone()
            }
        })
        .collect()
}

fn assemble(mut words: Vec<String>) -> String {
    if let Some(first) = words.first_mut() {
        *first = text::capitalize_first(first);
    }
    text::join_tokens(&words)
}

/// `The ball was thrown by John.` → `John threw the ball.`
///
/// Requires an explicit `by` agent; without one the sentence is left alone.
pub fn passive_to_active(tokens: &[Token], verbs: &VerbTable) -> Option<String> {
    let found = detect_passive(tokens)?;
    let by_index = found.by_index?;

    let agent_end = tokens[by_index + 1..]
        .iter()
        .position(|t| AGENT_TERMINALS.contains(&t.text.as_str()))
        .map_or(tokens.len(), |offset| by_index + 1 + offset);

    let subject = &tokens[..found.be_index];
    let middle = &tokens[found.participle_index + 1..by_index];
    let agent = &tokens[by_index + 1..agent_end];
    let remainder = &tokens[agent_end..];
    if agent.is_empty() {
        return None;
    }

    let mut words = promote(agent);
    words.push(verbs.past_tense(&tokens[found.participle_index].text.to_lowercase()));
    words.extend(demote(subject));
    words.extend(middle.iter().map(|t| t.text.clone()));
    words.extend(remainder.iter().map(|t| t.text.clone()));

    Some(assemble(words))
}

/// `John threw the ball.` → `The ball was thrown by John.`
pub fn active_to_passive(tokens: &[Token], verbs: &VerbTable) -> Option<String> {
    let verb_index = tokens.iter().enumerate().skip(1).find_map(|(i, t)| {
        (pos::is_finite_verb(t.tag()) && !AUXILIARIES.contains(&t.lower().as_str())).then_some(i)
    })?;

    let head = tokens[verb_index + 1..]
        .iter()
        .position(|t| pos::is_noun(t.tag()) || pos::is_pronoun(t.tag()))
        .map(|offset| verb_index + 1 + offset)?;
    let object_end = tokens[head + 1..]
        .iter()
        .position(|t| !pos::continues_noun_phrase(t.tag()))
        .map_or(tokens.len(), |offset| head + 1 + offset);

    let subject = &tokens[..verb_index];
    let verb = &tokens[verb_index];
    let object = &tokens[verb_index + 1..object_end];

    let mut remainder = &tokens[object_end..];
    let mut ending = None;
    if let Some((last, rest)) = remainder.split_last()
        && last.text.starts_with(text::SENTENCE_TERMINALS)
    {
        ending = Some(last.text.clone());
        remainder = rest;
    }

    let be_verb = if pos::is_present_tense(verb.tag()) {
        "is"
    } else {
        "was"
    };

    let mut words = promote(object);
    words.push(be_verb.to_string());
    words.push(verbs.participle(&verb.lower()));
    words.extend(remainder.iter().map(|t| t.text.clone()));
    words.push("by".to_string());
    words.extend(demote(subject));
    words.extend(ending);

    Some(assemble(words))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::oracle::{LexiconOracle, NlpOracle};

    fn analyze(text: &str) -> Vec<Token> {
        LexiconOracle::bundled().unwrap().analyze(text).unwrap()
    }

    #[test]
    fn test_detect_passive() {
        let found = detect_passive(&analyze("The ball was thrown by John.")).unwrap();
        assert_eq!(found.be_index, 2);
        assert_eq!(found.participle_index, 3);
        assert_eq!(found.by_index, Some(4));

        let found = detect_passive(&analyze("The cake was eaten.")).unwrap();
        assert_eq!(found.by_index, None);

        assert!(detect_passive(&analyze("John threw the ball.")).is_none());
    }

    #[test]
    fn test_passive_to_active() {
        let verbs = VerbTable::default();
        assert_eq!(
            passive_to_active(&analyze("The ball was thrown by John."), &verbs).as_deref(),
            Some("John threw the ball.")
        );
        assert_eq!(
            passive_to_active(&analyze("The letter was written by her."), &verbs).as_deref(),
            Some("She wrote the letter.")
        );
    }

    #[test]
    fn test_passive_without_agent_is_unchanged() {
        let verbs = VerbTable::default();
        assert!(passive_to_active(&analyze("The cake was eaten."), &verbs).is_none());
    }

    #[test]
    fn test_active_to_passive() {
        let verbs = VerbTable::default();
        assert_eq!(
            active_to_passive(&analyze("John threw the ball."), &verbs).as_deref(),
            Some("The ball was thrown by John.")
        );
        assert_eq!(
            active_to_passive(&analyze("They kick the ball."), &verbs).as_deref(),
            Some("The ball is kicked by them.")
        );
        assert_eq!(
            active_to_passive(&analyze("He threw it."), &verbs).as_deref(),
            Some("It was thrown by him.")
        );
    }

    #[test]
    fn test_active_to_passive_needs_object() {
        let verbs = VerbTable::default();
        assert!(active_to_passive(&analyze("He is very happy."), &verbs).is_none());
        assert!(active_to_passive(&analyze("Run!"), &verbs).is_none());
    }

    #[test]
    fn test_regular_past_tense() {
        let verbs = VerbTable::default();
        assert_eq!(
            active_to_passive(&analyze("Tom kicked the ball."), &verbs).as_deref(),
            Some("The ball was kicked by Tom.")
        );
    }

    #[test]
    fn test_subject_pronoun_is_demoted() {
        let verbs = VerbTable::default();
        assert_eq!(
            passive_to_active(&analyze("It was taken by the dog."), &verbs).as_deref(),
            Some("The dog took it.")
        );
    }
}
