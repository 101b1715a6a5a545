//! Sentence-beginning variation: transition phrases and adverb fronting.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::analysis::pos;
use crate::analysis::token::Token;
use crate::transform::chance;
use crate::util::text;

/// Sentences shorter than this many tokens are left alone.
pub const MIN_TOKENS: usize = 4;

/// Adverbs that never move to the front.
const ADVERB_STOPLIST: &[&str] = &["not", "n't", "very", "too", "so"];

/// Transition phrases grouped by rhetorical category.
pub const TRANSITIONS: &[(&str, &[&str])] = &[
    (
        "addition",
        &["Furthermore", "Moreover", "Additionally", "Also", "Besides"],
    ),
    (
        "contrast",
        &["However", "Nevertheless", "Nonetheless", "Conversely", "In contrast"],
    ),
    (
        "result",
        &["Therefore", "Thus", "Consequently", "As a result", "Hence"],
    ),
    (
        "example",
        &["For instance", "For example", "Specifically", "In particular"],
    ),
    (
        "time",
        &["Meanwhile", "Subsequently", "Previously", "Initially"],
    ),
    (
        "emphasis",
        &["Indeed", "Certainly", "Undoubtedly", "Clearly"],
    ),
];

/// Pick a category uniformly, then a phrase within it.
pub fn choose_transition<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    TRANSITIONS
        .choose(rng)
        .and_then(|(_, phrases)| phrases.choose(rng))
        .copied()
        .unwrap_or("Moreover")
}

fn keeps_capital(token: &Token) -> bool {
    pos::is_proper_noun(token.tag()) || token.text == "I" || token.text.starts_with("I'")
}

/// Vary how a sentence opens.
///
/// `tokens` must be the analysis of `sentence` (offsets index into it). A
/// sentence opening with a noun or pronoun gets a transition phrase with
/// probability 0.3; when that does not happen, the first qualifying adverb
/// after position 0 is fronted with probability 0.4. `None` means unchanged.
pub fn vary_beginning<R: Rng + ?Sized>(
    sentence: &str,
    tokens: &[Token],
    rng: &mut R,
) -> Option<String> {
    if tokens.len() < MIN_TOKENS {
        return None;
    }
    let first = &tokens[0];

    if (pos::is_noun(first.tag()) || first.tag() == "PRP") && chance(rng, 0.3) {
        let transition = choose_transition(rng);
        let opening = if keeps_capital(first) {
            first.text.clone()
        } else {
            text::decapitalize_first(&first.text)
        };
        let rest = sentence.get(first.end_offset..).unwrap_or("");
        return Some(format!("{transition}, {opening}{rest}"));
    }

    front_adverb(tokens, rng)
}

/// Move the first non-stoplisted adverb to the front of the sentence.
fn front_adverb<R: Rng + ?Sized>(tokens: &[Token], rng: &mut R) -> Option<String> {
    let index = tokens.iter().enumerate().skip(1).find_map(|(i, t)| {
        (pos::is_plain_adverb(t.tag()) && !ADVERB_STOPLIST.contains(&t.lower().as_str()))
            .then_some(i)
    })?;
    if !chance(rng, 0.4) {
        return None;
    }

    // "The plan, however, failed": drop the comma left dangling after the adverb.
    let between_commas =
        tokens[index - 1].text == "," && tokens.get(index + 1).is_some_and(|t| t.text == ",");

    let mut words = vec![text::capitalize_first(&tokens[index].text), ",".to_string()];
    for (i, token) in tokens.iter().enumerate() {
        if i == index || (between_commas && i == index + 1) {
            continue;
        }
        if i == 0 && !keeps_capital(token) {
            words.push(text::decapitalize_first(&token.text));
        } else {
            words.push(token.text.clone());
        }
    }

    Some(text::join_tokens(&words))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::oracle::{LexiconOracle, NlpOracle};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn analyze(text: &str) -> Vec<Token> {
        LexiconOracle::bundled().unwrap().analyze(text).unwrap()
    }

    fn first_change(sentence: &str) -> String {
        let tokens = analyze(sentence);
        (0..64)
            .find_map(|seed| vary_beginning(sentence, &tokens, &mut StdRng::seed_from_u64(seed)))
            .unwrap()
    }

    #[test]
    fn test_short_sentences_unchanged() {
        let tokens = analyze("Dogs bark.");
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(vary_beginning("Dogs bark.", &tokens, &mut rng).is_none());
        }
    }

    #[test]
    fn test_transition_prefix() {
        let output = first_change("He finished the report on time.");
        let (transition, rest) = output.split_once(", ").unwrap();
        assert!(
            TRANSITIONS
                .iter()
                .any(|(_, phrases)| phrases.contains(&transition))
        );
        assert_eq!(rest, "he finished the report on time.");
    }

    #[test]
    fn test_transition_keeps_proper_noun() {
        let output = first_change("John finished the report on time.");
        assert!(output.ends_with(", John finished the report on time."));
    }

    #[test]
    fn test_adverb_fronting() {
        let output = first_change("The cat quickly ran home.");
        assert_eq!(output, "Quickly, the cat ran home.");
    }

    #[test]
    fn test_stoplisted_adverbs_stay() {
        let sentence = "The cat is not very happy.";
        let tokens = analyze(sentence);
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(vary_beginning(sentence, &tokens, &mut rng).is_none());
        }
    }
}
