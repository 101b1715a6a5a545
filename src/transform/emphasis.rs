//! Emphasis words before adjectives: insertion and removal.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::analysis::pos;
use crate::analysis::token::Token;
use crate::lexicon::words::AdjectiveSet;
use crate::transform::quote::QuoteState;
use crate::transform::roll;
use crate::util::text;

/// The closed vocabulary of intensifiers.
pub const EMPHASIS_WORDS: &[&str] = &["very", "really", "extremely", "quite", "so", "incredibly"];

pub fn is_emphasis_word(word: &str) -> bool {
    EMPHASIS_WORDS.contains(&word.to_lowercase().as_str())
}

/// Pick an emphasis word uniformly at random.
pub fn choose_emphasis<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    EMPHASIS_WORDS.choose(rng).copied().unwrap_or("very")
}

/// Put `emphasis` in front of `word`, moving a leading capital to the
/// emphasis word. Returns the two new tokens.
pub fn emphasize(emphasis: &str, word: &str) -> (String, String) {
    if text::starts_uppercase(word) && !text::is_all_caps(word) {
        (text::capitalize_first(emphasis), text::decapitalize_first(word))
    } else {
        (emphasis.to_string(), word.to_string())
    }
}

/// The emphasis pass over freshly tagged tokens.
///
/// Left to right: an emphasis word directly before an adjective is dropped
/// with probability `percent`; otherwise an adjective from `adjectives` gets
/// a random emphasis word in front of it with the same probability. A token
/// consumed by a removal is not considered for insertion. Returns the output
/// token texts and whether anything changed.
pub fn emphasis_pass<R: Rng + ?Sized>(
    tokens: &[Token],
    adjectives: &AdjectiveSet,
    percent: u8,
    ignore_quotes: bool,
    rng: &mut R,
) -> (Vec<String>, bool) {
    let mut output = Vec::with_capacity(tokens.len() + 4);
    let mut quotes = QuoteState::new();
    let mut changed = false;
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        let quoted = quotes.observe_token(&token.text);
        if quoted && ignore_quotes {
            output.push(token.text.clone());
            i += 1;
            continue;
        }

        let (_, word, _) = text::split_punctuation(&token.text);

        if is_emphasis_word(word)
            && let Some(next) = tokens.get(i + 1)
            && pos::is_adjective(next.tag())
            && roll(rng, percent)
        {
            let adjective = if text::starts_uppercase(&token.text) {
                text::capitalize_first(&next.text)
            } else {
                next.text.clone()
            };
            output.push(adjective);
            changed = true;
            i += 2;
            continue;
        }

        if pos::is_adjective(token.tag()) && adjectives.contains(word) && roll(rng, percent) {
            let (emphasis, adjective) = emphasize(choose_emphasis(rng), &token.text);
            output.push(emphasis);
            output.push(adjective);
            changed = true;
            i += 1;
            continue;
        }

        output.push(token.text.clone());
        i += 1;
    }

    (output, changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn tagged(pairs: &[(&str, &str)]) -> Vec<Token> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, (text, tag))| Token::new(*text, i).with_tag(*tag))
            .collect()
    }

    #[test]
    fn test_emphasize_moves_capital() {
        assert_eq!(emphasize("very", "Happy"), ("Very".to_string(), "happy".to_string()));
        assert_eq!(emphasize("so", "happy"), ("so".to_string(), "happy".to_string()));
    }

    #[test]
    fn test_removal_at_full_probability() {
        let tokens = tagged(&[("He", "PRP"), ("is", "VBZ"), ("very", "RB"), ("happy", "JJ"), (".", ".")]);
        let adjectives = AdjectiveSet::from_words(["happy"]);
        let mut rng = StdRng::seed_from_u64(7);

        let (output, changed) = emphasis_pass(&tokens, &adjectives, 100, true, &mut rng);
        assert!(changed);
        assert_eq!(output, vec!["He", "is", "happy", "."]);
    }

    #[test]
    fn test_insertion_at_full_probability() {
        let tokens = tagged(&[("A", "DT"), ("happy", "JJ"), ("dog", "NN")]);
        let adjectives = AdjectiveSet::from_words(["happy"]);
        let mut rng = StdRng::seed_from_u64(7);

        let (output, _) = emphasis_pass(&tokens, &adjectives, 100, true, &mut rng);
        assert_eq!(output.len(), 4);
        assert!(is_emphasis_word(&output[1]));
        assert_eq!(output[2], "happy");
    }

    #[test]
    fn test_zero_probability_and_quotes() {
        let tokens = tagged(&[("\"", "''"), ("happy", "JJ"), ("\"", "''"), ("sad", "JJ")]);
        let adjectives = AdjectiveSet::from_words(["happy", "sad"]);
        let mut rng = StdRng::seed_from_u64(1);

        let (output, changed) = emphasis_pass(&tokens, &adjectives, 0, true, &mut rng);
        assert!(!changed);
        assert_eq!(output, vec!["\"", "happy", "\"", "sad"]);

        let (output, _) = emphasis_pass(&tokens, &adjectives, 100, true, &mut rng);
        assert_eq!(&output[..3], &["\"", "happy", "\""]);
        assert_eq!(output.len(), 5);
    }
}
