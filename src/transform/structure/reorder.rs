//! Compound-sentence clause reordering.

use rand::Rng;

use crate::transform::chance;
use crate::util::text;

/// Clause delimiters in priority order: the first one in this list that
/// occurs anywhere in the sentence wins, regardless of position.
pub const CONJUNCTIONS: &[&str] = &[
    ", and ",
    ", but ",
    ", or ",
    ", yet ",
    ", so ",
    ", nor ",
    "; however, ",
    "; moreover, ",
    "; therefore, ",
];

/// Split a sentence at the highest-priority delimiter it contains.
///
/// Returns `(clause1, delimiter, clause2)` with the delimiter normalized to its
/// listed form. Matching ignores ASCII case.
pub fn split_compound(sentence: &str) -> Option<(&str, &'static str, &str)> {
    let lower = sentence.to_ascii_lowercase();
    CONJUNCTIONS.iter().find_map(|conjunction| {
        let at = lower.find(conjunction)?;
        Some((
            &sentence[..at],
            *conjunction,
            &sentence[at + conjunction.len()..],
        ))
    })
}

/// Swap the clauses of a compound sentence with probability 0.5.
///
/// The clause moved to the front is capitalized, the one moved to the back
/// loses its leading capital unless it starts with `I` or a proper noun, and
/// the final `.`, `!` or `?` stays at the very end. `None` means the sentence
/// is unchanged.
pub fn reorder<R: Rng + ?Sized>(
    sentence: &str,
    starts_with_proper_noun: bool,
    rng: &mut R,
) -> Option<String> {
    let (clause1, conjunction, clause2) = split_compound(sentence)?;

    let (clause2, ending) = match clause2.trim_end().char_indices().last() {
        Some((at, c)) if text::SENTENCE_TERMINALS.contains(&c) => {
            (&clause2.trim_end()[..at], c.to_string())
        }
        _ => (clause2.trim_end(), String::new()),
    };

    let clause1 = clause1.trim();
    let clause2 = clause2.trim();
    if clause1.is_empty() || clause2.is_empty() {
        return None;
    }

    if !chance(rng, 0.5) {
        return None;
    }

    let first_word = clause1.split_whitespace().next().unwrap_or("");
    let moved = if starts_with_proper_noun || first_word == "I" || first_word.starts_with("I'") {
        clause1.to_string()
    } else {
        text::decapitalize_first(clause1)
    };

    Some(format!(
        "{}{conjunction}{moved}{ending}",
        text::capitalize_first(clause2)
    ))
}
