//! Sentence boundary detection.
//!
//! A boundary is placed after a run of `.`, `!` or `?` (plus any closing quotes
//! or brackets that follow it) when the next non-space character could start a
//! sentence. Periods that end a known abbreviation or a single-letter initial
//! do not end a sentence.

use ahash::AHashSet;

/// Abbreviations whose trailing period is not a sentence boundary.
const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "inc", "ltd",
    "co", "corp", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov",
    "dec", "no", "fig", "approx", "dept", "est", "gen", "gov", "lt", "mt", "rev", "u.s",
];

const CLOSERS: &[char] = &['"', '\'', ')', ']', '’', '”'];
const OPENERS: &[char] = &['"', '\'', '(', '[', '‘', '“'];

/// Splits text into sentences.
#[derive(Clone, Debug)]
pub struct SentenceSplitter {
    abbreviations: AHashSet<String>,
}

impl SentenceSplitter {
    /// Create a splitter with the default English abbreviation list.
    pub fn new() -> Self {
        SentenceSplitter {
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Add abbreviations (without their final period).
    pub fn with_abbreviations<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abbreviations
            .extend(abbreviations.into_iter().map(|s| s.into().to_lowercase()));
        self
    }

    /// Split `text` into trimmed, non-empty sentences.
    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0usize;
        let mut i = 0usize;

        while i < chars.len() {
            let (_, c) = chars[i];
            if !matches!(c, '.' | '!' | '?') {
                i += 1;
                continue;
            }

            let run_start = i;
            while i < chars.len() && matches!(chars[i].1, '.' | '!' | '?') {
                i += 1;
            }
            let single_period = i - run_start == 1 && c == '.';
            while i < chars.len() && CLOSERS.contains(&chars[i].1) {
                i += 1;
            }

            let end = chars.get(i).map_or(text.len(), |(offset, _)| *offset);
            if i < chars.len() && !chars[i].1.is_whitespace() {
                continue;
            }

            let mut next = i;
            while next < chars.len() && chars[next].1.is_whitespace() {
                next += 1;
            }
            let starts_sentence = next >= chars.len() || {
                let n = chars[next].1;
                n.is_uppercase() || n.is_ascii_digit() || OPENERS.contains(&n)
            };

            if !starts_sentence {
                continue;
            }
            if single_period && self.is_abbreviation(&text[start..chars[run_start].0]) {
                continue;
            }

            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }

        push_trimmed(&mut sentences, &text[start..]);
        sentences
    }

    fn is_abbreviation(&self, before_period: &str) -> bool {
        let word: String = before_period
            .chars()
            .rev()
            .take_while(|c| c.is_alphabetic() || *c == '.')
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();

        if word.is_empty() {
            return false;
        }
        let mut letters = word.chars();
        if let (Some(first), None) = (letters.next(), letters.next())
            && first.is_uppercase()
        {
            return true;
        }
        self.abbreviations.contains(&word.to_lowercase())
    }
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_trimmed(sentences: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}
