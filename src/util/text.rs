//! Text helpers shared by the tokenizer and the transformation engines.
//!
//! The reassembly rule used everywhere tokens are turned back into text lives
//! here: tokens are joined with a single space, except that no space is placed
//! before closing punctuation (`. , ! ? ; : ) ' "`) and none after an opening
//! bracket or an opening double quote.

use std::sync::LazyLock;

use regex::Regex;

/// Characters that never take a space in front of them.
pub const CLOSING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', ')', '\'', '"'];

/// Characters that end a sentence.
pub const SENTENCE_TERMINALS: &[char] = &['.', '!', '?'];

static PUNCTUATION_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\W*)(\w+)(\W*)$").expect("punctuation pattern is valid"));

/// Split a surface token into `(prefix_punct, core_word, suffix_punct)`.
///
/// Leading and trailing non-word characters are punctuation and the interior is
/// the word. Tokens that do not fit that shape (for example `don't`) come back
/// whole as the core word.
pub fn split_punctuation(token: &str) -> (&str, &str, &str) {
    match PUNCTUATION_SPLIT.captures(token) {
        Some(caps) => {
            let prefix = caps.get(1).map_or("", |m| m.as_str());
            let word = caps.get(2).map_or("", |m| m.as_str());
            let suffix = caps.get(3).map_or("", |m| m.as_str());
            (prefix, word, suffix)
        }
        None => ("", token, ""),
    }
}

/// Join tokens back into text using the reassembly spacing rule.
pub fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut out = String::new();
    let mut quotes_seen = 0usize;
    let mut suppress_next_space = false;

    for (i, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        if token.is_empty() {
            continue;
        }

        let opens_quote = token.starts_with('"') && quotes_seen % 2 == 0;
        if i > 0 && !out.is_empty() && !suppress_next_space {
            let closing = token.starts_with(CLOSING_PUNCTUATION);
            if !closing || opens_quote {
                out.push(' ');
            }
        }
        out.push_str(token);

        quotes_seen += token.matches('"').count();
        suppress_next_space = token == "(" || (token == "\"" && quotes_seen % 2 == 1);
    }

    out
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character, leaving the rest untouched.
pub fn decapitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn starts_uppercase(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_uppercase)
}

/// True when the string has cased characters and none of them is lowercase.
pub fn is_all_caps(s: &str) -> bool {
    s.chars().any(|c| c.is_uppercase()) && !s.chars().any(|c| c.is_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_punctuation() {
        assert_eq!(split_punctuation("(hello),"), ("(", "hello", "),"));
        assert_eq!(split_punctuation("world"), ("", "world", ""));
        assert_eq!(split_punctuation("\"quoted\""), ("\"", "quoted", "\""));
        assert_eq!(split_punctuation("don't"), ("", "don't", ""));
        assert_eq!(split_punctuation("..."), ("", "...", ""));
    }

    #[test]
    fn test_join_tokens_spacing() {
        assert_eq!(join_tokens(&["Hello", ",", "world", "."]), "Hello, world.");
        assert_eq!(join_tokens(&["Wait", "!", "Really", "?"]), "Wait! Really?");
        assert_eq!(join_tokens(&["a", "(", "b", ")", "c"]), "a (b) c");
    }

    #[test]
    fn test_join_tokens_quotes() {
        let tokens = ["He", "said", "\"", "this", "is", "correct", "\"", "loudly", "."];
        assert_eq!(join_tokens(&tokens), "He said \"this is correct\" loudly.");
    }

    #[test]
    fn test_join_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(join_tokens(&empty), "");
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(capitalize_first("ball"), "Ball");
        assert_eq!(decapitalize_first("The"), "the");
        assert_eq!(capitalize_first(""), "");
        assert!(is_all_caps("NASA"));
        assert!(is_all_caps("U.S."));
        assert!(!is_all_caps("Nasa"));
        assert!(!is_all_caps("..."));
        assert!(starts_uppercase("John"));
        assert!(!starts_uppercase("john"));
    }
}
