//! Participle ↔ past-tense lookup for voice conversion.
//!
//! The table is closed. Unlisted verbs keep their form when going
//! passive → active, and take a plain `-ed` going active → passive (no
//! consonant doubling or `e` dropping). Regular past forms already ending in
//! `-ed` are their own participle.

use ahash::AHashMap;

use crate::util::text;

/// Default `(participle, past tense)` pairs.
const DEFAULT_PAIRS: &[(&str, &str)] = &[
    ("thrown", "threw"),
    ("written", "wrote"),
    ("taken", "took"),
    ("given", "gave"),
    ("made", "made"),
    ("seen", "saw"),
    ("done", "did"),
    ("gone", "went"),
    ("eaten", "ate"),
    ("driven", "drove"),
    ("broken", "broke"),
    ("spoken", "spoke"),
    ("chosen", "chose"),
    ("known", "knew"),
    ("grown", "grew"),
    ("shown", "showed"),
    ("bought", "bought"),
    ("taught", "taught"),
    ("caught", "caught"),
    ("brought", "brought"),
    ("thought", "thought"),
    ("fought", "fought"),
    ("built", "built"),
    ("sent", "sent"),
    ("spent", "spent"),
    ("lost", "lost"),
    ("found", "found"),
    ("held", "held"),
    ("told", "told"),
    ("sold", "sold"),
];

/// A pluggable participle/past-tense table.
#[derive(Clone, Debug)]
pub struct VerbTable {
    to_past: AHashMap<String, String>,
    to_participle: AHashMap<String, String>,
}

impl Default for VerbTable {
    fn default() -> Self {
        DEFAULT_PAIRS
            .iter()
            .fold(Self::empty(), |table, (participle, past)| {
                table.with_pair(participle, past)
            })
    }
}

impl VerbTable {
    /// A table with no entries: every conversion uses the fallback.
    pub fn empty() -> Self {
        VerbTable {
            to_past: AHashMap::new(),
            to_participle: AHashMap::new(),
        }
    }

    /// Add or replace a `(participle, past tense)` pair.
    pub fn with_pair(mut self, participle: &str, past: &str) -> Self {
        let participle = participle.to_lowercase();
        let past = past.to_lowercase();
        self.to_past.insert(participle.clone(), past.clone());
        self.to_participle.insert(past, participle);
        self
    }

    /// Past tense of a participle; unlisted participles are returned as is.
    pub fn past_tense(&self, participle: &str) -> String {
        match self.to_past.get(&participle.to_lowercase()) {
            Some(past) => match_case(participle, past),
            None => participle.to_string(),
        }
    }

    /// Participle of a finite verb; unlisted verbs get `-ed`.
    pub fn participle(&self, verb: &str) -> String {
        let lower = verb.to_lowercase();
        match self.to_participle.get(&lower) {
            Some(participle) => match_case(verb, participle),
            None if lower.ends_with("ed") => verb.to_string(),
            None => format!("{verb}ed"),
        }
    }

    pub fn len(&self) -> usize {
        self.to_past.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_past.is_empty()
    }
}

fn match_case(original: &str, replacement: &str) -> String {
    if text::starts_uppercase(original) {
        text::capitalize_first(replacement)
    } else {
        replacement.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = VerbTable::default();
        assert_eq!(table.len(), 30);
        assert_eq!(table.past_tense("thrown"), "threw");
        assert_eq!(table.past_tense("Written"), "Wrote");
        assert_eq!(table.participle("threw"), "thrown");
        assert_eq!(table.participle("bought"), "bought");
    }

    #[test]
    fn test_fallbacks() {
        let table = VerbTable::default();
        assert_eq!(table.past_tense("baked"), "baked");
        assert_eq!(table.participle("kick"), "kicked");
        assert_eq!(table.participle("kicked"), "kicked");
        assert_eq!(table.participle("stop"), "stoped");
    }

    #[test]
    fn test_pluggable_pairs() {
        let table = VerbTable::empty().with_pair("sung", "sang");
        assert_eq!(table.past_tense("sung"), "sang");
        assert_eq!(table.participle("sang"), "sung");
        assert_eq!(table.participle("threw"), "threwed");
    }
}
