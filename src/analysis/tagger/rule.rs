//! Rule-based Penn-Treebank tagger.
//!
//! Tags are decided per token, left to right, from (in order): punctuation and
//! number shapes, a closed-class lexicon, contractions, capitalisation, an
//! irregular-verb table, the word lexicon, plural/third-person stems, suffix
//! rules and finally left context. Only the previous tokens are consulted, so
//! tagging is a single pass.

use std::fs;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use ahash::AHashMap;

use crate::analysis::pos;
use crate::analysis::tagger::Tagger;
use crate::analysis::token::Token;
use crate::error::{RephraseError, Result};

/// Bundled word → tag lexicon.
pub const BUNDLED_LEXICON: &str = include_str!("../../../resources/lexicon/tagger.json");

const CLOSED_CLASS: &[(&str, &str)] = &[
    // Determiners
    ("the", "DT"),
    ("a", "DT"),
    ("an", "DT"),
    ("this", "DT"),
    ("that", "DT"),
    ("these", "DT"),
    ("those", "DT"),
    ("each", "DT"),
    ("every", "DT"),
    ("some", "DT"),
    ("any", "DT"),
    ("no", "DT"),
    ("all", "DT"),
    ("both", "DT"),
    ("either", "DT"),
    ("neither", "DT"),
    ("another", "DT"),
    // Prepositions and subordinators
    ("in", "IN"),
    ("on", "IN"),
    ("at", "IN"),
    ("by", "IN"),
    ("for", "IN"),
    ("with", "IN"),
    ("about", "IN"),
    ("against", "IN"),
    ("between", "IN"),
    ("into", "IN"),
    ("through", "IN"),
    ("during", "IN"),
    ("before", "IN"),
    ("after", "IN"),
    ("above", "IN"),
    ("below", "IN"),
    ("from", "IN"),
    ("of", "IN"),
    ("off", "IN"),
    ("over", "IN"),
    ("under", "IN"),
    ("than", "IN"),
    ("since", "IN"),
    ("until", "IN"),
    ("upon", "IN"),
    ("within", "IN"),
    ("without", "IN"),
    ("across", "IN"),
    ("along", "IN"),
    ("among", "IN"),
    ("around", "IN"),
    ("behind", "IN"),
    ("beside", "IN"),
    ("beyond", "IN"),
    ("near", "IN"),
    ("toward", "IN"),
    ("towards", "IN"),
    ("onto", "IN"),
    ("despite", "IN"),
    ("because", "IN"),
    ("although", "IN"),
    ("though", "IN"),
    ("while", "IN"),
    ("if", "IN"),
    ("unless", "IN"),
    ("whereas", "IN"),
    ("whether", "IN"),
    // Conjunctions
    ("and", "CC"),
    ("or", "CC"),
    ("but", "CC"),
    ("nor", "CC"),
    ("yet", "CC"),
    ("plus", "CC"),
    // Pronouns
    ("i", "PRP"),
    ("you", "PRP"),
    ("he", "PRP"),
    ("she", "PRP"),
    ("it", "PRP"),
    ("we", "PRP"),
    ("they", "PRP"),
    ("me", "PRP"),
    ("him", "PRP"),
    ("her", "PRP"),
    ("us", "PRP"),
    ("them", "PRP"),
    ("myself", "PRP"),
    ("yourself", "PRP"),
    ("himself", "PRP"),
    ("herself", "PRP"),
    ("itself", "PRP"),
    ("ourselves", "PRP"),
    ("themselves", "PRP"),
    ("my", "PRP$"),
    ("your", "PRP$"),
    ("his", "PRP$"),
    ("its", "PRP$"),
    ("our", "PRP$"),
    ("their", "PRP$"),
    ("who", "WP"),
    ("whom", "WP"),
    ("what", "WP"),
    ("which", "WDT"),
    ("when", "WRB"),
    ("where", "WRB"),
    ("why", "WRB"),
    ("how", "WRB"),
    ("there", "EX"),
    // Modals
    ("can", "MD"),
    ("could", "MD"),
    ("may", "MD"),
    ("might", "MD"),
    ("must", "MD"),
    ("shall", "MD"),
    ("should", "MD"),
    ("will", "MD"),
    ("would", "MD"),
    ("to", "TO"),
    // Auxiliaries
    ("is", "VBZ"),
    ("are", "VBP"),
    ("am", "VBP"),
    ("was", "VBD"),
    ("were", "VBD"),
    ("be", "VB"),
    ("been", "VBN"),
    ("being", "VBG"),
    ("has", "VBZ"),
    ("have", "VBP"),
    ("had", "VBD"),
    ("having", "VBG"),
    ("does", "VBZ"),
    ("do", "VBP"),
    ("did", "VBD"),
    // Adverbs that the engines care about
    ("not", "RB"),
    ("n't", "RB"),
    ("very", "RB"),
    ("too", "RB"),
    ("so", "RB"),
    ("really", "RB"),
    ("quite", "RB"),
    ("extremely", "RB"),
    ("incredibly", "RB"),
    ("also", "RB"),
    ("just", "RB"),
    ("still", "RB"),
    ("already", "RB"),
    ("always", "RB"),
    ("never", "RB"),
    ("often", "RB"),
    ("sometimes", "RB"),
    ("here", "RB"),
    ("now", "RB"),
    ("then", "RB"),
    ("soon", "RB"),
    ("again", "RB"),
    ("almost", "RB"),
    ("even", "RB"),
    ("only", "RB"),
    ("rather", "RB"),
    ("enough", "RB"),
    ("once", "RB"),
    ("ever", "RB"),
    ("yesterday", "RB"),
    ("today", "NN"),
    ("tomorrow", "NN"),
    // Quantifiers
    ("many", "JJ"),
    ("few", "JJ"),
    ("much", "JJ"),
    ("other", "JJ"),
    ("such", "JJ"),
    ("same", "JJ"),
    ("more", "JJR"),
    ("less", "JJR"),
    ("most", "JJS"),
    ("least", "JJS"),
    ("one", "CD"),
    ("two", "CD"),
    ("three", "CD"),
    ("four", "CD"),
    ("five", "CD"),
    ("six", "CD"),
    ("seven", "CD"),
    ("eight", "CD"),
    ("nine", "CD"),
    ("ten", "CD"),
    // -ly words that are not adverbs
    ("friendly", "JJ"),
    ("likely", "JJ"),
    ("lonely", "JJ"),
    ("silly", "JJ"),
    ("ugly", "JJ"),
    ("holy", "JJ"),
    ("daily", "JJ"),
];

/// Irregular verbs as (base, past, past participle).
const IRREGULAR_VERBS: &[(&str, &str, &str)] = &[
    ("arise", "arose", "arisen"),
    ("become", "became", "become"),
    ("begin", "began", "begun"),
    ("bend", "bent", "bent"),
    ("bite", "bit", "bitten"),
    ("blow", "blew", "blown"),
    ("break", "broke", "broken"),
    ("bring", "brought", "brought"),
    ("build", "built", "built"),
    ("buy", "bought", "bought"),
    ("catch", "caught", "caught"),
    ("choose", "chose", "chosen"),
    ("come", "came", "come"),
    ("cut", "cut", "cut"),
    ("draw", "drew", "drawn"),
    ("drink", "drank", "drunk"),
    ("drive", "drove", "driven"),
    ("eat", "ate", "eaten"),
    ("fall", "fell", "fallen"),
    ("feel", "felt", "felt"),
    ("fight", "fought", "fought"),
    ("find", "found", "found"),
    ("fly", "flew", "flown"),
    ("forget", "forgot", "forgotten"),
    ("forgive", "forgave", "forgiven"),
    ("freeze", "froze", "frozen"),
    ("get", "got", "gotten"),
    ("give", "gave", "given"),
    ("go", "went", "gone"),
    ("grow", "grew", "grown"),
    ("hear", "heard", "heard"),
    ("hide", "hid", "hidden"),
    ("hit", "hit", "hit"),
    ("hold", "held", "held"),
    ("hurt", "hurt", "hurt"),
    ("keep", "kept", "kept"),
    ("know", "knew", "known"),
    ("lay", "laid", "laid"),
    ("lead", "led", "led"),
    ("leave", "left", "left"),
    ("lend", "lent", "lent"),
    ("let", "let", "let"),
    ("lose", "lost", "lost"),
    ("make", "made", "made"),
    ("mean", "meant", "meant"),
    ("meet", "met", "met"),
    ("pay", "paid", "paid"),
    ("put", "put", "put"),
    ("read", "read", "read"),
    ("ride", "rode", "ridden"),
    ("ring", "rang", "rung"),
    ("rise", "rose", "risen"),
    ("run", "ran", "run"),
    ("say", "said", "said"),
    ("see", "saw", "seen"),
    ("sell", "sold", "sold"),
    ("send", "sent", "sent"),
    ("set", "set", "set"),
    ("shake", "shook", "shaken"),
    ("show", "showed", "shown"),
    ("shut", "shut", "shut"),
    ("sing", "sang", "sung"),
    ("sit", "sat", "sat"),
    ("sleep", "slept", "slept"),
    ("speak", "spoke", "spoken"),
    ("spend", "spent", "spent"),
    ("stand", "stood", "stood"),
    ("steal", "stole", "stolen"),
    ("swim", "swam", "swum"),
    ("take", "took", "taken"),
    ("teach", "taught", "taught"),
    ("tear", "tore", "torn"),
    ("tell", "told", "told"),
    ("think", "thought", "thought"),
    ("throw", "threw", "thrown"),
    ("understand", "understood", "understood"),
    ("wake", "woke", "woken"),
    ("wear", "wore", "worn"),
    ("win", "won", "won"),
    ("write", "wrote", "written"),
];

const BE_AND_HAVE: &[&str] = &[
    "is", "are", "am", "was", "were", "be", "been", "being", "has", "have", "had", "having", "'s",
    "'re", "'ve", "'m", "isn't", "aren't", "wasn't", "weren't", "hasn't", "haven't", "hadn't",
];

const SUBJECT_PRONOUNS: &[&str] = &["i", "you", "we", "they"];

pub(crate) const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "less", "ish", "ary", "ical", "ic", "al",
];

pub(crate) const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ism", "ist", "ance", "ence", "ship", "hood", "dom",
];

static CLOSED_CLASS_MAP: LazyLock<AHashMap<&'static str, &'static str>> =
    LazyLock::new(|| CLOSED_CLASS.iter().copied().collect());

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VerbForm {
    Base,
    Third,
    Past,
    Participle,
    PastOrParticiple,
    BaseOrParticiple,
}

static VERB_FORMS: LazyLock<AHashMap<String, VerbForm>> = LazyLock::new(|| {
    let mut forms = AHashMap::new();
    for &(base, past, participle) in IRREGULAR_VERBS {
        forms.insert(third_person(base), VerbForm::Third);
        forms.insert(base.to_string(), VerbForm::Base);
        if past == participle {
            forms.insert(past.to_string(), VerbForm::PastOrParticiple);
        } else {
            forms.insert(past.to_string(), VerbForm::Past);
            let form = if participle == base {
                VerbForm::BaseOrParticiple
            } else {
                VerbForm::Participle
            };
            forms.insert(participle.to_string(), form);
        }
    }
    forms
});

/// Whether `word` is any form of a verb in the irregular-verb table.
pub fn is_irregular_verb_form(word: &str) -> bool {
    VERB_FORMS.contains_key(&word.to_lowercase())
}

fn third_person(base: &str) -> String {
    if base.ends_with('s')
        || base.ends_with("sh")
        || base.ends_with("ch")
        || base.ends_with('x')
        || base.ends_with('o')
    {
        format!("{base}es")
    } else if base.ends_with('y') && !base.ends_with("ay") && !base.ends_with("ey") {
        format!("{}ies", &base[..base.len() - 1])
    } else {
        format!("{base}s")
    }
}

/// A tagger driven by lexicons and hand-written rules.
#[derive(Clone, Debug)]
pub struct RuleTagger {
    lexicon: Arc<AHashMap<String, String>>,
}

impl RuleTagger {
    /// Create a tagger over the given word → tag lexicon (keys lowercase).
    pub fn new(lexicon: AHashMap<String, String>) -> Self {
        RuleTagger {
            lexicon: Arc::new(lexicon),
        }
    }

    /// Tagger over the lexicon shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_LEXICON)
    }

    /// Parse a JSON object of `word: tag` pairs.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: AHashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| RephraseError::resource_load(format!("Invalid tagger lexicon: {e}")))?;
        let lexicon = raw
            .into_iter()
            .map(|(word, tag)| (word.to_lowercase(), tag))
            .collect();
        Ok(Self::new(lexicon))
    }

    /// Load a lexicon from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RephraseError::resource_load(format!(
                "Failed to read tagger lexicon {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&content)
    }

    /// Shared handle to the word lexicon.
    pub fn lexicon(&self) -> Arc<AHashMap<String, String>> {
        Arc::clone(&self.lexicon)
    }

    /// The lexicon tag of a word, if any.
    pub fn lexicon_tag(&self, word: &str) -> Option<&str> {
        self.lexicon.get(&word.to_lowercase()).map(String::as_str)
    }

    fn tag_at(&self, tokens: &[Token], i: usize, tags: &[String]) -> String {
        let text = tokens[i].text.as_str();
        if let Some(tag) = punctuation_tag(text) {
            return tag.to_string();
        }
        if is_number(text) {
            return "CD".to_string();
        }

        let lower = text.to_lowercase().replace('’', "'");
        let prev_tag = tags.last().map(String::as_str).unwrap_or("");
        let prev_text = if i > 0 { tokens[i - 1].text.to_lowercase() } else { String::new() };
        let initial = i == 0 || matches!(prev_text.as_str(), "." | "!" | "?" | "\"" | "(" | "“");
        let after_aux = follows_auxiliary(tokens, i, tags);

        if lower == "i" {
            return "PRP".to_string();
        }
        if let Some(tag) = CLOSED_CLASS_MAP.get(lower.as_str()) {
            return tag.to_string();
        }
        if lower.contains('\'') {
            return contraction_tag(&lower, text);
        }

        let capitalized = text.chars().next().is_some_and(char::is_uppercase);
        if capitalized && !initial {
            return "NNP".to_string();
        }

        if let Some(form) = VERB_FORMS.get(&lower) {
            return verb_form_tag(*form, prev_tag, &prev_text, initial, after_aux);
        }

        if let Some(tag) = self.lexicon.get(&lower) {
            return lexicon_tag_in_context(tag, prev_tag, &prev_text, initial, after_aux);
        }

        if let Some(tag) = self.inflected_tag(&lower, prev_tag) {
            return tag;
        }

        // Unknown capitalised words are names even at a sentence start.
        if capitalized {
            return "NNP".to_string();
        }

        suffix_tag(&lower, prev_tag, after_aux)
            .map(str::to_string)
            .unwrap_or_else(|| default_tag(prev_tag, &prev_text))
    }

    /// Plural nouns and third-person verbs whose stem is known.
    fn inflected_tag(&self, lower: &str, prev_tag: &str) -> Option<String> {
        if !lower.ends_with('s') || lower.ends_with("ss") || lower.chars().count() < 4 {
            return None;
        }
        let mut stems = Vec::with_capacity(3);
        if let Some(stem) = lower.strip_suffix("ies") {
            stems.push(format!("{stem}y"));
        }
        if let Some(stem) = lower.strip_suffix("es") {
            stems.push(stem.to_string());
        }
        stems.push(lower[..lower.len() - 1].to_string());

        stems.iter().find_map(|stem| {
            let tag = self.lexicon.get(stem)?;
            let nominal_context = matches!(prev_tag, "DT" | "JJ" | "JJR" | "JJS" | "PRP$" | "CD");
            Some(match tag.as_str() {
                "NN" => "NNS".to_string(),
                "VB" if nominal_context => "NNS".to_string(),
                "VB" => "VBZ".to_string(),
                _ => return None,
            })
        })
    }
}

impl Tagger for RuleTagger {
    fn tag(&self, tokens: Vec<Token>) -> Result<Vec<Token>> {
        let mut tags: Vec<String> = Vec::with_capacity(tokens.len());
        for i in 0..tokens.len() {
            let tag = self.tag_at(&tokens, i, &tags);
            tags.push(tag);
        }
        Ok(tokens
            .into_iter()
            .zip(tags)
            .map(|(token, tag)| token.with_tag(tag))
            .collect())
    }

    fn name(&self) -> &'static str {
        "rule"
    }
}

fn punctuation_tag(text: &str) -> Option<&'static str> {
    if text.is_empty() || text.chars().any(char::is_alphanumeric) {
        return None;
    }
    let tag = match text {
        "." | "!" | "?" => ".",
        "," => ",",
        ";" | ":" | "--" => ":",
        "\"" | "“" | "”" | "'" | "’" | "‘" => "''",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        "$" => "$",
        "#" => "#",
        _ if text.chars().all(|c| c == '.') => ":",
        _ if text.chars().all(|c| c == '-') => ":",
        _ => "SYM",
    };
    Some(tag)
}

fn is_number(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '%' | '-'))
}

/// Whether a be/have form precedes `i`, skipping adverbs in between.
fn follows_auxiliary(tokens: &[Token], i: usize, tags: &[String]) -> bool {
    tokens[..i]
        .iter()
        .zip(tags)
        .rev()
        .find(|(_, tag)| !tag.starts_with("RB"))
        .is_some_and(|(token, _)| {
            let lower = token.text.to_lowercase().replace('’', "'");
            BE_AND_HAVE.contains(&lower.as_str())
        })
}

fn contraction_tag(lower: &str, text: &str) -> String {
    if let Some(stem) = lower.strip_suffix("n't") {
        return match stem {
            "ca" | "wo" | "sha" => "MD".to_string(),
            _ => CLOSED_CLASS_MAP.get(stem).unwrap_or(&"VB").to_string(),
        };
    }
    let (head, tail) = lower.split_once('\'').unwrap_or((lower, ""));
    let head_tag = if head == "i" {
        Some("PRP")
    } else {
        CLOSED_CLASS_MAP.get(head).copied()
    };
    match (tail, head_tag) {
        ("s" | "m" | "re" | "ve" | "ll" | "d", Some(tag)) => tag.to_string(),
        ("s" | "", None) if text.chars().next().is_some_and(char::is_uppercase) => {
            "NNP".to_string()
        }
        _ => "NN".to_string(),
    }
}

fn verb_form_tag(
    form: VerbForm,
    prev_tag: &str,
    prev_text: &str,
    initial: bool,
    after_aux: bool,
) -> String {
    match form {
        VerbForm::Participle => "VBN".to_string(),
        VerbForm::Past => "VBD".to_string(),
        VerbForm::Third => "VBZ".to_string(),
        VerbForm::PastOrParticiple if after_aux => "VBN".to_string(),
        VerbForm::PastOrParticiple => "VBD".to_string(),
        VerbForm::BaseOrParticiple if after_aux => "VBN".to_string(),
        VerbForm::Base | VerbForm::BaseOrParticiple => {
            base_verb_tag(prev_tag, prev_text, initial)
        }
    }
}

/// A base-form verb in context: infinitive, present tense, imperative or a noun use.
fn base_verb_tag(prev_tag: &str, prev_text: &str, initial: bool) -> String {
    if matches!(prev_tag, "TO" | "MD") {
        return "VB".to_string();
    }
    if matches!(prev_tag, "DT" | "PRP$" | "JJ" | "JJR" | "JJS" | "IN" | "CD") {
        return "NN".to_string();
    }
    if prev_tag == "PRP" && !SUBJECT_PRONOUNS.contains(&prev_text) {
        // "it", "him", "them" etc. before a base verb reads as an object.
        return "NN".to_string();
    }
    if initial {
        return "VB".to_string();
    }
    "VBP".to_string()
}

fn lexicon_tag_in_context(
    tag: &str,
    prev_tag: &str,
    prev_text: &str,
    initial: bool,
    after_aux: bool,
) -> String {
    match tag {
        "VB" => base_verb_tag(prev_tag, prev_text, initial),
        "VBD" | "VBN" if after_aux => "VBN".to_string(),
        "VBD" | "VBN" => "VBD".to_string(),
        "NN" if matches!(prev_tag, "TO" | "MD") => "VB".to_string(),
        "NN" if prev_tag == "PRP" && SUBJECT_PRONOUNS.contains(&prev_text) => "VBP".to_string(),
        _ => tag.to_string(),
    }
}

fn suffix_tag(lower: &str, prev_tag: &str, after_aux: bool) -> Option<&'static str> {
    let len = lower.chars().count();
    if len < 4 {
        return None;
    }
    if lower.ends_with("ly") {
        return Some("RB");
    }
    if lower.ends_with("ing") && len > 4 {
        return Some("VBG");
    }
    if lower.ends_with("ed") {
        return Some(if after_aux {
            "VBN"
        } else if matches!(prev_tag, "DT" | "PRP$") {
            "JJ"
        } else {
            "VBD"
        });
    }
    if lower.ends_with("est") && len > 5 {
        return Some("JJS");
    }
    if ADJECTIVE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
        return Some("JJ");
    }
    if NOUN_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
        return Some("NN");
    }
    if let Some(stem) = lower.strip_suffix('s')
        && NOUN_SUFFIXES.iter().any(|suffix| stem.ends_with(suffix))
    {
        return Some("NNS");
    }
    if lower.ends_with('s') && !lower.ends_with("ss") && !lower.ends_with("us") {
        return Some(if pos::is_noun(prev_tag) || prev_tag == "PRP" {
            "VBZ"
        } else {
            "NNS"
        });
    }
    None
}

fn default_tag(prev_tag: &str, prev_text: &str) -> String {
    if matches!(prev_tag, "TO" | "MD") {
        "VB".to_string()
    } else if prev_tag == "PRP" && SUBJECT_PRONOUNS.contains(&prev_text) {
        "VBP".to_string()
    } else {
        "NN".to_string()
    }
}
