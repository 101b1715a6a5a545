//! Tagger backed by a compiled nlprule tagging model.
//!
//! The model (`en_tokenizer.bin`) carries a large English tag dictionary and
//! LanguageTool disambiguation rules. It tokenizes on its own, so its tokens
//! are aligned back onto ours by surface text and byte position. Tokens the
//! model splits differently (contractions, some hyphenated words) and tokens
//! it leaves without a Penn tag keep the tag of the fallback [`RuleTagger`].

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;
use log::debug;
use nlprule::Tokenizer as NlpruleTokenizer;

use crate::analysis::tagger::Tagger;
use crate::analysis::tagger::rule::RuleTagger;
use crate::analysis::token::Token;
use crate::error::{RephraseError, Result};

/// Penn-Treebank tags accepted from the model. Anything else (sentence
/// markers, punctuation classes) is left to the fallback.
const PENN_TAGS: &[&str] = &[
    "CC", "CD", "DT", "EX", "FW", "IN", "JJ", "JJR", "JJS", "LS", "MD", "NN", "NNS", "NNP", "NNPS",
    "PDT", "POS", "PRP", "PRP$", "RB", "RBR", "RBS", "RP", "TO", "UH", "VB", "VBD", "VBG", "VBN",
    "VBP", "VBZ", "WDT", "WP", "WP$", "WRB",
];

/// A model tagger with a rule-based fallback.
#[derive(Clone)]
pub struct ModelTagger {
    model: Arc<NlpruleTokenizer>,
    fallback: RuleTagger,
}

impl ModelTagger {
    pub fn new(model: NlpruleTokenizer, fallback: RuleTagger) -> Self {
        ModelTagger {
            model: Arc::new(model),
            fallback,
        }
    }

    /// Load the model binary at `path`.
    ///
    /// A model that cannot be read is reported as
    /// [`RephraseError::OracleUnavailable`].
    pub fn from_file<P: AsRef<Path>>(path: P, fallback: RuleTagger) -> Result<Self> {
        let path = path.as_ref();
        let model = NlpruleTokenizer::new(path).map_err(|e| {
            RephraseError::oracle_unavailable(format!(
                "failed to load tagging model {}: {e}",
                path.display()
            ))
        })?;
        debug!("Loaded tagging model from {}", path.display());
        Ok(Self::new(model, fallback))
    }

    pub fn fallback(&self) -> &RuleTagger {
        &self.fallback
    }

    /// Model tags for each token, `None` where the model has no usable tag.
    fn model_tags(&self, tokens: &[Token]) -> Vec<Option<String>> {
        let (text, starts) = layout(tokens);
        let mut tagged = Vec::new();
        for sentence in self.model.pipe(&text) {
            for token in sentence.tokens() {
                let word = token.word().text().as_str().to_string();
                let mut tag = None;
                for data in token.word().tags() {
                    if let Some(penn) = penn_tag(data.pos().as_str()) {
                        tag = Some(penn.to_string());
                        break;
                    }
                }
                tagged.push((word, tag));
            }
        }
        align(&text, &starts, tokens, tagged)
    }
}

impl fmt::Debug for ModelTagger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelTagger")
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

impl Tagger for ModelTagger {
    fn tag(&self, tokens: Vec<Token>) -> Result<Vec<Token>> {
        let model_tags = self.model_tags(&tokens);
        let tagged = self.fallback.tag(tokens)?;
        Ok(tagged
            .into_iter()
            .zip(model_tags)
            .map(|(token, tag)| match tag {
                Some(tag) => token.with_tag(tag),
                None => token,
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "model"
    }
}

/// The Penn part of a model tag (`NN:UN` → `NN`), if it is one we use.
fn penn_tag(tag: &str) -> Option<&str> {
    let tag = tag.split(':').next().unwrap_or(tag);
    PENN_TAGS.contains(&tag).then_some(tag)
}

/// Lay the tokens out as text at their recorded offsets.
///
/// Returns the text and the byte start of each token in it. Tokens without
/// usable offsets are separated by a single space.
fn layout(tokens: &[Token]) -> (String, Vec<usize>) {
    let mut text = String::new();
    let mut starts = Vec::with_capacity(tokens.len());
    for token in tokens {
        if text.len() < token.start_offset {
            let gap = token.start_offset - text.len();
            text.extend(std::iter::repeat_n(' ', gap));
        } else if !text.is_empty() && text.len() > token.start_offset {
            text.push(' ');
        }
        starts.push(text.len());
        text.push_str(&token.text);
    }
    (text, starts)
}

/// Map model `(surface, tag)` pairs onto `tokens`.
///
/// Each model token is located in `text` after the previous one; it tags our
/// token only when both start at the same byte and have the same surface.
fn align(
    text: &str,
    starts: &[usize],
    tokens: &[Token],
    tagged: Vec<(String, Option<String>)>,
) -> Vec<Option<String>> {
    let by_start: AHashMap<usize, usize> = starts.iter().enumerate().map(|(i, &s)| (s, i)).collect();
    let mut tags = vec![None; tokens.len()];
    let mut cursor = 0;

    for (word, tag) in tagged {
        if word.is_empty() {
            continue;
        }
        let Some(offset) = text.get(cursor..).and_then(|rest| rest.find(&word)) else {
            continue;
        };
        let start = cursor + offset;
        cursor = start + word.len();

        if let Some(&i) = by_start.get(&start)
            && tokens[i].text == word
        {
            tags[i] = tag;
        }
    }
    tags
}
