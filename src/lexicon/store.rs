//! The lexical resource store and resource resolution.
//!
//! # Examples
//!
//! ```
//! use rephrase::lexicon::selection::{ResourceSelection, SynonymSource};
//! use rephrase::lexicon::store::LexicalStore;
//!
//! let store = LexicalStore::bundled().unwrap();
//! let resolved = store.resolve(&ResourceSelection::default()).unwrap();
//! assert!(resolved.synonyms.get("big").is_some());
//!
//! // Custom lists must be loaded before they can be selected.
//! let custom = ResourceSelection::default().with_synonyms(SynonymSource::Custom);
//! assert!(store.resolve(&custom).is_err());
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use serde::de::DeserializeOwned;

use crate::error::{RephraseError, Result};
use crate::lexicon::selection::{AdjectiveSource, ResourceSelection, SynonymSource};
use crate::lexicon::synonyms::SynonymMap;
use crate::lexicon::words::{AdjectiveSet, CommonWords, WordSet};

const BUNDLED_PRIMARY: &str = include_str!("../../resources/lexicon/primary.json");
const BUNDLED_SECONDARY: &str = include_str!("../../resources/lexicon/secondary.json");
const BUNDLED_COMMON_WORDS: &str = include_str!("../../resources/lexicon/common_words.json");
const BUNDLED_ADJECTIVES: &str = include_str!("../../resources/lexicon/adjectives.json");

/// Resources resolved for one call. Engines only ever see these handles.
#[derive(Clone, Debug)]
pub struct ResolvedResources {
    pub synonyms: Arc<SynonymMap>,
    pub adjectives: Arc<AdjectiveSet>,
}

impl ResolvedResources {
    pub fn new(synonyms: SynonymMap, adjectives: AdjectiveSet) -> Self {
        ResolvedResources {
            synonyms: Arc::new(synonyms),
            adjectives: Arc::new(adjectives),
        }
    }
}

/// Read-only bundled resources plus optional custom ones.
#[derive(Clone, Debug)]
pub struct LexicalStore {
    primary: Arc<SynonymMap>,
    secondary: Arc<SynonymMap>,
    common_words: Arc<CommonWords>,
    adjectives: Arc<AdjectiveSet>,
    custom_synonyms: Option<Arc<SynonymMap>>,
    custom_adjectives: Option<Arc<AdjectiveSet>>,
}

impl LexicalStore {
    /// Assemble a store from explicit resources.
    pub fn new(
        primary: SynonymMap,
        secondary: SynonymMap,
        common_words: CommonWords,
        adjectives: AdjectiveSet,
    ) -> Self {
        LexicalStore {
            primary: Arc::new(primary),
            secondary: Arc::new(secondary),
            common_words: Arc::new(common_words),
            adjectives: Arc::new(adjectives),
            custom_synonyms: None,
            custom_adjectives: None,
        }
    }

    /// Store holding the lists compiled into the crate.
    pub fn bundled() -> Result<Self> {
        let store = Self::new(
            SynonymMap::from_json(BUNDLED_PRIMARY)?,
            SynonymMap::from_json(BUNDLED_SECONDARY)?,
            WordSet::from_json(BUNDLED_COMMON_WORDS)?,
            WordSet::from_json(BUNDLED_ADJECTIVES)?,
        );
        debug!(
            "Loaded bundled lexicon: {} primary, {} secondary, {} adjectives",
            store.primary.len(),
            store.secondary.len(),
            store.adjectives.len()
        );
        Ok(store)
    }

    pub fn set_custom_synonyms(&mut self, synonyms: SynonymMap) {
        info!("Custom synonym list set ({} entries)", synonyms.len());
        self.custom_synonyms = Some(Arc::new(synonyms));
    }

    pub fn set_custom_adjectives(&mut self, adjectives: AdjectiveSet) {
        info!("Custom adjective list set ({} words)", adjectives.len());
        self.custom_adjectives = Some(Arc::new(adjectives));
    }

    /// Load custom synonyms from a JSON file (`{"word": ["synonym", ...]}`).
    pub fn custom_synonyms_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let synonyms = SynonymMap::from_file(path)?;
        self.set_custom_synonyms(synonyms);
        Ok(())
    }

    /// Load custom adjectives from a JSON file (`["adjective", ...]`).
    pub fn custom_adjectives_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let adjectives = WordSet::from_file(path)?;
        self.set_custom_adjectives(adjectives);
        Ok(())
    }

    /// Use an in-memory map as the custom synonym list.
    pub fn custom_synonyms_from_map(&mut self, synonyms: HashMap<String, Vec<String>>) {
        self.set_custom_synonyms(SynonymMap::from_entries(synonyms));
    }

    /// Use an in-memory list as the custom adjective set.
    pub fn custom_adjectives_from_list<I, S>(&mut self, adjectives: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_custom_adjectives(WordSet::from_words(adjectives));
    }

    /// Fetch custom synonyms from a URL returning the JSON object format.
    pub async fn custom_synonyms_from_url(&mut self, url: &str) -> Result<()> {
        let raw: HashMap<String, Vec<String>> = fetch_json(url).await?;
        self.custom_synonyms_from_map(raw);
        Ok(())
    }

    /// Fetch custom adjectives from a URL returning a JSON array.
    pub async fn custom_adjectives_from_url(&mut self, url: &str) -> Result<()> {
        let raw: Vec<String> = fetch_json(url).await?;
        self.custom_adjectives_from_list(raw);
        Ok(())
    }

    pub fn has_custom_synonyms(&self) -> bool {
        self.custom_synonyms.is_some()
    }

    pub fn has_custom_adjectives(&self) -> bool {
        self.custom_adjectives.is_some()
    }

    pub fn common_words(&self) -> &CommonWords {
        &self.common_words
    }

    /// Resolve a selection into concrete resource handles.
    ///
    /// Selecting a custom list that was never loaded is a configuration error.
    pub fn resolve(&self, selection: &ResourceSelection) -> Result<ResolvedResources> {
        let synonyms = match selection.synonyms {
            SynonymSource::Primary => Arc::clone(&self.primary),
            SynonymSource::Secondary => Arc::clone(&self.secondary),
            SynonymSource::Custom => self
                .custom_synonyms
                .clone()
                .ok_or_else(|| RephraseError::configuration("Custom synonyms not set"))?,
        };

        let adjectives = match selection.adjectives {
            AdjectiveSource::Default => Arc::clone(&self.adjectives),
            AdjectiveSource::Custom => self
                .custom_adjectives
                .clone()
                .ok_or_else(|| RephraseError::configuration("Custom adjectives not set"))?,
        };

        let synonyms = if selection.common_words_only {
            Arc::new(synonyms.restrict_to(&self.common_words))
        } else {
            synonyms
        };

        Ok(ResolvedResources {
            synonyms,
            adjectives,
        })
    }
}

async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T> {
    debug!("Fetching lexical resource from {url}");
    let response = reqwest::get(url)
        .await
        .map_err(|e| RephraseError::resource_load(format!("Failed to fetch {url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(RephraseError::resource_load(format!(
            "Fetching {url} returned status {status}"
        )));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| RephraseError::resource_load(format!("Invalid JSON from {url}: {e}")))
}
