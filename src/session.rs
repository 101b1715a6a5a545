//! The session: loaded resources plus the NLP oracle.
//!
//! A [`Session`] caches read-only lexical resources and an oracle for its
//! whole lifetime. It holds no behavior settings; every call gets its
//! [`TransformationConfig`] and [`ResourceSelection`] explicitly.
//!
//! # Examples
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use rephrase::lexicon::selection::ResourceSelection;
//! use rephrase::session::Session;
//! use rephrase::transform::config::TransformationConfig;
//!
//! let session = Session::bundled().unwrap();
//! let config = TransformationConfig::unchanged();
//! let mut rng = StdRng::seed_from_u64(7);
//! let output = session
//!     .combined_with_rng("The ball was thrown by John.", &config, &ResourceSelection::default(), &mut rng)
//!     .unwrap();
//! assert_eq!(output, "The ball was thrown by John.");
//! ```

use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use rand::Rng;

use crate::analysis::oracle::{LexiconOracle, NlpOracle};
use crate::document::rewriter::PipelineRewriter;
use crate::error::Result;
use crate::lexicon::selection::ResourceSelection;
use crate::lexicon::store::{LexicalStore, ResolvedResources};
use crate::rewrite::{RewriteConfig, RewriteOracle, RewriteRequest};
use crate::transform::config::TransformationConfig;
use crate::transform::pipeline::{Pipeline, Policy};

/// Loaded lexical resources and the NLP oracle.
#[derive(Clone)]
pub struct Session {
    store: LexicalStore,
    oracle: Arc<dyn NlpOracle>,
}

impl Session {
    pub fn new(store: LexicalStore, oracle: Arc<dyn NlpOracle>) -> Self {
        Session { store, oracle }
    }

    /// Session over the bundled lexicon and oracle.
    pub fn bundled() -> Result<Self> {
        let store = LexicalStore::bundled()?;
        let oracle = LexiconOracle::bundled()?;
        Ok(Self::new(store, Arc::new(oracle)))
    }

    /// Session whose oracle reads its data files and tagging model from
    /// `dir`, fetching whatever is missing there first.
    pub async fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let store = LexicalStore::bundled()?;
        let oracle = LexiconOracle::open(dir).await?;
        Ok(Self::new(store, Arc::new(oracle)))
    }

    pub fn store(&self) -> &LexicalStore {
        &self.store
    }

    /// Mutable access for loading custom lists before transformations run.
    pub fn store_mut(&mut self) -> &mut LexicalStore {
        &mut self.store
    }

    pub fn oracle(&self) -> &Arc<dyn NlpOracle> {
        &self.oracle
    }

    /// Resolve a resource selection against the store.
    pub fn resolve(&self, selection: &ResourceSelection) -> Result<ResolvedResources> {
        self.store.resolve(selection)
    }

    /// Run `policy` over `text` with the thread-local generator.
    pub fn transform(
        &self,
        policy: Policy,
        text: &str,
        config: &TransformationConfig,
        selection: &ResourceSelection,
    ) -> Result<String> {
        self.transform_with_rng(policy, text, config, selection, &mut rand::rng())
    }

    /// Run `policy` over `text` with an injected generator.
    pub fn transform_with_rng<R: Rng + ?Sized>(
        &self,
        policy: Policy,
        text: &str,
        config: &TransformationConfig,
        selection: &ResourceSelection,
        rng: &mut R,
    ) -> Result<String> {
        let resources = self.resolve(selection)?;
        Pipeline::new(self.oracle.as_ref(), resources).run(policy, text, config, rng)
    }

    pub fn basic(
        &self,
        text: &str,
        config: &TransformationConfig,
        selection: &ResourceSelection,
    ) -> Result<String> {
        self.transform(Policy::Basic, text, config, selection)
    }

    pub fn basic_with_rng<R: Rng + ?Sized>(
        &self,
        text: &str,
        config: &TransformationConfig,
        selection: &ResourceSelection,
        rng: &mut R,
    ) -> Result<String> {
        self.transform_with_rng(Policy::Basic, text, config, selection, rng)
    }

    pub fn contextual(
        &self,
        text: &str,
        config: &TransformationConfig,
        selection: &ResourceSelection,
    ) -> Result<String> {
        self.transform(Policy::Contextual, text, config, selection)
    }

    pub fn contextual_with_rng<R: Rng + ?Sized>(
        &self,
        text: &str,
        config: &TransformationConfig,
        selection: &ResourceSelection,
        rng: &mut R,
    ) -> Result<String> {
        self.transform_with_rng(Policy::Contextual, text, config, selection, rng)
    }

    pub fn structure(
        &self,
        text: &str,
        config: &TransformationConfig,
        selection: &ResourceSelection,
    ) -> Result<String> {
        self.transform(Policy::Structure, text, config, selection)
    }

    pub fn structure_with_rng<R: Rng + ?Sized>(
        &self,
        text: &str,
        config: &TransformationConfig,
        selection: &ResourceSelection,
        rng: &mut R,
    ) -> Result<String> {
        self.transform_with_rng(Policy::Structure, text, config, selection, rng)
    }

    /// Structure variation followed by context-aware substitution.
    pub fn combined(
        &self,
        text: &str,
        config: &TransformationConfig,
        selection: &ResourceSelection,
    ) -> Result<String> {
        self.transform(Policy::Combined, text, config, selection)
    }

    pub fn combined_with_rng<R: Rng + ?Sized>(
        &self,
        text: &str,
        config: &TransformationConfig,
        selection: &ResourceSelection,
        rng: &mut R,
    ) -> Result<String> {
        self.transform_with_rng(Policy::Combined, text, config, selection, rng)
    }

    /// An optional basic pass, then a humanizing rewrite through `oracle`.
    ///
    /// With `pre_pass` set to `None` the text goes to the oracle unchanged.
    pub async fn combined_humanize(
        &self,
        text: &str,
        oracle: &dyn RewriteOracle,
        rewrite: &RewriteConfig,
        pre_pass: Option<(&TransformationConfig, &ResourceSelection)>,
    ) -> Result<String> {
        let prepared = match pre_pass {
            Some((config, selection)) => self.basic(text, config, selection)?,
            None => text.to_string(),
        };
        self.humanize_prepared(prepared, oracle, rewrite).await
    }

    /// [`Session::combined_humanize`] with an injected generator for the
    /// basic pass.
    pub async fn combined_humanize_with_rng<R: Rng + ?Sized>(
        &self,
        text: &str,
        oracle: &dyn RewriteOracle,
        rewrite: &RewriteConfig,
        pre_pass: Option<(&TransformationConfig, &ResourceSelection)>,
        rng: &mut R,
    ) -> Result<String> {
        let prepared = match pre_pass {
            Some((config, selection)) => self.basic_with_rng(text, config, selection, rng)?,
            None => text.to_string(),
        };
        self.humanize_prepared(prepared, oracle, rewrite).await
    }

    async fn humanize_prepared(
        &self,
        prepared: String,
        oracle: &dyn RewriteOracle,
        rewrite: &RewriteConfig,
    ) -> Result<String> {
        info!(
            "Humanizing {} bytes with {} ({})",
            prepared.len(),
            oracle.name(),
            rewrite.model
        );
        let request = RewriteRequest::humanize(&prepared, rewrite);
        oracle.rewrite(&request).await
    }

    /// A paragraph rewriter running `policy` with resources resolved now.
    pub fn pipeline_rewriter(
        &self,
        policy: Policy,
        config: TransformationConfig,
        selection: &ResourceSelection,
    ) -> Result<PipelineRewriter> {
        config.validate()?;
        let resources = self.resolve(selection)?;
        debug!("Pipeline rewriter for the {policy} policy");
        Ok(PipelineRewriter::new(
            Arc::clone(&self.oracle),
            resources,
            policy,
            config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RephraseError;
    use crate::lexicon::selection::SynonymSource;
    use crate::rewrite::ChunkStream;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn session() -> Session {
        Session::bundled().unwrap()
    }

    #[test]
    fn test_seeded_calls_are_deterministic() {
        let session = session();
        let config = TransformationConfig::default().with_percent_synonyms(80);
        let selection = ResourceSelection::default();
        let text = "The big dog ran quickly across the small garden.";

        for policy in Policy::ALL {
            let a = session
                .transform_with_rng(policy, text, &config, &selection, &mut StdRng::seed_from_u64(9))
                .unwrap();
            let b = session
                .transform_with_rng(policy, text, &config, &selection, &mut StdRng::seed_from_u64(9))
                .unwrap();
            assert_eq!(a, b, "policy {policy}");
        }
    }

    #[test]
    fn test_custom_selection_needs_loaded_list() {
        let mut session = session();
        let config = TransformationConfig::basic().with_percent_synonyms(100);
        let selection = ResourceSelection::default().with_synonyms(SynonymSource::Custom);

        let error = session.basic("A cat sat.", &config, &selection).unwrap_err();
        assert!(matches!(error, RephraseError::Configuration(_)));

        session.store_mut().custom_synonyms_from_map(HashMap::from([(
            "cat".to_string(),
            vec!["feline".to_string()],
        )]));
        let output = session
            .basic_with_rng(
                "A cat sat.",
                &config.with_percent_adjectives(0),
                &selection,
                &mut StdRng::seed_from_u64(1),
            )
            .unwrap();
        assert_eq!(output, "A feline sat.");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let session = session();
        let config = TransformationConfig::default().with_percent_reorder(101);
        assert!(matches!(
            session.structure("One. Two.", &config, &ResourceSelection::default()),
            Err(RephraseError::Configuration(_))
        ));
        assert!(session
            .pipeline_rewriter(Policy::Basic, config, &ResourceSelection::default())
            .is_err());
    }

    #[derive(Default)]
    struct RecordingOracle {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RewriteOracle for RecordingOracle {
        async fn rewrite(&self, request: &RewriteRequest) -> Result<String> {
            self.prompts.lock().push(request.prompt.clone());
            Ok("rewritten".to_string())
        }

        async fn rewrite_stream(&self, _request: &RewriteRequest) -> Result<ChunkStream> {
            Ok(Box::pin(futures::stream::empty()))
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    #[tokio::test]
    async fn test_combined_humanize() {
        let session = session();
        let oracle = RecordingOracle::default();
        let rewrite = RewriteConfig::default();

        let output = session
            .combined_humanize("Plain input.", &oracle, &rewrite, None)
            .await
            .unwrap();
        assert_eq!(output, "rewritten");

        let config = TransformationConfig::unchanged();
        let selection = ResourceSelection::default();
        session
            .combined_humanize_with_rng(
                "Second input.",
                &oracle,
                &rewrite,
                Some((&config, &selection)),
                &mut StdRng::seed_from_u64(3),
            )
            .await
            .unwrap();

        let prompts = oracle.prompts.lock();
        assert!(prompts[0].contains("Plain input."));
        assert!(prompts[1].contains("Second input."));
    }
}
