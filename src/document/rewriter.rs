//! Paragraph rewriters used by the document processor and batches.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::analysis::oracle::NlpOracle;
use crate::error::Result;
use crate::lexicon::store::ResolvedResources;
use crate::rewrite::{RewriteConfig, RewriteOracle, RewriteRequest};
use crate::transform::config::TransformationConfig;
use crate::transform::pipeline::{Pipeline, Policy};

/// Rewrites one unit of text.
#[async_trait]
pub trait TextRewriter: Send + Sync {
    async fn rewrite(&self, text: &str) -> Result<String>;

    /// Get the name of this rewriter.
    fn name(&self) -> &'static str;
}

/// Rewrites through a local transformation policy.
pub struct PipelineRewriter {
    oracle: Arc<dyn NlpOracle>,
    resources: ResolvedResources,
    policy: Policy,
    config: TransformationConfig,
    rng: Mutex<StdRng>,
}

impl PipelineRewriter {
    pub fn new(
        oracle: Arc<dyn NlpOracle>,
        resources: ResolvedResources,
        policy: Policy,
        config: TransformationConfig,
    ) -> Self {
        PipelineRewriter {
            oracle,
            resources,
            policy,
            config,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Use a seeded generator so successive calls are reproducible.
    pub fn with_seed(self, seed: u64) -> Self {
        *self.rng.lock() = StdRng::seed_from_u64(seed);
        self
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }
}

#[async_trait]
impl TextRewriter for PipelineRewriter {
    async fn rewrite(&self, text: &str) -> Result<String> {
        let pipeline = Pipeline::new(self.oracle.as_ref(), self.resources.clone());
        let mut rng = self.rng.lock();
        pipeline.run(self.policy, text, &self.config, &mut *rng)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

/// Rewrites through a remote rewrite oracle with the humanizing prompt.
pub struct OracleRewriter {
    oracle: Arc<dyn RewriteOracle>,
    config: RewriteConfig,
}

impl OracleRewriter {
    pub fn new(oracle: Arc<dyn RewriteOracle>, config: RewriteConfig) -> Self {
        OracleRewriter { oracle, config }
    }
}

#[async_trait]
impl TextRewriter for OracleRewriter {
    async fn rewrite(&self, text: &str) -> Result<String> {
        let request = RewriteRequest::humanize(text, &self.config);
        self.oracle.rewrite(&request).await
    }

    fn name(&self) -> &'static str {
        "oracle"
    }
}
