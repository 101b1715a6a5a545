//! Top-level configuration.
//!
//! A [`RephraseConfig`] bundles the transformation parameters, the resource
//! selection and the rewrite-oracle settings. It can be read from a JSON file;
//! any field left out takes its default.
//!
//! ```json
//! {
//!   "policy": "combined",
//!   "transformation": { "percent_synonyms": 40, "ignore_quotes": true },
//!   "resources": { "synonyms": "secondary", "common_words_only": true },
//!   "rewrite": { "model": "llama3", "timeout_secs": 60 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RephraseError, Result};
use crate::lexicon::selection::ResourceSelection;
use crate::rewrite::RewriteConfig;
use crate::transform::config::TransformationConfig;
use crate::transform::pipeline::Policy;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RephraseConfig {
    /// Policy used when a command does not name one.
    pub policy: Policy,
    pub transformation: TransformationConfig,
    pub resources: ResourceSelection,
    pub rewrite: RewriteConfig,
}

impl RephraseConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RephraseConfig = serde_json::from_str(json)
            .map_err(|e| RephraseError::configuration(format!("Invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RephraseError::configuration(format!(
                "Failed to read configuration {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<()> {
        self.transformation.validate()?;
        if self.rewrite.timeout_secs == 0 {
            return Err(RephraseError::configuration("rewrite.timeout_secs must be positive"));
        }
        Ok(())
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_transformation(mut self, transformation: TransformationConfig) -> Self {
        self.transformation = transformation;
        self
    }

    pub fn with_resources(mut self, resources: ResourceSelection) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_rewrite(mut self, rewrite: RewriteConfig) -> Self {
        self.rewrite = rewrite;
        self
    }
}
