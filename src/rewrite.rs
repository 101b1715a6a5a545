//! Remote rewrite oracle.
//!
//! A rewrite oracle hands a whole passage to a text-generation model and gets
//! a rewritten passage back, either in one piece or as a stream of chunks.
//! [`ollama::OllamaClient`] talks to a local Ollama server.
//!
//! Dropping a [`ChunkStream`] before it ends cancels the request: the
//! underlying HTTP body is dropped with it and the connection is closed.

use std::pin::Pin;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod ollama;
pub mod prompt;

/// Ordered text chunks produced by a streaming rewrite.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Connection and generation settings for the rewrite oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Base URL of the model server.
    pub url: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        RewriteConfig {
            url: "http://localhost:11434".to_string(),
            model: "gpt-oss:120b-cloud".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            timeout_secs: 120,
        }
    }
}

impl RewriteConfig {
    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// One generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteRequest {
    pub prompt: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl RewriteRequest {
    pub fn new<P: Into<String>, M: Into<String>>(prompt: P, model: M) -> Self {
        let defaults = RewriteConfig::default();
        RewriteRequest {
            prompt: prompt.into(),
            model: model.into(),
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
        }
    }

    /// A request asking the model to make `text` read as if a person wrote it.
    pub fn humanize(text: &str, config: &RewriteConfig) -> Self {
        RewriteRequest {
            prompt: prompt::humanize_prompt(text),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// A text-generation backend.
#[async_trait]
pub trait RewriteOracle: Send + Sync {
    /// Generate the full rewrite in one response.
    async fn rewrite(&self, request: &RewriteRequest) -> Result<String>;

    /// Generate the rewrite as a stream of chunks.
    async fn rewrite_stream(&self, request: &RewriteRequest) -> Result<ChunkStream>;

    /// Get the name of this oracle.
    fn name(&self) -> &'static str;
}

/// Drain a chunk stream into one string, stopping at the first error.
pub async fn collect_stream(mut stream: ChunkStream) -> Result<String> {
    let mut text = String::new();
    while let Some(chunk) = stream.next().await {
        text.push_str(&chunk?);
    }
    Ok(text)
}
