//! # Rephrase
//!
//! Rewrite English text so it reads differently while keeping its meaning.
//!
//! ## Features
//!
//! - Synonym substitution, POS-naive or filtered and ranked by part of speech
//! - Emphasis words on adjectives
//! - Clause reordering, active/passive voice changes and varied sentence
//!   beginnings
//! - Four fixed policies: basic, contextual, structure and combined
//! - Seedable randomness for reproducible output
//! - Paragraph-by-paragraph document rewriting with per-unit failure isolation
//! - Optional rewriting through an Ollama model server, streamed or whole
//!
//! ## Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use rephrase::prelude::*;
//!
//! let session = Session::bundled().unwrap();
//! let config = TransformationConfig::default()
//!     .with_percent_synonyms(0)
//!     .with_percent_adjectives(0)
//!     .with_percent_reorder(0)
//!     .with_percent_beginning_vary(0)
//!     .with_percent_voice_change(100);
//! let mut rng = StdRng::seed_from_u64(1);
//! let output = session
//!     .structure_with_rng("The ball was thrown by John.", &config, &ResourceSelection::default(), &mut rng)
//!     .unwrap();
//! assert!(output == "John threw the ball." || output == "The ball was thrown by John.");
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod lexicon;
pub mod rewrite;
pub mod session;
pub mod transform;
pub mod util;

pub mod prelude {
    pub use crate::config::RephraseConfig;
    pub use crate::error::{RephraseError, Result};
    pub use crate::lexicon::selection::{AdjectiveSource, ResourceSelection, SynonymSource};
    pub use crate::rewrite::{RewriteConfig, RewriteOracle};
    pub use crate::session::Session;
    pub use crate::transform::config::TransformationConfig;
    pub use crate::transform::pipeline::Policy;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
