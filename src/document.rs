//! Document rewriting.
//!
//! Documents are read into a small structured model (paragraphs of formatted
//! runs, plus tables whose cells hold paragraphs), rewritten one paragraph at a
//! time and written back next to the input as `<stem>_edited<ext>`.
//!
//! # Core Components
//!
//! - [`model::Document`] - blocks, paragraphs, runs and their formatting
//! - [`codec::DocumentCodec`] - container formats (`.json`, `.txt`/`.md`)
//! - [`rewriter::TextRewriter`] - what rewrites a paragraph: a local policy or
//!   a remote rewrite oracle
//! - [`processor::DocumentProcessor`] - rewrites one document with per-paragraph
//!   failure isolation
//! - [`batch`] - isolated batches over text units and over directories
//!
//! # Examples
//!
//! ```
//! use rephrase::document::codec::{DocumentCodec, PlainTextCodec};
//!
//! let document = PlainTextCodec.decode("First paragraph.\n\nSecond one.\n").unwrap();
//! assert_eq!(document.paragraph_count(), 2);
//! assert_eq!(document.paragraphs()[1].text(), "Second one.");
//! ```

pub mod batch;
pub mod codec;
pub mod model;
pub mod processor;
pub mod rewriter;
