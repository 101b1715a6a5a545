//! Lexical resources: synonym lists, adjective and common-word sets.
//!
//! Resources are loaded once into a [`store::LexicalStore`] and are read-only
//! afterwards. Engines never see resource names; a
//! [`selection::ResourceSelection`] is resolved into shared handles
//! ([`store::ResolvedResources`]) before any engine runs.

pub mod selection;
pub mod store;
pub mod synonyms;
pub mod words;
