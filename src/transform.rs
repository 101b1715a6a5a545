//! The text transformation pipeline.
//!
//! Engines, leaf first:
//!
//! - [`selector`] - POS filtering and ranking of synonym candidates
//! - [`basic::BasicEngine`] - POS-naive word substitution and emphasis
//! - [`contextual::ContextualEngine`] - tagged substitution followed by an
//!   emphasis pass over the re-tagged result
//! - [`structure::StructureEngine`] - clause reordering, voice conversion and
//!   beginning variation per sentence
//! - [`pipeline::Pipeline`] - the four fixed policies composed from the above
//!
//! Every engine takes its random source as a parameter so callers can inject a
//! seeded generator.

use rand::Rng;

pub mod basic;
pub mod config;
pub mod contextual;
pub mod emphasis;
pub mod pipeline;
pub mod quote;
pub mod selector;
pub mod structure;

/// Roll `[0, 100) < percent`: 0 never fires, 100 always does.
pub(crate) fn roll<R: Rng + ?Sized>(rng: &mut R, percent: u8) -> bool {
    rng.random_range(0..100u8) < percent
}

/// Fire with probability `p` in `[0, 1]`.
pub(crate) fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.random::<f64>() < p
}
