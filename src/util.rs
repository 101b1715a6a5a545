//! Shared utility modules used across Rephrase components.

pub mod text;
