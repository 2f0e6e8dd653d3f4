//! Domain models for saved search patterns.
//!
//! A [`Pattern`] pairs a user-chosen alias with a compiled regular expression
//! and the kinds of filesystem entry it applies to.

/// The pattern data model.
pub mod pattern;
pub use pattern::{EntryKind, IllegalPatternError, Pattern};
