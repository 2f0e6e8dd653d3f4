//! Named regex patterns for finding files
//!
//! Patterns are saved under an alias in a JSON config file, and later used to
//! search a directory tree for matching file and directory names.

pub mod domain;
pub use domain::{EntryKind, IllegalPatternError, Pattern};

/// Config file persistence for saved patterns.
pub mod storage;
pub use storage::{LoadError, SaveError};

/// Recursive directory search.
pub mod search;
pub use search::{Match, Matches, SearchError};
