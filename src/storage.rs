//! Persistence of saved patterns.
//!
//! Patterns are stored as a single JSON object mapping each alias to its
//! record. The whole collection is read on load and rewritten on save.

mod record;
mod store;

pub use store::{
    APP_NAME, CONFIG_FILE, LoadError, SaveError, default_location, load, location_for, save,
};
