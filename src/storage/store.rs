//! Loading and saving the pattern config file.

use std::{
    collections::HashSet,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use super::record::{PatternRecord, PatternTable};
use crate::domain::{IllegalPatternError, Pattern};

/// The application name used to namespace the config directory.
pub const APP_NAME: &str = "findme";

/// The name of the config file inside the application's config directory.
pub const CONFIG_FILE: &str = "config.json";

/// Returns the default config file location for this application.
///
/// See [`location_for`].
#[must_use]
pub fn default_location() -> PathBuf {
    location_for(APP_NAME)
}

/// Returns the config file location for the named application.
///
/// This is `<config dir>/<app_name>/config.json`, where the config directory
/// is the platform's per-user config directory:
/// - Linux: `$XDG_CONFIG_HOME` or `~/.config`
/// - macOS: `~/Library/Application Support`
/// - Windows: `%APPDATA%`
///
/// If the platform has no such directory, falls back to
/// `.<app_name>/config.json` relative to the current directory.
/// No filesystem access is performed.
#[must_use]
pub fn location_for(app_name: &str) -> PathBuf {
    dirs::config_dir()
        .map_or_else(|| PathBuf::from(format!(".{app_name}")), |dir| dir.join(app_name))
        .join(CONFIG_FILE)
}

/// Loads all saved patterns, in the order they appear in the file.
///
/// Reads from `path`, or from [`default_location`] if `path` is `None`.
///
/// # Errors
///
/// - [`LoadError::NotFound`] if the file does not exist. This is never
///   translated into an empty collection here.
/// - [`LoadError::Io`] if the file cannot be read.
/// - [`LoadError::Parse`] if the file is not a valid pattern mapping.
/// - [`LoadError::IllegalPattern`] if a stored expression does not compile.
/// - [`LoadError::DuplicateAlias`] if the file repeats an alias.
pub fn load(path: Option<&Path>) -> Result<Vec<Pattern>, LoadError> {
    let path = path.map_or_else(default_location, Path::to_path_buf);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(LoadError::NotFound(path)),
        Err(source) => return Err(LoadError::Io { path, source }),
    };

    let table: PatternTable = serde_json::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.clone(),
        source,
    })?;

    let mut seen = HashSet::with_capacity(table.0.len());
    let patterns = table
        .0
        .into_iter()
        .map(|(alias, record)| {
            if !seen.insert(alias.clone()) {
                return Err(LoadError::DuplicateAlias(alias));
            }
            record.into_pattern(alias).map_err(LoadError::from)
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("Loaded {} patterns from {}", patterns.len(), path.display());
    Ok(patterns)
}

/// Saves the full pattern collection, replacing the existing file.
///
/// Writes to `path`, or to [`default_location`] if `path` is `None`. Missing
/// parent directories are created.
///
/// The collection is checked for duplicate aliases before anything touches
/// the filesystem. The file is then written to a temporary sibling and
/// renamed over the target, so a failed save leaves the previous file intact.
/// An existing file's permissions carry over to its replacement. A newly
/// created file is readable and writable by its owner only.
///
/// # Errors
///
/// - [`SaveError::DuplicateAlias`] if two patterns share an alias. Nothing is
///   written in this case.
/// - [`SaveError::Serialize`] if the collection cannot be serialized.
/// - [`SaveError::Io`] if the file cannot be written.
pub fn save(patterns: &[Pattern], path: Option<&Path>) -> Result<(), SaveError> {
    let table = to_table(patterns)?;
    let path = path.map_or_else(default_location, Path::to_path_buf);

    let mut content = serde_json::to_string_pretty(&table)?;
    content.push('\n');

    write_atomically(&path, content.as_bytes())?;

    tracing::debug!("Saved {} patterns to {}", patterns.len(), path.display());
    Ok(())
}

fn to_table(patterns: &[Pattern]) -> Result<PatternTable, SaveError> {
    let mut seen = HashSet::with_capacity(patterns.len());
    patterns
        .iter()
        .map(|pattern| {
            if !seen.insert(pattern.alias()) {
                return Err(SaveError::DuplicateAlias(pattern.alias().to_string()));
            }
            Ok((pattern.alias().to_string(), PatternRecord::from(pattern)))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(PatternTable)
}

fn write_atomically(path: &Path, content: &[u8]) -> Result<(), SaveError> {
    let io_error = |source: io::Error| SaveError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(io_error)?;

    let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;

    // The temporary file is created owner-only; a replaced config keeps its mode
    if let Ok(existing) = fs::metadata(path) {
        file.as_file()
            .set_permissions(existing.permissions())
            .map_err(io_error)?;
    }

    file.write_all(content).map_err(io_error)?;
    file.as_file().sync_all().map_err(io_error)?;
    file.persist(path).map_err(|e| io_error(e.error))?;

    Ok(())
}

/// Errors that can occur when loading the config file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The config file does not exist.
    #[error("config file {} not found", .0.display())]
    NotFound(PathBuf),

    /// The config file could not be read.
    #[error("failed to read config file {}", path.display())]
    Io {
        /// The config file path.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The config file is not a valid pattern mapping.
    #[error("failed to parse config file {}", path.display())]
    Parse {
        /// The config file path.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A stored expression is not a valid regular expression.
    #[error(transparent)]
    IllegalPattern(#[from] IllegalPatternError),

    /// The config file contains the same alias more than once.
    #[error("alias '{0}' appears more than once in config file")]
    DuplicateAlias(String),
}

/// Errors that can occur when saving the config file.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// Two patterns share an alias.
    #[error("alias '{0}' already present in config")]
    DuplicateAlias(String),

    /// The patterns could not be serialized.
    #[error("failed to serialize config")]
    Serialize(#[from] serde_json::Error),

    /// The config file could not be written.
    #[error("failed to write config file {}", path.display())]
    Io {
        /// The config file path.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}
