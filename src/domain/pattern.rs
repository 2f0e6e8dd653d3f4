use std::fmt;

use regex::Regex;

/// A named search rule.
///
/// The expression is compiled when the pattern is constructed, so a
/// [`Pattern`] always holds a valid regular expression. Equality compares the
/// alias, the expression text and both scope flags.
#[derive(Debug, Clone)]
pub struct Pattern {
    alias: String,
    regex: Regex,

    /// Whether this pattern is only tested against file names.
    pub files_only: bool,

    /// Whether this pattern is only tested against directory names.
    ///
    /// If both this and `files_only` are set, the pattern matches nothing.
    pub directories_only: bool,
}

impl Pattern {
    /// Creates a pattern that applies to both files and directories.
    ///
    /// The alias is taken as given. An empty alias is accepted.
    ///
    /// # Errors
    ///
    /// Returns an [`IllegalPatternError`] if `expression` does not compile as
    /// a regular expression.
    pub fn new(alias: impl Into<String>, expression: &str) -> Result<Self, IllegalPatternError> {
        let regex = Regex::new(expression).map_err(|source| IllegalPatternError {
            expression: expression.to_string(),
            source,
        })?;

        Ok(Self {
            alias: alias.into(),
            regex,
            files_only: false,
            directories_only: false,
        })
    }

    /// Restricts the pattern to files.
    #[must_use]
    pub const fn only_files(mut self) -> Self {
        self.files_only = true;
        self
    }

    /// Restricts the pattern to directories.
    #[must_use]
    pub const fn only_directories(mut self) -> Self {
        self.directories_only = true;
        self
    }

    /// The alias this pattern is saved under.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The source text of the regular expression.
    #[must_use]
    pub fn expression(&self) -> &str {
        self.regex.as_str()
    }

    /// The compiled regular expression.
    #[must_use]
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.alias == other.alias
            && self.expression() == other.expression()
            && self.files_only == other.files_only
            && self.directories_only == other.directories_only
    }
}

impl Eq for Pattern {}

/// The kind of a filesystem entry considered by a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A regular file, or anything that is not a directory.
    File,
    /// A directory.
    Directory,
}

impl EntryKind {
    /// Whether an entry of this kind survives the given scope flags.
    ///
    /// Directories are excluded by `files_only`, files by `directories_only`.
    #[must_use]
    pub const fn admitted_by(self, files_only: bool, directories_only: bool) -> bool {
        match self {
            Self::File => !directories_only,
            Self::Directory => !files_only,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Directory => "directory",
        })
    }
}

/// A pattern's expression could not be compiled.
#[derive(Debug, thiserror::Error)]
#[error("illegal pattern '{expression}'")]
pub struct IllegalPatternError {
    expression: String,
    #[source]
    source: regex::Error,
}

impl IllegalPatternError {
    /// The expression that failed to compile.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }
}
