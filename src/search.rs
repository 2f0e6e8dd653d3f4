//! Recursive search of a directory tree by entry name.
//!
//! [`find`] walks the tree below a root directory and yields every file or
//! directory whose name matches a regular expression. Results are produced
//! lazily as the walk proceeds.
//!
//! Only the entry's own name is tested, never its full path. The expression
//! may match anywhere in the name; use `^` and `$` to anchor it.
//!
//! Symbolic links are not descended into, so link cycles cannot cause an
//! endless walk. A link is classified by its target: a link to a directory is
//! a directory, anything else (including a dangling link) is a file.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use regex::Regex;
use walkdir::{DirEntry, WalkDir};

use crate::domain::{EntryKind, Pattern};

/// Searches `root` for entries matching the given pattern.
///
/// This is [`find`] with the pattern's expression and scope flags.
///
/// # Errors
///
/// See [`find`].
pub fn find_pattern(root: &Path, pattern: &Pattern) -> Result<Matches, SearchError> {
    find(
        root,
        pattern.regex(),
        pattern.files_only,
        pattern.directories_only,
    )
}

/// Recursively searches `root` for entries whose name matches `expression`.
///
/// Directories are excluded from the results when `files_only` is set, and
/// files are excluded when `directories_only` is set. If both are set,
/// nothing matches. The root itself is never a candidate.
///
/// The returned iterator walks the tree as it is consumed, one directory at
/// a time. A directory's own matches are yielded before anything below it.
/// Entries within a directory are visited in file name order. Calling this
/// again walks the tree from scratch.
///
/// # Errors
///
/// Returns [`SearchError::NotFound`] if `root` does not exist,
/// [`SearchError::NotADirectory`] if it is not a directory, or
/// [`SearchError::Io`] if it cannot be inspected. Errors encountered below
/// the root are yielded by the iterator.
pub fn find(
    root: &Path,
    expression: &Regex,
    files_only: bool,
    directories_only: bool,
) -> Result<Matches, SearchError> {
    match fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => return Err(SearchError::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(SearchError::NotFound(root.to_path_buf()));
        }
        Err(source) => {
            return Err(SearchError::Io {
                root: root.to_path_buf(),
                source,
            });
        }
    }

    tracing::debug!(
        "Searching {} for '{}' (files only: {files_only}, directories only: {directories_only})",
        root.display(),
        expression.as_str(),
    );

    Ok(Matches {
        pending: vec![root.to_path_buf()],
        level: Vec::new().into_iter(),
        expression: expression.clone(),
        files_only,
        directories_only,
    })
}

/// A lazy sequence of search results.
///
/// Created by [`find`] and [`find_pattern`]. The tree is read one directory
/// at a time: all matches among a directory's children are yielded before
/// any of its subdirectories is read.
pub struct Matches {
    /// Directories still to be read, next on top.
    pending: Vec<PathBuf>,
    /// Children of the directory currently being matched.
    level: std::vec::IntoIter<Result<DirEntry, walkdir::Error>>,
    expression: Regex,
    files_only: bool,
    directories_only: bool,
}

impl Matches {
    fn read_level(&mut self, dir: &Path) {
        tracing::debug!("Entering {}", dir.display());

        let children: Vec<_> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .collect();

        // Reversed so the stack reads sibling directories in name order
        self.pending.extend(
            children
                .iter()
                .rev()
                .filter_map(|child| child.as_ref().ok())
                .filter(|child| child.file_type().is_dir())
                .map(|child| child.path().to_path_buf()),
        );
        self.level = children.into_iter();
    }

    fn try_match(&self, entry: DirEntry) -> Option<Match> {
        let kind = entry_kind(&entry);
        if !kind.admitted_by(self.files_only, self.directories_only) {
            return None;
        }

        let name = entry.file_name().to_string_lossy();
        if !self.expression.is_match(&name) {
            return None;
        }

        let name = name.into_owned();
        Some(Match {
            name,
            path: entry.into_path(),
            kind,
        })
    }
}

impl Iterator for Matches {
    type Item = Result<Match, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.files_only && self.directories_only {
            return None;
        }

        loop {
            match self.level.next() {
                Some(Ok(entry)) => {
                    if let Some(found) = self.try_match(entry) {
                        return Some(Ok(found));
                    }
                }
                Some(Err(e)) => return Some(Err(e.into())),
                None => {
                    let dir = self.pending.pop()?;
                    self.read_level(&dir);
                }
            }
        }
    }
}

impl fmt::Debug for Matches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matches")
            .field("expression", &self.expression.as_str())
            .field("files_only", &self.files_only)
            .field("directories_only", &self.directories_only)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

fn entry_kind(entry: &DirEntry) -> EntryKind {
    let is_dir = if entry.path_is_symlink() {
        fs::metadata(entry.path()).is_ok_and(|metadata| metadata.is_dir())
    } else {
        entry.file_type().is_dir()
    };

    if is_dir {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

/// A filesystem entry whose name matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    name: String,
    path: PathBuf,
    kind: EntryKind,
}

impl Match {
    /// The entry's file name, as tested against the expression.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entry's path, starting with the search root.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the entry is a file or a directory.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Consumes the match, returning its path.
    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Errors that can occur when searching a directory tree.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The search root does not exist.
    #[error("search root {} not found", .0.display())]
    NotFound(PathBuf),

    /// The search root is not a directory.
    #[error("search root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The search root could not be inspected.
    #[error("failed to read search root {}", root.display())]
    Io {
        /// The search root.
        root: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// An entry below the root could not be read.
    #[error("failed to walk directory tree")]
    Walk(#[from] walkdir::Error),
}
