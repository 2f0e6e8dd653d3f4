use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use tracing::instrument;

use super::load_patterns;

#[derive(Debug)]
pub struct Command {
    pub alias: String,
    pub root: PathBuf,
}

impl Command {
    #[instrument]
    pub fn run(self, config_path: &Path) -> anyhow::Result<()> {
        let patterns = load_patterns(config_path)?;

        let Some(pattern) = patterns.iter().find(|pattern| pattern.alias() == self.alias) else {
            anyhow::bail!("Pattern {} not found", self.alias);
        };

        let matches = findme::search::find_pattern(&self.root, pattern)?;

        let mut stdout = io::stdout().lock();
        let mut count = 0_usize;
        for found in matches {
            let found = found?;
            tracing::trace!("Matched {} {}", found.kind(), found.name());
            let path = found.into_path();
            match writeln!(stdout, "{}", path.display()) {
                Ok(()) => count += 1,
                // Reader went away (e.g. piped into `head`)
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(()),
                Err(e) => return Err(e).context("failed to write search results"),
            }
        }

        tracing::info!("Found {count} entries matching '{}'", pattern.alias());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use findme::Pattern;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_alias_fails_before_searching() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.json");
        findme::storage::save(&[Pattern::new("py", r"\.py$").unwrap()], Some(&path)).unwrap();

        let error = Command {
            alias: "rs".to_string(),
            root: tmp.path().join("does-not-exist"),
        }
        .run(&path)
        .unwrap_err();

        assert_eq!(error.to_string(), "Pattern rs not found");
    }

    #[test]
    fn missing_root_is_reported() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.json");
        findme::storage::save(&[Pattern::new("py", r"\.py$").unwrap()], Some(&path)).unwrap();

        let error = Command {
            alias: "py".to_string(),
            root: tmp.path().join("does-not-exist"),
        }
        .run(&path)
        .unwrap_err();

        assert!(error.to_string().contains("not found"));
    }

    #[test]
    fn searches_with_saved_pattern() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.json");
        let root = tmp.path().join("tree");
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::write(root.join("src/main.py"), "").unwrap();
        findme::storage::save(&[Pattern::new("py", r"\.py$").unwrap()], Some(&path)).unwrap();

        Command {
            alias: "py".to_string(),
            root,
        }
        .run(&path)
        .unwrap();
    }
}
