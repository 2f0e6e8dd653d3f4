use std::path::Path;

use tracing::instrument;

use super::{load_patterns, terminal::Style};

#[derive(Debug)]
pub struct Command {
    pub alias: String,
}

impl Command {
    #[instrument]
    pub fn run(self, config_path: &Path) -> anyhow::Result<()> {
        let mut patterns = load_patterns(config_path)?;

        let count = patterns.len();
        patterns.retain(|pattern| pattern.alias() != self.alias);
        if patterns.len() == count {
            anyhow::bail!("Pattern {} not found in config", self.alias);
        }

        findme::storage::save(&patterns, Some(config_path))?;

        let message = format!("✅ Removed pattern {}", self.alias);
        println!("{}", Style::stdout().confirm(&message));
        Ok(())
    }
}
