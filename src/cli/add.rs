use std::path::Path;

use findme::Pattern;
use tracing::instrument;

use super::{load_patterns, table, terminal::Style};

#[derive(Debug)]
pub struct Command {
    pub alias: String,
    pub expression: String,
    pub files_only: bool,
    pub directories_only: bool,
}

impl Command {
    #[instrument]
    pub fn run(self, config_path: &Path) -> anyhow::Result<()> {
        // Reject a bad expression before touching the config file
        let mut pattern = Pattern::new(self.alias, &self.expression)?;
        pattern.files_only = self.files_only;
        pattern.directories_only = self.directories_only;

        let mut patterns = load_patterns(config_path)?;
        patterns.push(pattern.clone());
        findme::storage::save(&patterns, Some(config_path))?;

        tracing::info!("Added pattern '{}'", pattern.alias());

        println!("Added the following pattern:");
        print!("{}", table::render(std::slice::from_ref(&pattern), Style::stdout()));

        Ok(())
    }
}
