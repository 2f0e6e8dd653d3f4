use std::path::Path;

use tracing::instrument;

use super::{load_patterns, table, terminal::Style};

#[instrument]
pub fn run(config_path: &Path) -> anyhow::Result<()> {
    let patterns = load_patterns(config_path)?;

    let style = Style::stdout();
    if patterns.is_empty() {
        println!("{}", style.notice("No patterns saved in config."));
    } else {
        print!("{}", table::render(&patterns, style));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_config_lists_nothing() {
        let tmp = tempdir().unwrap();
        run(&tmp.path().join("config.json")).unwrap();
    }
}
