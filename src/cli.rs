use std::path::{Path, PathBuf};

mod add;
mod list;
mod remove;
mod search;
mod table;
mod terminal;

use clap::{ArgAction, ArgGroup, builder::NonEmptyStringValueParser};
use findme::{LoadError, Pattern};

const DESCRIPTION: &str = "\
findme helps you find files quickly.

Save regex patterns under an alias with --add, then search for them with
`findme <alias>`. Manage saved patterns with --remove and --list.";

#[derive(Debug, clap::Parser)]
#[command(version, about, long_about = DESCRIPTION)]
#[command(group(
    ArgGroup::new("action")
        .args(["alias", "add", "remove", "list", "config_location"])
        .multiple(false)
))]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the config file [default: the platform config directory]
    #[arg(long, env = "FINDME_CONFIG", global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Alias of the saved pattern to search for
    #[arg(required_unless_present_any = ["add", "remove", "list", "config_location"])]
    alias: Option<String>,

    /// Directory to search in (defaults to the current directory)
    #[arg(requires = "alias")]
    search_root: Option<PathBuf>,

    /// Save a new pattern under this alias. Must be used with --pattern
    #[arg(
        short,
        long,
        value_name = "ALIAS",
        requires = "pattern",
        value_parser = NonEmptyStringValueParser::new()
    )]
    add: Option<String>,

    /// Regex pattern to save for the alias given to --add
    #[arg(short, long, value_name = "REGEX", requires = "add")]
    pattern: Option<String>,

    /// Only match the new pattern against files
    #[arg(short, long, requires = "add")]
    files_only: bool,

    /// Only match the new pattern against directories
    #[arg(short, long, requires = "add")]
    directories_only: bool,

    /// Remove the pattern saved under this alias
    #[arg(short, long, value_name = "ALIAS")]
    remove: Option<String>,

    /// List saved patterns
    #[arg(short, long)]
    list: bool,

    /// Print the location of the config file
    #[arg(long)]
    config_location: bool,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config_path = self
            .config
            .clone()
            .unwrap_or_else(findme::storage::default_location);

        self.into_command()?.run(&config_path)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }

    fn into_command(self) -> anyhow::Result<Command> {
        if let Some(alias) = self.add {
            let expression = self
                .pattern
                .ok_or_else(|| anyhow::anyhow!("Must use --add in conjunction with --pattern"))?;
            return Ok(Command::Add(add::Command {
                alias,
                expression,
                files_only: self.files_only,
                directories_only: self.directories_only,
            }));
        }

        if let Some(alias) = self.remove {
            return Ok(Command::Remove(remove::Command { alias }));
        }

        if self.list {
            return Ok(Command::List);
        }

        if self.config_location {
            return Ok(Command::ConfigLocation);
        }

        let alias = self
            .alias
            .ok_or_else(|| anyhow::anyhow!("No pattern alias given"))?;
        Ok(Command::Search(search::Command {
            alias,
            root: self.search_root.unwrap_or_else(|| PathBuf::from(".")),
        }))
    }
}

/// The action requested on the command line.
#[derive(Debug)]
enum Command {
    /// Search a directory tree with a saved pattern
    Search(search::Command),

    /// Save a new pattern
    Add(add::Command),

    /// Remove a saved pattern
    Remove(remove::Command),

    /// List saved patterns
    List,

    /// Print the config file location
    ConfigLocation,
}

impl Command {
    fn run(self, config_path: &Path) -> anyhow::Result<()> {
        match self {
            Self::Search(command) => command.run(config_path)?,
            Self::Add(command) => command.run(config_path)?,
            Self::Remove(command) => command.run(config_path)?,
            Self::List => list::run(config_path)?,
            Self::ConfigLocation => println!("{}", config_path.display()),
        }
        Ok(())
    }
}

/// Loads saved patterns, treating a missing config file as empty.
fn load_patterns(config_path: &Path) -> anyhow::Result<Vec<Pattern>> {
    match findme::storage::load(Some(config_path)) {
        Ok(patterns) => Ok(patterns),
        Err(LoadError::NotFound(path)) => {
            tracing::debug!("No config file at {}, using no patterns", path.display());
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::tempdir;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("findme").chain(args.iter().copied()))
    }

    #[test]
    fn alias_parses_as_search_with_default_root() {
        let command = parse(&["py"]).unwrap().into_command().unwrap();

        let Command::Search(search) = command else {
            panic!("expected search command");
        };
        assert_eq!(search.alias, "py");
        assert_eq!(search.root, PathBuf::from("."));
    }

    #[test]
    fn search_root_is_passed_through() {
        let command = parse(&["py", "some/dir"]).unwrap().into_command().unwrap();

        let Command::Search(search) = command else {
            panic!("expected search command");
        };
        assert_eq!(search.root, PathBuf::from("some/dir"));
    }

    #[test]
    fn add_parses_flags() {
        let command = parse(&["--add", "py", "--pattern", r"\.py$", "--files-only"])
            .unwrap()
            .into_command()
            .unwrap();

        let Command::Add(add) = command else {
            panic!("expected add command");
        };
        assert_eq!(add.alias, "py");
        assert_eq!(add.expression, r"\.py$");
        assert!(add.files_only);
        assert!(!add.directories_only);
    }

    #[test]
    fn add_without_pattern_is_rejected() {
        assert!(parse(&["--add", "py"]).is_err());
    }

    #[test]
    fn pattern_without_add_is_rejected() {
        assert!(parse(&["--pattern", "x"]).is_err());
    }

    #[test]
    fn empty_alias_for_add_is_rejected() {
        assert!(parse(&["--add", "", "--pattern", "x"]).is_err());
    }

    #[test]
    fn actions_are_mutually_exclusive() {
        assert!(parse(&["--list", "--remove", "py"]).is_err());
        assert!(parse(&["py", "--list"]).is_err());
    }

    #[test]
    fn no_action_is_rejected() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn list_and_remove_parse() {
        assert!(matches!(
            parse(&["--list"]).unwrap().into_command().unwrap(),
            Command::List
        ));
        assert!(matches!(
            parse(&["-r", "py"]).unwrap().into_command().unwrap(),
            Command::Remove(remove) if remove.alias == "py"
        ));
    }

    #[test]
    fn load_patterns_treats_missing_file_as_empty() {
        let tmp = tempdir().unwrap();
        let patterns = load_patterns(&tmp.path().join("missing.json")).unwrap();
        assert!(patterns.is_empty());
    }

    #[test]
    fn load_patterns_propagates_parse_errors() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, "{").unwrap();

        assert!(load_patterns(&path).is_err());
    }
}
