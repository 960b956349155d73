use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, DEFAULT_EXPANSION, DEFAULT_FORMAT};

#[derive(Parser, Debug)]
#[command(name = "trophy-harvest")]
#[command(version, about = "Harvest 17Lands trophy decks and their cards into SQLite")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub options: Options,
}

/// Every option can also come from the environment, so the binary runs bare on a schedule
#[derive(Args, Debug, Clone)]
pub struct Options {
    /// SQLite database path (`sqlite://` prefix accepted)
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database: Option<String>,

    /// Set code to poll
    #[arg(long, env = "TROPHY_EXPANSION", default_value = DEFAULT_EXPANSION, global = true)]
    pub expansion: String,

    /// Event format to poll
    #[arg(long, env = "TROPHY_FORMAT", default_value = DEFAULT_FORMAT, global = true)]
    pub format: String,

    /// Override the tag sheet URL
    #[arg(long, env = "TROPHY_TAGS_URL", global = true)]
    pub tags_url: Option<String>,

    /// Download the tag sheet once per run instead of once per card
    #[arg(long, env = "TROPHY_CACHE_TAGS", global = true)]
    pub cache_tags: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Ingest new trophy decks and expand them to cards (default)
    Run,

    /// Ingest new trophy decks without fetching their cards
    Decks,

    /// List the tables written by the harvester
    ListTables,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Run)
    }

    /// Apply the options on top of the defaults
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        let opts = &self.options;

        if let Some(database) = &opts.database {
            config.database = database_path(database);
        }
        config.expansion = opts.expansion.clone();
        config.format = opts.format.clone();
        if let Some(url) = &opts.tags_url {
            config.endpoints.tags = url.clone();
        }
        config.cache_tags = opts.cache_tags;

        config
    }
}

/// Accept either a bare path or a `sqlite:` URL
pub fn database_path(url: &str) -> PathBuf {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path() {
        assert_eq!(database_path("sqlite:///var/lib/t.db"), PathBuf::from("/var/lib/t.db"));
        assert_eq!(database_path("sqlite:t.db"), PathBuf::from("t.db"));
        assert_eq!(database_path("data/t.db"), PathBuf::from("data/t.db"));
    }

    #[test]
    fn test_bare_invocation_runs() {
        let cli = Cli::try_parse_from(["trophy-harvest"]).unwrap();
        assert_eq!(cli.command(), Commands::Run);
    }

    #[test]
    fn test_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "trophy-harvest",
            "decks",
            "--expansion",
            "DSK",
            "--database",
            "sqlite://x.db",
            "--cache-tags",
        ])
        .unwrap();

        assert_eq!(cli.command(), Commands::Decks);
        let config = cli.config();
        assert_eq!(config.expansion, "DSK");
        assert_eq!(config.database, PathBuf::from("x.db"));
        assert!(config.cache_tags);
    }
}
