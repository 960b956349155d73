use directories::ProjectDirs;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_EXPANSION: &str = "FDN";
pub const DEFAULT_FORMAT: &str = "PremierDraft";

pub const TROPHIES_URL: &str = "https://www.17lands.com/data/trophies";
pub const DECK_URL: &str = "https://www.17lands.com/data/deck";
pub const CATALOG_URL: &str = "https://api.scryfall.com/cards/named";
pub const TAGS_URL: &str = "https://pavloatlas.com/trophy_decks/cards_tagged.csv";

const DB_FILE_NAME: &str = "trophy_decks.sqlite";

/// Everything a harvest run needs to know
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file
    pub database: PathBuf,
    pub expansion: String,
    pub format: String,
    pub endpoints: Endpoints,
    /// Timeout for a single deck detail request
    pub deck_timeout: Duration,
    /// Timeout for card catalog and tag sheet requests
    pub lookup_timeout: Duration,
    /// Load the tag sheet once per run instead of once per card
    pub cache_tags: bool,
    pub pacing: Pacing,
}

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub trophies: String,
    pub deck: String,
    pub catalog: String,
    pub tags: String,
}

/// Request pacing between and across decks
#[derive(Debug, Clone)]
pub struct Pacing {
    pub short_min: Duration,
    pub short_max: Duration,
    pub long_min: Duration,
    pub long_max: Duration,
    /// Log a progress line every N processed decks
    pub progress_every: usize,
    /// Take the long pause and reconnect every N processed decks
    pub pause_every: usize,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            trophies: TROPHIES_URL.to_string(),
            deck: DECK_URL.to_string(),
            catalog: CATALOG_URL.to_string(),
            tags: TAGS_URL.to_string(),
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            short_min: Duration::from_millis(50),
            short_max: Duration::from_millis(200),
            long_min: Duration::from_secs(300),
            long_max: Duration::from_secs(360),
            progress_every: 10,
            pause_every: 50,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            expansion: DEFAULT_EXPANSION.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            endpoints: Endpoints::default(),
            deck_timeout: Duration::from_secs(20),
            lookup_timeout: Duration::from_secs(10),
            cache_tags: false,
            pacing: Pacing::default(),
        }
    }
}

/// Database path under the platform data directory, or the working directory
/// when no home directory can be determined
pub fn default_database_path() -> PathBuf {
    match ProjectDirs::from("", "", "trophy-harvest") {
        Some(dirs) => dirs.data_dir().join(DB_FILE_NAME),
        None => PathBuf::from(DB_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pacing() {
        let pacing = Pacing::default();
        assert_eq!(pacing.progress_every, 10);
        assert_eq!(pacing.pause_every, 50);
        assert!(pacing.short_min < pacing.short_max);
        assert_eq!(pacing.long_min, Duration::from_secs(300));
        assert_eq!(pacing.long_max, Duration::from_secs(360));
    }

    #[test]
    fn test_default_database_path() {
        let path = default_database_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(DB_FILE_NAME));
    }
}
