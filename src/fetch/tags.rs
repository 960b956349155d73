use anyhow::Result;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, warn};

use super::client::{get_text, http_client};
use super::{SheetSource, TagLookup};
use crate::error::FetchError;

#[derive(Debug, Deserialize)]
struct TagRow {
    name: String,
    #[serde(default)]
    tags: String,
}

fn rows(text: &str) -> impl Iterator<Item = Result<TagRow, csv::Error>> + '_ {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes())
        .into_deserialize()
}

/// Find the trimmed tags of the first row whose name matches exactly
pub fn find_tags(text: &str, card_name: &str) -> Result<Option<String>, FetchError> {
    for row in rows(text) {
        let row = row?;
        if row.name == card_name {
            return Ok(Some(row.tags.trim().to_string()));
        }
    }
    Ok(None)
}

/// Parse the whole sheet into a name -> tags map; the first row for a name wins
pub fn parse_sheet(text: &str) -> Result<HashMap<String, String>, FetchError> {
    let mut map = HashMap::new();
    for row in rows(text) {
        let row = row?;
        map.entry(row.name).or_insert_with(|| row.tags.trim().to_string());
    }
    Ok(map)
}

/// Remote CSV with `name` and `tags` columns
pub struct TagSheetClient {
    client: Client,
    url: String,
}

impl TagSheetClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(Some(timeout))?,
            url: url.to_string(),
        })
    }
}

impl SheetSource for TagSheetClient {
    fn fetch_sheet(&self) -> Result<String, FetchError> {
        get_text(self.client.get(&self.url))
    }
}

/// Downloads the sheet again for every card
impl TagLookup for TagSheetClient {
    fn tags_for(&self, card_name: &str) -> String {
        match self.fetch_sheet().and_then(|text| find_tags(&text, card_name)) {
            Ok(tags) => tags.unwrap_or_default(),
            Err(e) => {
                warn!(card = card_name, error = %e, "Error fetching tags");
                String::new()
            }
        }
    }
}

/// Loads the sheet on first use and answers every later lookup from memory.
///
/// A failed load is remembered as an empty sheet for the rest of the run.
pub struct CachedTags<S> {
    source: S,
    sheet: OnceCell<HashMap<String, String>>,
}

impl<S: SheetSource> CachedTags<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            sheet: OnceCell::new(),
        }
    }

    fn sheet(&self) -> &HashMap<String, String> {
        self.sheet.get_or_init(|| {
            match self.source.fetch_sheet().and_then(|text| parse_sheet(&text)) {
                Ok(map) => {
                    info!(entries = map.len(), "Loaded tag sheet");
                    map
                }
                Err(e) => {
                    warn!(error = %e, "Error fetching tags, continuing without them");
                    HashMap::new()
                }
            }
        })
    }
}

impl<S: SheetSource> TagLookup for CachedTags<S> {
    fn tags_for(&self, card_name: &str) -> String {
        self.sheet().get(card_name).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const SHEET: &str = "name,tags,notes\n\
                         Llanowar Elves, ramp ,\n\
                         Shock,removal;burn,cheap\n\
                         Shock,duplicate,\n";

    struct FakeSheet {
        text: Option<&'static str>,
        fetches: Cell<usize>,
    }

    impl SheetSource for FakeSheet {
        fn fetch_sheet(&self) -> Result<String, FetchError> {
            self.fetches.set(self.fetches.get() + 1);
            match self.text {
                Some(text) => Ok(text.to_string()),
                None => Err(FetchError::Status {
                    url: "https://example.test/tags.csv".to_string(),
                    status: 503,
                }),
            }
        }
    }

    #[test]
    fn test_find_tags() {
        assert_eq!(find_tags(SHEET, "Llanowar Elves").unwrap().as_deref(), Some("ramp"));
        assert_eq!(find_tags(SHEET, "Shock").unwrap().as_deref(), Some("removal;burn"));
        assert_eq!(find_tags(SHEET, "Island").unwrap(), None);
    }

    #[test]
    fn test_find_tags_is_exact() {
        assert_eq!(find_tags(SHEET, "shock").unwrap(), None);
        assert_eq!(find_tags(SHEET, "Llanowar").unwrap(), None);
    }

    #[test]
    fn test_find_tags_missing_name_column() {
        assert!(find_tags("card,tags\nShock,burn\n", "Shock").is_err());
    }

    #[test]
    fn test_parse_sheet_first_row_wins() {
        let sheet = parse_sheet(SHEET).unwrap();
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet["Shock"], "removal;burn");
    }

    #[test]
    fn test_cached_tags_fetches_once() {
        let tags = CachedTags::new(FakeSheet {
            text: Some(SHEET),
            fetches: Cell::new(0),
        });

        assert_eq!(tags.tags_for("Shock"), "removal;burn");
        assert_eq!(tags.tags_for("Llanowar Elves"), "ramp");
        assert_eq!(tags.tags_for("Island"), "");
        assert_eq!(tags.source.fetches.get(), 1);
    }

    #[test]
    fn test_cached_tags_failed_load() {
        let tags = CachedTags::new(FakeSheet {
            text: None,
            fetches: Cell::new(0),
        });

        assert_eq!(tags.tags_for("Shock"), "");
        assert_eq!(tags.tags_for("Shock"), "");
        assert_eq!(tags.source.fetches.get(), 1);
    }
}
