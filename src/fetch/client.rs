use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder};
use std::time::Duration;
use tracing::debug;

use super::TrophySource;
use crate::error::FetchError;
use crate::models::{DeckDetail, TrophyEntry};

pub(crate) const USER_AGENT: &str = concat!("trophy-harvest/", env!("CARGO_PKG_VERSION"));

/// Build a blocking client. `timeout` of `None` waits indefinitely.
pub(crate) fn http_client(timeout: Option<Duration>) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")
}

/// Send a request and return the body, treating any non-2xx status as a failure
pub(crate) fn get_text(request: RequestBuilder) -> Result<String, FetchError> {
    let response = request.send()?;
    let status = response.status();

    if !status.is_success() {
        return Err(FetchError::Status {
            url: response.url().to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response.text()?)
}

/// Client for the 17Lands trophy list and deck endpoints
pub struct SeventeenLandsClient {
    client: Client,
    trophies_url: String,
    deck_url: String,
    deck_timeout: Duration,
}

impl SeventeenLandsClient {
    pub fn new(trophies_url: &str, deck_url: &str, deck_timeout: Duration) -> Result<Self> {
        Ok(Self {
            // The trophy list can be slow to render upstream, so no client-wide timeout
            client: http_client(None)?,
            trophies_url: trophies_url.to_string(),
            deck_url: deck_url.to_string(),
            deck_timeout,
        })
    }
}

impl TrophySource for SeventeenLandsClient {
    fn fetch_trophies(&self, expansion: &str, format: &str) -> Result<Vec<TrophyEntry>, FetchError> {
        debug!(expansion, format, "fetching trophy list");
        let request = self
            .client
            .get(&self.trophies_url)
            .query(&[("expansion", expansion), ("format", format)]);

        let text = get_text(request)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn fetch_deck(&self, deck_id: &str) -> Result<DeckDetail, FetchError> {
        let request = self
            .client
            .get(&self.deck_url)
            .query(&[("draft_id", deck_id)])
            .timeout(self.deck_timeout);

        let text = get_text(request)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent() {
        assert!(USER_AGENT.starts_with("trophy-harvest/"));
    }

    #[test]
    fn test_trophy_list_decodes() {
        let text = r#"[
            {"time": "2024-11-21 02:14:55", "colors": "BG", "losses": 1,
             "end_rank": "platinum-3", "aggregate_id": "d1", "wins": 7},
            {"time": "2024-11-21 03:00:00", "colors": "R", "losses": 0,
             "end_rank": null, "aggregate_id": "d2"}
        ]"#;

        let entries: Vec<TrophyEntry> = serde_json::from_str(text).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].end_rank.as_deref(), Some("platinum-3"));
        assert_eq!(entries[1].end_rank, None);
    }
}
