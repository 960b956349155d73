use anyhow::Result;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

use super::client::{get_text, http_client};
use super::CardCatalog;
use crate::error::FetchError;
use crate::models::CardMetadata;

/// The subset of a Scryfall card object we keep
#[derive(Debug, Deserialize)]
struct ScryfallCard {
    name: String,
    #[serde(default)]
    cmc: f64,
    #[serde(default)]
    type_line: String,
    #[serde(default)]
    color_identity: Vec<String>,
    #[serde(default)]
    set: String,
    #[serde(default)]
    rarity: String,
}

impl From<ScryfallCard> for CardMetadata {
    fn from(card: ScryfallCard) -> Self {
        Self {
            name: card.name,
            cmc: card.cmc.max(0.0) as i64,
            type_line: card.type_line,
            color_identity: card.color_identity.join(","),
            set: card.set,
            rarity: card.rarity,
        }
    }
}

/// Parse a Scryfall card object into normalized metadata
pub fn parse_card(text: &str) -> Result<CardMetadata, FetchError> {
    let card: ScryfallCard = serde_json::from_str(text)?;
    Ok(card.into())
}

/// Fuzzy card lookups against the Scryfall API
pub struct ScryfallClient {
    client: Client,
    named_url: String,
}

impl ScryfallClient {
    pub fn new(named_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(Some(timeout))?,
            named_url: named_url.to_string(),
        })
    }
}

impl CardCatalog for ScryfallClient {
    fn lookup(&self, name: &str) -> Result<CardMetadata, FetchError> {
        let request = self.client.get(&self.named_url).query(&[("fuzzy", name)]);
        parse_card(&get_text(request)?)
    }
}
