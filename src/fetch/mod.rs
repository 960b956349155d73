//! Upstream services: 17Lands, Scryfall and the card tag sheet

pub mod catalog;
pub mod client;
pub mod tags;

pub use catalog::*;
pub use client::SeventeenLandsClient;
pub use tags::*;

use anyhow::Result;

use crate::config::Config;
use crate::error::FetchError;
use crate::models::{CardMetadata, DeckDetail, TrophyEntry};
use crate::pipeline::Services;

/// Source of trophy decks and their decklists
pub trait TrophySource {
    fn fetch_trophies(&self, expansion: &str, format: &str) -> Result<Vec<TrophyEntry>, FetchError>;
    fn fetch_deck(&self, deck_id: &str) -> Result<DeckDetail, FetchError>;
}

/// Card attribute lookup by (fuzzy) name
pub trait CardCatalog {
    fn lookup(&self, name: &str) -> Result<CardMetadata, FetchError>;
}

/// Card tag lookup; a miss or a failure yields an empty string
pub trait TagLookup {
    fn tags_for(&self, card_name: &str) -> String;
}

/// Raw CSV text of the tag sheet
pub trait SheetSource {
    fn fetch_sheet(&self) -> Result<String, FetchError>;
}

/// The production clients, built from configuration
pub struct HttpClients {
    pub lands: SeventeenLandsClient,
    pub scryfall: ScryfallClient,
    pub tags: Box<dyn TagLookup>,
}

impl HttpClients {
    pub fn from_config(config: &Config) -> Result<Self> {
        let sheet = TagSheetClient::new(&config.endpoints.tags, config.lookup_timeout)?;
        let tags: Box<dyn TagLookup> = if config.cache_tags {
            Box::new(CachedTags::new(sheet))
        } else {
            Box::new(sheet)
        };

        Ok(Self {
            lands: SeventeenLandsClient::new(
                &config.endpoints.trophies,
                &config.endpoints.deck,
                config.deck_timeout,
            )?,
            scryfall: ScryfallClient::new(&config.endpoints.catalog, config.lookup_timeout)?,
            tags,
        })
    }

    pub fn services(&self) -> Services<'_> {
        Services {
            source: &self.lands,
            catalog: &self.scryfall,
            tags: self.tags.as_ref(),
        }
    }
}
