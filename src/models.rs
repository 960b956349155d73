//! Row types stored in the database and the upstream JSON shapes they come from

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::normalize::{shorten_rank, shorten_rarity};

/// Name of the deck group that holds the main 40 cards
pub const MAINDECK_GROUP: &str = "Maindeck";

// =============================================================================
// Stored rows
// =============================================================================

/// One row of `trophy_decks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrophyDeck {
    pub deck_id: String,
    pub date: String,
    pub expansion: String,
    pub colors: Option<String>,
    pub losses: Option<i64>,
    pub result_rank: Option<String>,
}

impl TrophyDeck {
    /// Build a deck row from a trophy list entry for the given expansion
    pub fn from_entry(entry: &TrophyEntry, expansion: &str) -> Self {
        Self {
            deck_id: entry.aggregate_id.clone(),
            date: entry.time.clone(),
            expansion: expansion.to_lowercase(),
            colors: entry.colors.clone(),
            losses: entry.losses,
            result_rank: shorten_rank(entry.end_rank.as_deref()),
        }
    }
}

/// One row of `trophy_cards`: a distinct maindeck card within one deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrophyCard {
    pub deck_id: String,
    pub card_name: String,
    pub copies: i64,
    pub cmc: i64,
    pub type_line: String,
    pub color_identity: String,
    pub set_code: String,
    pub rarity: String,
    pub tags: String,
}

impl TrophyCard {
    /// First sighting of a card in a deck
    pub fn new(deck_id: &str, meta: &CardMetadata, tags: String) -> Self {
        Self {
            deck_id: deck_id.to_string(),
            card_name: meta.name.clone(),
            copies: 1,
            cmc: meta.cmc,
            type_line: meta.type_line.clone(),
            color_identity: meta.color_identity.clone(),
            set_code: meta.set.clone(),
            rarity: shorten_rarity(&meta.rarity),
            tags,
        }
    }
}

/// Normalized card attributes from the card catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardMetadata {
    pub name: String,
    pub cmc: i64,
    pub type_line: String,
    /// Color codes joined with commas, e.g. `"U,R"`
    pub color_identity: String,
    pub set: String,
    pub rarity: String,
}

// =============================================================================
// Upstream JSON
// =============================================================================

/// Entry of the 17Lands trophy list. Missing or null fields are stored as NULL.
#[derive(Debug, Clone, Deserialize)]
pub struct TrophyEntry {
    pub time: String,
    #[serde(default)]
    pub colors: Option<String>,
    #[serde(default)]
    pub losses: Option<i64>,
    #[serde(default)]
    pub end_rank: Option<String>,
    pub aggregate_id: String,
}

/// Full decklist of one trophy deck. A payload without `cards` or `groups`
/// fails to decode, so the deck is skipped like any other failed fetch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckDetail {
    /// Card details keyed by the identifier used in `groups`
    pub cards: HashMap<String, DeckCard>,
    pub groups: Vec<DeckGroup>,
}

impl DeckDetail {
    /// Card references of every maindeck group, in listing order
    pub fn maindeck_refs(&self) -> impl Iterator<Item = &CardRef> {
        self.groups
            .iter()
            .filter(|g| g.name == MAINDECK_GROUP)
            .flat_map(|g| g.cards.iter())
    }

    /// Resolve a card reference against the card dictionary
    pub fn resolve(&self, card: &CardRef) -> Option<&DeckCard> {
        self.cards.get(&card.key())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeckCard {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeckGroup {
    pub name: String,
    #[serde(default)]
    pub cards: Vec<CardRef>,
}

/// Card identifier inside a group; 17Lands sends numbers, older payloads strings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CardRef {
    Id(u64),
    Key(String),
}

impl CardRef {
    pub fn key(&self) -> String {
        match self {
            CardRef::Id(id) => id.to_string(),
            CardRef::Key(key) => key.clone(),
        }
    }
}
