use anyhow::{Context, Result};
use std::collections::HashSet;
use tracing::{error, info};

use crate::fetch::TrophySource;
use crate::models::TrophyDeck;
use crate::writer::Store;

/// Result of one trophy list poll
#[derive(Debug, Default)]
pub struct DeckIngest {
    /// Entries returned by the trophy list
    pub listed: usize,
    /// Decks not seen before, now stored, in listing order
    pub new_decks: Vec<TrophyDeck>,
}

/// Fetch the trophy list, store the unseen decks and return them.
///
/// Nothing is written unless the list was fetched and decoded.
pub fn fetch_new_decks(
    source: &dyn TrophySource,
    store: &mut Store,
    expansion: &str,
    format: &str,
) -> Result<DeckIngest> {
    let entries = source
        .fetch_trophies(expansion, format)
        .context("Failed to fetch trophy list")?;

    let candidates: Vec<TrophyDeck> = entries
        .iter()
        .map(|entry| TrophyDeck::from_entry(entry, expansion))
        .collect();
    info!("Parsed {} trophy entries.", candidates.len());

    let known = store.known_deck_ids()?;
    let new_decks = filter_new(candidates.clone(), &known);

    store
        .insert(&new_decks)
        .context("Failed to insert into trophy_decks")?;
    info!("{} new entries added to the 'trophy_decks' table.", new_decks.len());

    Ok(DeckIngest {
        listed: candidates.len(),
        new_decks,
    })
}

/// Like [`fetch_new_decks`], but any failure is logged and yields no decks
pub fn ingest_decks(
    source: &dyn TrophySource,
    store: &mut Store,
    expansion: &str,
    format: &str,
) -> DeckIngest {
    info!("Starting trophy list fetch for {} {}...", expansion, format);

    match fetch_new_decks(source, store, expansion, format) {
        Ok(ingest) => ingest,
        Err(e) => {
            error!("An error occurred: {:#}", e);
            DeckIngest::default()
        }
    }
}

/// Drop candidates already stored and repeats within the list itself
pub fn filter_new(candidates: Vec<TrophyDeck>, known: &HashSet<String>) -> Vec<TrophyDeck> {
    let mut seen: HashSet<String> = HashSet::new();
    candidates
        .into_iter()
        .filter(|deck| !known.contains(&deck.deck_id) && seen.insert(deck.deck_id.clone()))
        .collect()
}
