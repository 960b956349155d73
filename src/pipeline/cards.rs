use std::collections::HashMap;
use tracing::{error, info, warn};

use super::pacing::Pacer;
use crate::config::Pacing;
use crate::fetch::{CardCatalog, TagLookup, TrophySource};
use crate::models::{DeckDetail, TrophyCard, TrophyDeck};
use crate::writer::Store;

/// Counters for one card expansion pass
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExpandSummary {
    /// Decks whose detail was fetched, whether or not any card was stored
    pub processed: usize,
    /// Decks skipped because the detail request failed
    pub failed: usize,
    pub cards_inserted: usize,
}

/// Flatten a deck's maindeck into one row per distinct card.
///
/// Catalog and tag lookups happen once per distinct card; repeats only bump
/// `copies`. A card the catalog cannot resolve contributes nothing.
pub fn collect_deck_cards(
    deck_id: &str,
    detail: &DeckDetail,
    catalog: &dyn CardCatalog,
    tags: &dyn TagLookup,
) -> Vec<TrophyCard> {
    let mut rows: Vec<TrophyCard> = Vec::new();
    let mut by_name: HashMap<&str, usize> = HashMap::new();

    for card_ref in detail.maindeck_refs() {
        let Some(card) = detail.resolve(card_ref) else {
            warn!(deck = deck_id, card = %card_ref.key(), "Card missing from deck card list");
            continue;
        };

        if let Some(&idx) = by_name.get(card.name.as_str()) {
            rows[idx].copies += 1;
            continue;
        }

        let meta = match catalog.lookup(&card.name) {
            Ok(meta) => meta,
            Err(e) => {
                warn!("Failed to fetch data for card: {} ({})", card.name, e);
                continue;
            }
        };

        let card_tags = tags.tags_for(&card.name);
        by_name.insert(card.name.as_str(), rows.len());
        rows.push(TrophyCard::new(deck_id, &meta, card_tags));
    }

    rows
}

/// Fetch, flatten and store the cards of every deck, one deck at a time.
///
/// A failing deck is logged and skipped. Every deck is followed by a short
/// pause; every `pause_every` processed decks the pacer's long pause runs
/// and the store reconnects.
pub fn expand_to_cards(
    decks: &[TrophyDeck],
    source: &dyn TrophySource,
    catalog: &dyn CardCatalog,
    tags: &dyn TagLookup,
    store: &mut Store,
    pacer: &mut dyn Pacer,
    pacing: &Pacing,
) -> ExpandSummary {
    info!("Starting expansion to cards...");

    let mut summary = ExpandSummary::default();
    if decks.is_empty() {
        info!("No new decks to process.");
        return summary;
    }

    let total = decks.len();

    for deck in decks {
        let deck_id = deck.deck_id.as_str();

        match source.fetch_deck(deck_id) {
            Ok(detail) => {
                let cards = collect_deck_cards(deck_id, &detail, catalog, tags);

                if !cards.is_empty() {
                    match store.insert(&cards) {
                        Ok(n) => {
                            summary.cards_inserted += n;
                            info!("Inserted {} cards for deck '{}' into 'trophy_cards'.", n, deck_id);
                        }
                        Err(e) => {
                            error!("Error inserting data for deck '{}': {:#}", deck_id, e);
                        }
                    }
                }

                summary.processed += 1;
                if every(summary.processed, pacing.progress_every) {
                    info!("Processed {}/{} decks...", summary.processed, total);
                }
                if every(summary.processed, pacing.pause_every) {
                    pacer.long_pause();
                    if let Err(e) = store.reconnect() {
                        error!(path = ?store.path(), "Failed to reconnect to the database: {:#}", e);
                    }
                }
            }
            Err(e) => {
                summary.failed += 1;
                warn!(status = ?e.status(), "Failed to load deck '{}': {}", deck_id, e);
            }
        }

        pacer.short_pause();
    }

    summary
}

fn every(count: usize, n: usize) -> bool {
    n > 0 && count % n == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::models::CardMetadata;
    use std::cell::RefCell;

    #[derive(Default)]
    struct CountingCatalog {
        calls: RefCell<HashMap<String, usize>>,
        unknown: Vec<&'static str>,
    }

    impl CardCatalog for CountingCatalog {
        fn lookup(&self, name: &str) -> Result<CardMetadata, FetchError> {
            *self.calls.borrow_mut().entry(name.to_string()).or_default() += 1;
            if self.unknown.contains(&name) {
                return Err(FetchError::Status {
                    url: format!("https://api.scryfall.com/cards/named?fuzzy={}", name),
                    status: 404,
                });
            }
            Ok(CardMetadata {
                name: name.to_string(),
                cmc: 0,
                type_line: "Basic Land".to_string(),
                color_identity: String::new(),
                set: "fdn".to_string(),
                rarity: "common".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct CountingTags {
        calls: RefCell<HashMap<String, usize>>,
    }

    impl TagLookup for CountingTags {
        fn tags_for(&self, card_name: &str) -> String {
            *self.calls.borrow_mut().entry(card_name.to_string()).or_default() += 1;
            if card_name == "Island" {
                "land".to_string()
            } else {
                String::new()
            }
        }
    }

    fn detail(json: &str) -> DeckDetail {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_collect_counts_copies() {
        let detail = detail(
            r#"{"cards": {"7": {"name": "Island"}, "12": {"name": "Mountain"}},
                "groups": [{"name": "Maindeck", "cards": [7, 7, 12]}]}"#,
        );
        let catalog = CountingCatalog::default();
        let tags = CountingTags::default();

        let rows = collect_deck_cards("d1", &detail, &catalog, &tags);

        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].card_name.as_str(), rows[0].copies), ("Island", 2));
        assert_eq!((rows[1].card_name.as_str(), rows[1].copies), ("Mountain", 1));
        assert_eq!(rows[0].tags, "land");
        assert_eq!(rows[0].rarity, "C");
        assert_eq!(catalog.calls.borrow()["Island"], 1);
        assert_eq!(tags.calls.borrow()["Island"], 1);
    }

    #[test]
    fn test_collect_ignores_sideboard_and_missing_ids() {
        let detail = detail(
            r#"{"cards": {"1": {"name": "Shock"}, "2": {"name": "Negate"}},
                "groups": [
                    {"name": "Sideboard", "cards": [2]},
                    {"name": "Maindeck", "cards": [1, 99]}
                ]}"#,
        );
        let catalog = CountingCatalog::default();

        let rows = collect_deck_cards("d1", &detail, &catalog, &CountingTags::default());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].card_name, "Shock");
        assert!(!catalog.calls.borrow().contains_key("Negate"));
    }

    #[test]
    fn test_collect_skips_unknown_card() {
        let detail = detail(
            r#"{"cards": {"1": {"name": "Shock"}, "2": {"name": "Not A Card"}},
                "groups": [{"name": "Maindeck", "cards": [2, 1, 2]}]}"#,
        );
        let catalog = CountingCatalog {
            unknown: vec!["Not A Card"],
            ..Default::default()
        };
        let tags = CountingTags::default();

        let rows = collect_deck_cards("d1", &detail, &catalog, &tags);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].card_name, "Shock");
        // Each failed occurrence is looked up on its own; tags are never fetched for it
        assert_eq!(catalog.calls.borrow()["Not A Card"], 2);
        assert!(!tags.calls.borrow().contains_key("Not A Card"));
    }

    #[test]
    fn test_collect_without_maindeck() {
        let detail = detail(r#"{"cards": {}, "groups": []}"#);
        let rows = collect_deck_cards("d1", &detail, &CountingCatalog::default(), &CountingTags::default());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_every() {
        assert!(every(10, 10));
        assert!(!every(11, 10));
        assert!(!every(5, 0));
    }
}
