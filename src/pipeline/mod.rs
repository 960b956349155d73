//! The scheduled harvest: new trophy decks first, then their cards

pub mod cards;
pub mod decks;
pub mod pacing;

pub use cards::*;
pub use decks::*;
pub use pacing::*;

use anyhow::Result;
use std::time::Instant;
use tracing::{error, info};

use crate::config::Config;
use crate::fetch::{CardCatalog, TagLookup, TrophySource};
use crate::writer::Store;

/// Upstream collaborators used by a run
pub struct Services<'a> {
    pub source: &'a dyn TrophySource,
    pub catalog: &'a dyn CardCatalog,
    pub tags: &'a dyn TagLookup,
}

/// Which stages a run performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Ingest new decks and expand them to cards
    Full,
    /// Ingest new decks only
    DecksOnly,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    pub decks_listed: usize,
    pub decks_new: usize,
    pub decks_processed: usize,
    pub decks_failed: usize,
    pub cards_inserted: usize,
}

/// One scheduled run.
///
/// Every failure, including an unreachable database, is logged and skipped;
/// the run always finishes with its completion line.
pub fn run(
    config: &Config,
    services: &Services,
    pacer: &mut dyn Pacer,
    mode: RunMode,
) -> Result<RunSummary> {
    info!("Starting scheduled tasks...");
    let start = Instant::now();

    let summary = match Store::open(&config.database) {
        Ok(mut store) => {
            info!(path = ?store.path(), "Opened database");
            harvest(config, services, &mut store, pacer, mode)
        }
        Err(e) => {
            error!("Failed to open the database, nothing was harvested: {:#}", e);
            RunSummary::default()
        }
    };

    info!(
        "Scheduled tasks completed. {} new decks, {} card rows in {:.1}s",
        summary.decks_new,
        summary.cards_inserted,
        start.elapsed().as_secs_f64()
    );

    Ok(summary)
}

fn harvest(
    config: &Config,
    services: &Services,
    store: &mut Store,
    pacer: &mut dyn Pacer,
    mode: RunMode,
) -> RunSummary {
    let ingest = ingest_decks(services.source, store, &config.expansion, &config.format);

    let mut summary = RunSummary {
        decks_listed: ingest.listed,
        decks_new: ingest.new_decks.len(),
        ..RunSummary::default()
    };

    if mode == RunMode::Full {
        let expanded = expand_to_cards(
            &ingest.new_decks,
            services.source,
            services.catalog,
            services.tags,
            store,
            pacer,
            &config.pacing,
        );
        summary.decks_processed = expanded.processed;
        summary.decks_failed = expanded.failed;
        summary.cards_inserted = expanded.cards_inserted;
    }

    summary
}
