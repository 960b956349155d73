use anyhow::{Context, Result};
use rusqlite::Connection;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use super::row::TableRow;
use super::schema_gen::{generate_create_table, generate_indexes, generate_insert};
use crate::models::TrophyCard;
use crate::schema::ALL_TABLES;

/// Reconnectable handle to the trophy database, owned by a single run.
///
/// Every insert call is its own transaction, so an interrupted run leaves
/// whatever decks and cards were already committed.
pub struct Store {
    path: PathBuf,
    conn: Connection,
}

impl Store {
    /// Open (or create) the database and make sure both tables exist
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
        }

        let store = Self {
            path: path.to_path_buf(),
            conn: connect(path)?,
        };
        store.create_tables()?;

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create any missing tables and indexes
    pub fn create_tables(&self) -> Result<()> {
        for schema in ALL_TABLES {
            let sql = generate_create_table(schema);
            self.conn
                .execute(&sql, [])
                .with_context(|| format!("Failed to create table: {}", schema.name))?;

            for index_sql in generate_indexes(schema) {
                self.conn
                    .execute(&index_sql, [])
                    .with_context(|| format!("Failed to create index for: {}", schema.name))?;
            }
        }

        Ok(())
    }

    /// Drop the current connection and open a fresh one
    pub fn reconnect(&mut self) -> Result<()> {
        self.conn = connect(&self.path)?;
        info!("Database connection refreshed.");
        Ok(())
    }

    /// Every deck id already stored
    pub fn known_deck_ids(&self) -> Result<HashSet<String>> {
        let mut stmt = self.conn.prepare("SELECT deck_id FROM trophy_decks")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<HashSet<_>>>()
            .context("Failed to read existing deck ids")?;

        debug!(count = ids.len(), "loaded known deck ids");
        Ok(ids)
    }

    /// Append rows in one transaction; returns the number inserted
    pub fn insert<R: TableRow>(&mut self, rows: &[R]) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        let schema = R::schema();
        let sql = generate_insert(schema);

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(&sql)?;
            for row in rows {
                for (idx, value) in row.values().iter().enumerate() {
                    value.bind_to(idx + 1, &mut stmt)?;
                }
                stmt.raw_execute()
                    .with_context(|| format!("Failed to insert into {}", schema.name))?;
            }
        }
        tx.commit()?;

        Ok(rows.len())
    }

    pub fn deck_count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM trophy_decks", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    pub fn card_count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM trophy_cards", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Card rows of one deck in insertion order
    pub fn card_rows(&self, deck_id: &str) -> Result<Vec<TrophyCard>> {
        let mut stmt = self.conn.prepare(
            "SELECT deck_id, card_name, copies, cmc, type_line, color_identity, set_code, rarity, tags
             FROM trophy_cards WHERE deck_id = ?1 ORDER BY rowid",
        )?;

        let rows = stmt
            .query_map([deck_id], |row| {
                Ok(TrophyCard {
                    deck_id: row.get(0)?,
                    card_name: row.get(1)?,
                    copies: row.get(2)?,
                    cmc: row.get(3)?,
                    type_line: row.get(4)?,
                    color_identity: row.get(5)?,
                    set_code: row.get(6)?,
                    rarity: row.get(7)?,
                    tags: row.get(8)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }
}

fn connect(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database: {:?}", path))?;
    conn.busy_timeout(Duration::from_secs(5))?;
    // Touch the file so an unreachable path fails here rather than on first use
    conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
        .with_context(|| format!("Failed to read database: {:?}", path))?;
    Ok(conn)
}
