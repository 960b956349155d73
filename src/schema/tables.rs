//! Table definitions for the harvested trophy data

use super::types::*;

/// One row per trophy deck. `deck_id` is kept unique by the ingester, not by a constraint.
pub static TROPHY_DECKS: TableSchema = TableSchema {
    name: "trophy_decks",
    columns: &[
        Column::required("deck_id", ColumnType::Text),
        Column::required("date", ColumnType::Text),
        Column::required("expansion", ColumnType::Text),
        Column::new("colors", ColumnType::Text),
        Column::new("losses", ColumnType::Integer),
        Column::new("result_rank", ColumnType::Text),
    ],
    indexes: &[Index::on(&["deck_id"])],
};

/// One row per distinct maindeck card of a trophy deck
pub static TROPHY_CARDS: TableSchema = TableSchema {
    name: "trophy_cards",
    columns: &[
        Column::required("deck_id", ColumnType::Text),
        Column::required("card_name", ColumnType::Text),
        Column::required("copies", ColumnType::Integer),
        Column::new("cmc", ColumnType::Integer),
        Column::new("type_line", ColumnType::Text),
        Column::new("color_identity", ColumnType::Text),
        Column::new("set_code", ColumnType::Text),
        Column::new("rarity", ColumnType::Text),
        Column::new("tags", ColumnType::Text),
    ],
    indexes: &[Index::on(&["deck_id"])],
};

/// All tables, parents first
pub static ALL_TABLES: &[&TableSchema] = &[&TROPHY_DECKS, &TROPHY_CARDS];

/// Get a table schema by name
pub fn get_table(name: &str) -> Option<&'static TableSchema> {
    ALL_TABLES.iter().find(|t| t.name == name).copied()
}

/// Get all table names
pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}
