use crate::models::{TrophyCard, TrophyDeck};
use crate::schema::{TableSchema, TROPHY_CARDS, TROPHY_DECKS};

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Text(String),
}

impl SqlValue {
    pub fn bind_to(&self, idx: usize, stmt: &mut rusqlite::Statement) -> rusqlite::Result<()> {
        match self {
            SqlValue::Null => stmt.raw_bind_parameter(idx, rusqlite::types::Null)?,
            SqlValue::Integer(i) => stmt.raw_bind_parameter(idx, i)?,
            SqlValue::Text(s) => stmt.raw_bind_parameter(idx, s.as_str())?,
        }
        Ok(())
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(i: i64) -> Self {
        SqlValue::Integer(i)
    }
}

impl From<Option<i64>> for SqlValue {
    fn from(i: Option<i64>) -> Self {
        i.map(SqlValue::Integer).unwrap_or(SqlValue::Null)
    }
}

impl From<Option<&str>> for SqlValue {
    fn from(s: Option<&str>) -> Self {
        s.map(SqlValue::from).unwrap_or(SqlValue::Null)
    }
}

/// A value that maps onto one row of a table, in the schema's column order
pub trait TableRow {
    fn schema() -> &'static TableSchema;
    fn values(&self) -> Vec<SqlValue>;
}

impl TableRow for TrophyDeck {
    fn schema() -> &'static TableSchema {
        &TROPHY_DECKS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.deck_id.as_str().into(),
            self.date.as_str().into(),
            self.expansion.as_str().into(),
            self.colors.as_deref().into(),
            self.losses.into(),
            self.result_rank.as_deref().into(),
        ]
    }
}

impl TableRow for TrophyCard {
    fn schema() -> &'static TableSchema {
        &TROPHY_CARDS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.deck_id.as_str().into(),
            self.card_name.as_str().into(),
            self.copies.into(),
            self.cmc.into(),
            self.type_line.as_str().into(),
            self.color_identity.as_str().into(),
            self.set_code.as_str().into(),
            self.rarity.as_str().into(),
            self.tags.as_str().into(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_match_schema_width() {
        let deck = TrophyDeck {
            deck_id: "d".to_string(),
            date: "t".to_string(),
            expansion: "fdn".to_string(),
            colors: Some("W".to_string()),
            losses: None,
            result_rank: None,
        };
        let values = deck.values();
        assert_eq!(values.len(), TrophyDeck::schema().columns.len());
        assert_eq!(values[4], SqlValue::Null);
        assert_eq!(values[5], SqlValue::Null);

        let card = TrophyCard {
            deck_id: "d".to_string(),
            card_name: "Island".to_string(),
            copies: 8,
            cmc: 0,
            type_line: "Basic Land — Island".to_string(),
            color_identity: String::new(),
            set_code: "fdn".to_string(),
            rarity: "C".to_string(),
            tags: String::new(),
        };
        assert_eq!(card.values().len(), TrophyCard::schema().columns.len());
        assert_eq!(card.values()[2], SqlValue::Integer(8));
    }
}
