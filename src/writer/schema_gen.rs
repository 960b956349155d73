use crate::schema::TableSchema;

/// Generate CREATE TABLE SQL for a table schema; existing tables are left alone
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n", schema.name);

    let columns: Vec<String> = schema
        .columns
        .iter()
        .map(|col| {
            let null_constraint = if !col.nullable { " NOT NULL" } else { "" };
            format!("    {} {}{}", col.name, col.col_type.sql_type(), null_constraint)
        })
        .collect();

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for the schema's indexes
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    schema
        .indexes
        .iter()
        .map(|index| {
            let unique = if index.unique { "UNIQUE " } else { "" };
            format!(
                "CREATE {}INDEX IF NOT EXISTS idx_{}_{} ON {}({})",
                unique,
                schema.name,
                index.columns.join("_"),
                schema.name,
                index.columns.join(", ")
            )
        })
        .collect()
}

/// Generate a parameterized INSERT for every column of the schema
pub fn generate_insert(schema: &TableSchema) -> String {
    let columns = schema.column_names();
    let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schema.name,
        columns.join(", "),
        placeholders.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tables::{TROPHY_CARDS, TROPHY_DECKS};

    #[test]
    fn test_generate_create_table() {
        let sql = generate_create_table(&TROPHY_CARDS);
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS trophy_cards"));
        assert!(sql.contains("deck_id TEXT NOT NULL"));
        assert!(sql.contains("copies INTEGER NOT NULL"));
        assert!(sql.contains("tags TEXT"));
        assert!(!sql.contains("PRIMARY KEY"));
    }

    #[test]
    fn test_generate_indexes() {
        let indexes = generate_indexes(&TROPHY_CARDS);
        assert_eq!(
            indexes,
            vec!["CREATE INDEX IF NOT EXISTS idx_trophy_cards_deck_id ON trophy_cards(deck_id)"]
        );
    }

    #[test]
    fn test_generate_insert() {
        assert_eq!(
            generate_insert(&TROPHY_DECKS),
            "INSERT INTO trophy_decks (deck_id, date, expansion, colors, losses, result_rank) \
             VALUES (?, ?, ?, ?, ?, ?)"
        );
    }
}
