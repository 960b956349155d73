//! String normalizers for the short codes stored in the database

/// Shorten a 17Lands rank such as `"platinum-3"` to `"P3"`.
///
/// Ranks that are not exactly `<tier>-<step>` are returned unchanged.
pub fn shorten_rank(rank: Option<&str>) -> Option<String> {
    let rank = rank?;
    let parts: Vec<&str> = rank.split('-').collect();

    match parts.as_slice() {
        [tier, step] => match tier.chars().next() {
            Some(first) => Some(format!("{}{}", first.to_uppercase(), step)),
            None => Some(rank.to_string()),
        },
        _ => Some(rank.to_string()),
    }
}

/// Map a full rarity name to its single-letter code
pub fn shorten_rarity(rarity: &str) -> String {
    match rarity.to_lowercase().as_str() {
        "common" => "C".to_string(),
        "uncommon" => "U".to_string(),
        "rare" => "R".to_string(),
        "mythic" => "M".to_string(),
        _ => rarity.to_string(),
    }
}
