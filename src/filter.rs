//! Search-as-you-type filtering of conversation titles.

/// Trim whitespace and byte order marks (U+FEFF) from both ends
pub fn trim_blank(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Return the titles containing `query` as a case-insensitive substring.
///
/// The query is trimmed first; an empty or blank query keeps every
/// title. The result always preserves the relative order of `items`.
pub fn filter_conversations<'a>(query: &str, items: &[&'a str]) -> Vec<&'a str> {
    let query = trim_blank(query);
    if query.is_empty() {
        return items.to_vec();
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .copied()
        .filter(|item| item.to_lowercase().contains(&needle))
        .collect()
}
