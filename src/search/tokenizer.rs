use std::collections::BTreeSet;

/// Splits a free-text query into its set of lowercase keywords.
///
/// Index keywords are stored lowercase and may contain punctuation, so the
/// query is only lowercased and split on whitespace.
pub fn tokenize_query(query: &str) -> BTreeSet<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(|word| word.to_string())
        .collect()
}
