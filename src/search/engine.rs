use super::types::SearchResult;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

/// Matched keywords per cleaned document identifier.
pub type DocMatches = HashMap<String, BTreeSet<String>>;

/// Strips surrounding whitespace, including U+00A0 left behind by malformed
/// index sources, from a document identifier.
pub fn clean_document_id(document: &str) -> &str {
    document.trim_matches(|c: char| c.is_whitespace() || c == '\u{00A0}')
}

/// Records `keyword` as matched for `document`.
///
/// Identifiers are cleaned before being used as keys, so two spellings that
/// only differ in padding collapse into the same document.
pub fn record_match(doc_matches: &mut DocMatches, document: &str, keyword: &str) {
    let document = clean_document_id(document);
    if document.is_empty() {
        return;
    }
    doc_matches
        .entry(document.to_string())
        .or_default()
        .insert(keyword.to_string());
}

/// Converts a wire-level K into a result limit. Negative values mean "nothing".
pub fn top_k_limit(k: i64) -> usize {
    usize::try_from(k).unwrap_or(0)
}

/// More matches first, then document identifier ascending.
fn rank_order(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.matches
        .len()
        .cmp(&a.matches.len())
        .then_with(|| a.document.cmp(&b.document))
}

/// Builds one result per matched document and returns the `k` best in rank order.
pub fn rank(doc_matches: DocMatches, k: usize) -> Vec<SearchResult> {
    if k == 0 || doc_matches.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<SearchResult> = doc_matches
        .into_iter()
        .map(|(document, matches)| SearchResult {
            document,
            matches: matches.into_iter().collect(),
        })
        .collect();

    // Partial selection keeps large candidate lists cheap when only the head is kept.
    if k < results.len() {
        results.select_nth_unstable_by(k - 1, rank_order);
        results.truncate(k);
    }
    results.sort_unstable_by(rank_order);
    results
}

/// Unions per-document matches across shard answers and re-ranks the combined set.
///
/// A document reported by several shards gets the union of its keyword sets,
/// so the outcome depends neither on arrival order nor on how documents were
/// spread across shards.
pub fn merge_shard_results<I>(shard_results: I, k: usize) -> Vec<SearchResult>
where
    I: IntoIterator<Item = Vec<SearchResult>>,
{
    let mut doc_matches = DocMatches::new();
    for results in shard_results {
        for result in results {
            for keyword in &result.matches {
                record_match(&mut doc_matches, &result.document, keyword);
            }
        }
    }
    rank(doc_matches, k)
}
