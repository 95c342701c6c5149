use serde::{Deserialize, Serialize};

/// A single ranked hit: the document and the query keywords it matched.
///
/// `matches` is always sorted ascending and free of duplicates, so its length
/// is the document's match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub document: String,
    pub matches: Vec<String>,
}

impl SearchResult {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

/// Query-string parameters accepted by the `/api/search` endpoints.
///
/// `q` is optional at the extractor level so that a missing query is reported
/// as our own 400 response instead of axum's rejection text.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

impl SearchParams {
    /// Returns the query if present and not blank.
    pub fn query(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.trim().is_empty())
    }
}
