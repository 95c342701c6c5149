use crate::error::IndexError;
use crate::index::store::IndexStore;
use crate::search::tokenizer::tokenize_query;
use crate::search::types::SearchResult;

use std::sync::Arc;

/// One shard's query service: an [`IndexStore`] plus its default result limit.
pub struct ShardService {
    store: IndexStore,
    top_k: usize,
}

impl ShardService {
    pub fn new(store: IndexStore, top_k: usize) -> Arc<Self> {
        Arc::new(Self { store, top_k })
    }

    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Tokenizes `query` and returns this shard's top `k` matches.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchResult>, IndexError> {
        let keywords = tokenize_query(query);
        if keywords.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        self.store.search(&keywords, k).await
    }
}
