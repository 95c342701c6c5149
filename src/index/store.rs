use super::inverted::InvertedIndex;
use super::scan::scan_files;
use super::types::SearchStrategy;
use crate::error::IndexError;
use crate::search::engine::rank;
use crate::search::types::SearchResult;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// A shard's index: a fixed list of source files plus the configured strategy.
///
/// With [`SearchStrategy::Memory`] the merged map is built by the first caller
/// only; concurrent first queries wait on the same initialization. A failed
/// load leaves the cell empty and the next query retries.
pub struct IndexStore {
    files: Arc<Vec<PathBuf>>,
    strategy: SearchStrategy,
    index: OnceCell<Arc<InvertedIndex>>,
}

impl IndexStore {
    pub fn new(files: Vec<PathBuf>, strategy: SearchStrategy) -> Result<Self, IndexError> {
        if files.is_empty() {
            return Err(IndexError::NoFiles);
        }

        Ok(Self {
            files: Arc::new(files),
            strategy,
            index: OnceCell::new(),
        })
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn is_loaded(&self) -> bool {
        self.index.initialized()
    }

    /// Returns the merged index, loading it on first use.
    pub async fn index(&self) -> Result<Arc<InvertedIndex>, IndexError> {
        let index = self
            .index
            .get_or_try_init(|| async {
                let files = self.files.clone();
                tracing::info!("Loading {} index file(s) into memory", files.len());
                let index =
                    tokio::task::spawn_blocking(move || InvertedIndex::load(files.as_slice()))
                        .await??;
                Ok::<_, IndexError>(Arc::new(index))
            })
            .await?;

        Ok(index.clone())
    }

    /// Forces the one-time load now instead of on the first query.
    pub async fn preload(&self) -> Result<(), IndexError> {
        self.index().await.map(|_| ())
    }

    /// Runs exactly one strategy and returns the top `k` results.
    pub async fn search(
        &self,
        keywords: &BTreeSet<String>,
        k: usize,
    ) -> Result<Vec<SearchResult>, IndexError> {
        let results = match self.strategy {
            SearchStrategy::Memory => self.index().await?.search(keywords, k),
            SearchStrategy::Scan => {
                let files = self.files.clone();
                let keywords = keywords.clone();
                let doc_matches =
                    tokio::task::spawn_blocking(move || scan_files(files.as_slice(), &keywords))
                        .await??;
                rank(doc_matches, k)
            }
        };

        tracing::debug!(
            "Index search ({}) for {} keyword(s) returned {} result(s)",
            self.strategy,
            keywords.len(),
            results.len()
        );
        Ok(results)
    }
}
