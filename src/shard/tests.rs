//! Shard Module Tests
//!
//! ## Test Scopes
//! - **File selection**: Partition-number extraction and shard assignment.
//! - **Service**: Query tokenization and top-K handling on a real index.
//! - **Handlers**: Wire-level behavior of the shard endpoints.

#[cfg(test)]
mod tests {
    use crate::error::ApiError;
    use crate::index::store::IndexStore;
    use crate::index::types::SearchStrategy;
    use crate::search::types::{SearchParams, SearchResult};
    use crate::shard::files::{
        list_index_files, partition_number, select_files_for_shard, shard_id_from_name,
    };
    use crate::shard::handlers::{handle_health, handle_search, handle_shard_search};
    use crate::shard::protocol::ShardQuery;
    use crate::shard::service::ShardService;
    use axum::extract::Query;
    use axum::{Extension, Json};
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn shard_with(dir: &Path, strategy: SearchStrategy) -> Arc<ShardService> {
        let path = dir.join("index-0.txt");
        std::fs::write(&path, "apple: 2 doc1,doc2\nbanana: 1 doc1\n").unwrap();
        ShardService::new(IndexStore::new(vec![path], strategy).unwrap(), 10)
    }

    fn documents(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.document.as_str()).collect()
    }

    // ============================================================
    // FILE SELECTION TESTS
    // ============================================================

    #[test]
    fn test_partition_number() {
        assert_eq!(partition_number(Path::new("/idx/index-part-7.txt")), Some(7));
        assert_eq!(partition_number(Path::new("index-12.txt")), Some(12));
        assert_eq!(partition_number(Path::new("index.txt")), None);
        assert_eq!(partition_number(Path::new("index-x.txt")), None);
        assert_eq!(partition_number(Path::new("index-3.csv")), None);
    }

    #[test]
    fn test_select_files_for_shard() {
        let files: Vec<PathBuf> = (0..6)
            .map(|i| PathBuf::from(format!("index-{}.txt", i)))
            .chain([PathBuf::from("README.md")])
            .collect();

        let shard1 = select_files_for_shard(&files, 1, 3);
        assert_eq!(
            shard1,
            vec![PathBuf::from("index-1.txt"), PathBuf::from("index-4.txt")]
        );

        assert!(select_files_for_shard(&files, 0, 0).is_empty());
    }

    #[test]
    fn test_shard_id_from_name() {
        assert_eq!(shard_id_from_name("indexserver-2"), Some(2));
        assert_eq!(shard_id_from_name("index-server-10"), Some(10));
        assert_eq!(shard_id_from_name("indexserver"), None);
        assert_eq!(shard_id_from_name("indexserver-a"), None);
    }

    #[test]
    fn test_list_index_files_skips_directories() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("b-1.txt"), "").unwrap();
        std::fs::write(tmp.path().join("a-0.txt"), "").unwrap();
        std::fs::create_dir(tmp.path().join("nested")).unwrap();

        let files = list_index_files(tmp.path()).unwrap();
        assert_eq!(
            files,
            vec![tmp.path().join("a-0.txt"), tmp.path().join("b-1.txt")]
        );
    }

    // ============================================================
    // SERVICE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_service_matches_per_document() {
        let tmp = TempDir::new().unwrap();
        let shard = shard_with(tmp.path(), SearchStrategy::Memory);

        let results = shard.search("Apple BANANA cherry", 10).await.unwrap();

        assert_eq!(documents(&results), vec!["doc1", "doc2"]);
        assert_eq!(results[0].matches, vec!["apple", "banana"]);
        assert_eq!(results[1].matches, vec!["apple"]);
    }

    #[tokio::test]
    async fn test_service_blank_query_or_zero_k_is_empty() {
        let tmp = TempDir::new().unwrap();
        let shard = shard_with(tmp.path(), SearchStrategy::Scan);

        assert!(shard.search("   ", 10).await.unwrap().is_empty());
        assert!(shard.search("apple", 0).await.unwrap().is_empty());
    }

    // ============================================================
    // HANDLER TESTS
    // ============================================================

    #[tokio::test]
    async fn test_handle_shard_search_respects_top_k() {
        let tmp = TempDir::new().unwrap();
        let shard = shard_with(tmp.path(), SearchStrategy::Scan);

        let Json(results) = handle_shard_search(
            Extension(shard.clone()),
            Json(ShardQuery {
                query: "apple banana".to_string(),
                top_k: 1,
            }),
        )
        .await
        .unwrap();
        assert_eq!(documents(&results), vec!["doc1"]);

        let Json(results) = handle_shard_search(
            Extension(shard),
            Json(ShardQuery {
                query: "apple".to_string(),
                top_k: -3,
            }),
        )
        .await
        .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_handle_shard_search_reports_index_failure() {
        let tmp = TempDir::new().unwrap();
        let store =
            IndexStore::new(vec![tmp.path().join("gone.txt")], SearchStrategy::Memory).unwrap();
        let shard = ShardService::new(store, 10);

        let outcome = handle_shard_search(
            Extension(shard),
            Json(ShardQuery {
                query: "apple".to_string(),
                top_k: 10,
            }),
        )
        .await;

        assert!(matches!(outcome, Err(ApiError::Internal(_))));
    }

    #[tokio::test]
    async fn test_handle_search_requires_query() {
        let tmp = TempDir::new().unwrap();
        let shard = shard_with(tmp.path(), SearchStrategy::Memory);

        let outcome = handle_search(Extension(shard.clone()), Ok(Query(SearchParams::default()))).await;
        assert!(matches!(outcome, Err(ApiError::BadRequest(_))));

        let Json(results) = handle_search(
            Extension(shard),
            Ok(Query(SearchParams {
                q: Some("apple".to_string()),
                limit: Some(1),
            })),
        )
        .await
        .unwrap();
        assert_eq!(documents(&results), vec!["doc1"]);
    }

    #[tokio::test]
    async fn test_handle_health_reports_lazy_load() {
        let tmp = TempDir::new().unwrap();
        let shard = shard_with(tmp.path(), SearchStrategy::Memory);

        let Json(health) = handle_health(Extension(shard.clone())).await;
        assert_eq!(health.strategy, "memory");
        assert_eq!(health.index_files, 1);
        assert!(!health.loaded);

        shard.search("apple", 10).await.unwrap();
        let Json(health) = handle_health(Extension(shard)).await;
        assert!(health.loaded);
    }

    #[test]
    fn test_shard_query_wire_format() {
        let json = serde_json::to_value(ShardQuery {
            query: "apple banana".to_string(),
            top_k: 5,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "query": "apple banana", "topK": 5 }));
    }
}
