//! Search Module Tests
//!
//! Validates query normalization, the ranking rule and shard-result merging.
//!
//! ## Test Scopes
//! - **Tokenizer**: Ensures queries become a lowercase keyword set.
//! - **Ranking**: Verifies ordering, tie-breaking and top-K truncation.
//! - **Merging**: Checks that partial shard answers are unioned, not overwritten.

#[cfg(test)]
mod tests {
    use crate::search::engine::{
        DocMatches, clean_document_id, merge_shard_results, rank, record_match, top_k_limit,
    };
    use crate::search::tokenizer::tokenize_query;
    use crate::search::types::{SearchParams, SearchResult};

    fn result(document: &str, matches: &[&str]) -> SearchResult {
        SearchResult {
            document: document.to_string(),
            matches: matches.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn sample_matches() -> DocMatches {
        let mut doc_matches = DocMatches::new();
        for doc in ["doc1", "doc2", "doc3"] {
            record_match(&mut doc_matches, doc, "apple");
        }
        for doc in ["doc1", "doc3"] {
            record_match(&mut doc_matches, doc, "banana");
        }
        doc_matches
    }

    // ============================================================
    // TOKENIZER TESTS
    // ============================================================

    #[test]
    fn test_tokenize_query_lowercases() {
        let tokens = tokenize_query("Apple BANANA");

        assert!(tokens.contains("apple"));
        assert!(tokens.contains("banana"));
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_tokenize_query_collapses_duplicates() {
        let tokens = tokenize_query("rust Rust RUST");
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn test_tokenize_query_keeps_punctuation() {
        // Index keywords are arbitrary non-whitespace runs
        let tokens = tokenize_query("c++ don't");

        assert!(tokens.contains("c++"));
        assert!(tokens.contains("don't"));
    }

    #[test]
    fn test_tokenize_query_blank() {
        assert!(tokenize_query("").is_empty());
        assert!(tokenize_query(" \t\n ").is_empty());
    }

    #[test]
    fn test_search_params_rejects_blank_query() {
        let params = SearchParams {
            q: Some("   ".to_string()),
            limit: None,
        };
        assert!(params.query().is_none());

        let params = SearchParams::default();
        assert!(params.query().is_none());

        let params = SearchParams {
            q: Some("apple".to_string()),
            limit: Some(3),
        };
        assert_eq!(params.query(), Some("apple"));
    }

    // ============================================================
    // RANKING TESTS
    // ============================================================

    #[test]
    fn test_rank_orders_by_count_then_document() {
        let results = rank(sample_matches(), 10);

        assert_eq!(
            results,
            vec![
                result("doc1", &["apple", "banana"]),
                result("doc3", &["apple", "banana"]),
                result("doc2", &["apple"]),
            ]
        );
    }

    #[test]
    fn test_rank_top_k_truncates() {
        let results = rank(sample_matches(), 2);

        assert_eq!(
            results,
            vec![
                result("doc1", &["apple", "banana"]),
                result("doc3", &["apple", "banana"]),
            ]
        );
    }

    #[test]
    fn test_rank_k_zero_is_empty() {
        assert!(rank(sample_matches(), 0).is_empty());
        assert_eq!(top_k_limit(0), 0);
        assert_eq!(top_k_limit(-5), 0);
        assert_eq!(top_k_limit(7), 7);
    }

    #[test]
    fn test_rank_k_larger_than_results_returns_all() {
        assert_eq!(rank(sample_matches(), 1000).len(), 3);
    }

    #[test]
    fn test_rank_is_total_order() {
        let mut doc_matches = DocMatches::new();
        for i in 0..200 {
            let doc = format!("doc{:03}", (i * 37) % 200);
            record_match(&mut doc_matches, &doc, "alpha");
            if i % 3 == 0 {
                record_match(&mut doc_matches, &doc, "beta");
            }
            if i % 7 == 0 {
                record_match(&mut doc_matches, &doc, "gamma");
            }
        }

        for k in [1, 5, 17, 200] {
            let results = rank(doc_matches.clone(), k);
            assert_eq!(results.len(), k.min(200));

            for pair in results.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                assert!(
                    a.match_count() > b.match_count()
                        || (a.match_count() == b.match_count() && a.document < b.document),
                    "{:?} must rank before {:?}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_rank_head_matches_full_sort_prefix() {
        let mut doc_matches = DocMatches::new();
        for i in 0..50 {
            let doc = format!("d{}", i);
            for kw in 0..(i % 4) + 1 {
                record_match(&mut doc_matches, &doc, &format!("kw{}", kw));
            }
        }

        let full = rank(doc_matches.clone(), 50);
        let head = rank(doc_matches, 9);
        assert_eq!(head, full[..9].to_vec());
    }

    #[test]
    fn test_matches_are_sorted_and_unique() {
        let mut doc_matches = DocMatches::new();
        record_match(&mut doc_matches, "doc1", "zebra");
        record_match(&mut doc_matches, "doc1", "apple");
        record_match(&mut doc_matches, "doc1", "zebra");

        let results = rank(doc_matches, 10);
        assert_eq!(results, vec![result("doc1", &["apple", "zebra"])]);
    }

    // ============================================================
    // DOCUMENT ID CLEANING
    // ============================================================

    #[test]
    fn test_clean_document_id_strips_nbsp() {
        assert_eq!(clean_document_id("\u{00A0}doc1 \u{00A0}"), "doc1");
        assert_eq!(clean_document_id("  doc2\t"), "doc2");
        assert_eq!(clean_document_id("doc 3"), "doc 3");
    }

    #[test]
    fn test_padded_ids_collapse_into_one_document() {
        let mut doc_matches = DocMatches::new();
        record_match(&mut doc_matches, "doc1", "apple");
        record_match(&mut doc_matches, "\u{00A0}doc1", "banana");
        record_match(&mut doc_matches, "   ", "cherry");

        let results = rank(doc_matches, 10);
        assert_eq!(results, vec![result("doc1", &["apple", "banana"])]);
    }

    // ============================================================
    // SHARD MERGE TESTS
    // ============================================================

    #[test]
    fn test_merge_unions_matches_across_shards() {
        let shard_a = vec![
            result("doc1", &["apple", "banana"]),
            result("doc2", &["apple"]),
        ];
        let shard_b = vec![result("doc1", &["cherry"]), result("doc2", &["banana"])];

        let merged = merge_shard_results(vec![shard_a, shard_b], 10);

        assert_eq!(
            merged,
            vec![
                result("doc1", &["apple", "banana", "cherry"]),
                result("doc2", &["apple", "banana"]),
            ]
        );
    }

    #[test]
    fn test_merge_is_independent_of_shard_order() {
        let shard_a = vec![result("doc1", &["apple"]), result("doc4", &["kiwi"])];
        let shard_b = vec![result("doc1", &["banana"]), result("doc2", &["apple"])];
        let shard_c = vec![result("doc2", &["apple", "cherry"])];

        let forward = merge_shard_results(
            vec![shard_a.clone(), shard_b.clone(), shard_c.clone()],
            10,
        );
        let backward = merge_shard_results(vec![shard_c, shard_b, shard_a], 10);

        assert_eq!(forward, backward);
        assert_eq!(forward[0], result("doc1", &["apple", "banana"]));
        assert_eq!(forward[1], result("doc2", &["apple", "cherry"]));
    }

    #[test]
    fn test_merge_no_shards() {
        let merged = merge_shard_results(Vec::<Vec<SearchResult>>::new(), 10);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_merge_applies_top_k() {
        let shard_a = vec![result("a", &["x"]), result("b", &["x"])];
        let shard_b = vec![result("c", &["x", "y"])];

        let merged = merge_shard_results(vec![shard_a, shard_b], 2);
        assert_eq!(merged, vec![result("c", &["x", "y"]), result("a", &["x"])]);
    }

    #[test]
    fn test_search_result_wire_shape() {
        let json = serde_json::to_value(result("doc1", &["apple"])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "document": "doc1", "matches": ["apple"] })
        );
    }
}
