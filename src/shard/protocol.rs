//! Shard Network Protocol
//!
//! Endpoints and DTOs exchanged between the coordinator and index shards.
//! Bodies are JSON; field names follow the shard query interface
//! (`query`, `topK`, `document`, `matches`).

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Internal endpoint the coordinator fans out to.
pub const ENDPOINT_SHARD_SEARCH: &str = "/internal/search";
/// Public keyword search (`?q=...&limit=...`).
pub const ENDPOINT_SEARCH: &str = "/api/search";
/// Liveness and basic shard facts.
pub const ENDPOINT_HEALTH: &str = "/health";

// --- Data Transfer Objects ---

/// A query dispatched to one shard.
///
/// `top_k <= 0` is valid and yields an empty answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardQuery {
    /// Free-text query; the shard tokenizes it.
    pub query: String,
    #[serde(rename = "topK")]
    pub top_k: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShardHealth {
    pub status: String,
    pub strategy: String,
    pub index_files: usize,
    /// Whether the in-memory index has been built yet.
    pub loaded: bool,
}
