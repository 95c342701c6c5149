//! Shard Coordinator Module
//!
//! The public entry point of a sharded deployment. It owns no index data;
//! every query is answered by asking all shards and merging their partial
//! top-K lists.
//!
//! ## Query Flow
//! 1. **Validate**: A missing or blank query is a client error; no shard is contacted.
//! 2. **Fan out**: One task per shard, all started together, each bounded by
//!    the configured per-shard timeout. No retries.
//! 3. **Collect**: Tasks report over a channel; the collector waits for all of them.
//! 4. **Merge**: Matched-keyword sets are unioned per document across shards,
//!    then re-ranked and truncated with the same rule a shard uses locally.
//!
//! Failed shards are logged and dropped. The query itself never fails because
//! a shard is down.
//!
//! ## Submodules
//! - **`client`**: The `ShardClient` transport seam and its HTTP implementation.
//! - **`service`**: Fan-out, collection and merging.
//! - **`handlers`**: Axum handlers for the public search API.
//! - **`types`**: Shard descriptors and fan-out summaries.

pub mod client;
pub mod handlers;
pub mod service;
pub mod types;
