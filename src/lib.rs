//! Sharded Keyword Search Library
//!
//! This library crate defines the modules behind the `shard-search` binary.
//!
//! ## Architecture Modules
//! A deployment has one coordinator in front of N index shards, plus an
//! offline partitioning step that produces each shard's data:
//!
//! - **`index`**: Index file parsing, the lazily loaded in-memory inverted index
//!   and the per-query file scan. `IndexStore` picks one of the two strategies.
//! - **`search`**: Query tokenization and the ranking rule shared by shards and
//!   the coordinator (match count descending, document id ascending, top-K).
//! - **`shard`**: The per-shard query service and its HTTP endpoints.
//! - **`coordinator`**: Fans a query out to every shard, tolerates failures and
//!   merges the partial answers into a global top-K.
//! - **`partitioner`**: Splits one combined index file into N partition files.
//! - **`config`** / **`error`**: Runtime settings and shared error types.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod index;
pub mod partitioner;
pub mod search;
pub mod shard;
