//! Index Shard Module
//!
//! Serves one partition of the corpus over HTTP.
//!
//! ## Responsibilities
//! - **Query endpoint**: Answers `POST /internal/search` from the coordinator
//!   with this shard's locally ranked top-K.
//! - **Direct search**: `GET /api/search?q=...` for single-node deployments.
//! - **File selection**: Picks the partition files (`*-<n>.txt`) that belong to
//!   this shard when a whole index directory is mounted on every shard.

pub mod files;
pub mod handlers;
pub mod protocol;
pub mod service;

#[cfg(test)]
mod tests;
