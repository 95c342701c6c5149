//! Fan-out / Merge
//!
//! Sends every query to all configured shards at once, waits for each call to
//! settle, and merges whatever came back with the shared ranking rule.
//!
//! Each dispatch task reports its outcome over a channel to the single
//! collector in [`ShardCoordinator::search`]; there is no shared accumulator.
//! A shard that errors or exceeds its timeout is logged and left out.

use super::client::{HttpShardClient, ShardClient};
use super::types::*;
use crate::config::CoordinatorConfig;
use crate::search::engine::merge_shard_results;
use crate::search::types::SearchResult;
use crate::shard::protocol::ShardQuery;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

struct ShardReply {
    shard: ShardDescriptor,
    outcome: anyhow::Result<Vec<SearchResult>>,
}

pub struct ShardCoordinator {
    shards: Vec<ShardDescriptor>,
    client: Arc<dyn ShardClient>,
    top_k: usize,
    shard_timeout: Duration,
}

impl ShardCoordinator {
    /// Builds a coordinator that reaches shards over HTTP.
    pub fn new(config: &CoordinatorConfig) -> Arc<Self> {
        let client = Arc::new(HttpShardClient::new(config.shard_timeout));
        Self::with_client(
            config.shards.clone(),
            client,
            config.top_k,
            config.shard_timeout,
        )
    }

    pub fn with_client(
        shards: Vec<ShardDescriptor>,
        client: Arc<dyn ShardClient>,
        top_k: usize,
        shard_timeout: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            shards,
            client,
            top_k,
            shard_timeout,
        })
    }

    pub fn shards(&self) -> &[ShardDescriptor] {
        &self.shards
    }

    /// Default result limit for queries that do not ask for one.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Queries every shard concurrently and returns the merged top `k`.
    ///
    /// Never fails: with every shard down the answer is simply empty.
    pub async fn search(&self, query: &str, k: usize) -> CoordinatedSearch {
        let query_id = Uuid::new_v4().to_string();
        let request = ShardQuery {
            query: query.to_string(),
            top_k: i64::try_from(k).unwrap_or(i64::MAX),
        };

        tracing::debug!(
            "[{}] Fanning out {:?} to {} shard(s)",
            query_id,
            query,
            self.shards.len()
        );

        let (tx, mut rx) = mpsc::channel::<ShardReply>(self.shards.len().max(1));

        for shard in &self.shards {
            let tx = tx.clone();
            let shard = shard.clone();
            let call = self.client.search(&shard, &request);
            let timeout = self.shard_timeout;

            tokio::spawn(async move {
                let outcome = match tokio::time::timeout(timeout, call).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(anyhow::anyhow!("timed out after {:?}", timeout)),
                };
                // The collector only goes away once every sender is dropped.
                let _ = tx.send(ShardReply { shard, outcome }).await;
            });
        }
        drop(tx);

        let mut summary = FanOutSummary {
            shards_queried: self.shards.len(),
            ..Default::default()
        };
        let mut partials = Vec::with_capacity(self.shards.len());

        while let Some(reply) = rx.recv().await {
            match reply.outcome {
                Ok(results) => {
                    tracing::debug!(
                        "[{}] Shard {} returned {} result(s)",
                        query_id,
                        reply.shard,
                        results.len()
                    );
                    summary.shards_answered += 1;
                    partials.push(results);
                }
                Err(e) => {
                    tracing::warn!("[{}] Shard {} failed: {:#}", query_id, reply.shard, e);
                    summary.failures.push(ShardFailure {
                        shard: reply.shard,
                        error: format!("{:#}", e),
                    });
                }
            }
        }

        if summary.missing() > 0 {
            tracing::warn!(
                "[{}] {} shard call(s) ended without a reply",
                query_id,
                summary.missing()
            );
        }

        let results = merge_shard_results(partials, k);

        tracing::info!(
            "[{}] Query {:?}: {}/{} shard(s) answered, {} merged result(s)",
            query_id,
            query,
            summary.shards_answered,
            summary.shards_queried,
            results.len()
        );

        CoordinatedSearch {
            query_id,
            results,
            summary,
        }
    }
}
