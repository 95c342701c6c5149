//! Shard Client
//!
//! The seam between the coordinator and the transport used to reach a shard.
//! Production code talks JSON over HTTP; tests substitute an in-process client.

use super::types::ShardDescriptor;
use crate::search::types::SearchResult;
use crate::shard::protocol::ShardQuery;

use anyhow::Result;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Boxed future returned by [`ShardClient::search`]. Owns everything it needs.
pub type ShardFuture = Pin<Box<dyn Future<Output = Result<Vec<SearchResult>>> + Send>>;

pub trait ShardClient: Send + Sync {
    /// Sends one query to one shard. A single attempt; no retries.
    fn search(&self, shard: &ShardDescriptor, request: &ShardQuery) -> ShardFuture;
}

/// Reaches shards through `POST /internal/search`.
pub struct HttpShardClient {
    http_client: reqwest::Client,
    timeout: Duration,
}

impl HttpShardClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            timeout,
        }
    }
}

impl ShardClient for HttpShardClient {
    fn search(&self, shard: &ShardDescriptor, request: &ShardQuery) -> ShardFuture {
        let url = shard.search_url();
        let pending = self
            .http_client
            .post(url.clone())
            .json(request)
            .timeout(self.timeout);

        Box::pin(async move {
            let response = pending.send().await?;

            if !response.status().is_success() {
                return Err(anyhow::anyhow!(
                    "shard search failed {} ({})",
                    response.status(),
                    url
                ));
            }

            let results: Vec<SearchResult> = response.json().await?;
            Ok(results)
        })
    }
}
