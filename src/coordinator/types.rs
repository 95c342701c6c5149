use crate::error::InvalidShardAddress;
use crate::search::types::SearchResult;
use crate::shard::protocol::ENDPOINT_SHARD_SEARCH;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Network endpoint (`host:port`) of one shard's query service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShardDescriptor(pub String);

impl ShardDescriptor {
    pub fn search_url(&self) -> String {
        format!("http://{}{}", self.0, ENDPOINT_SHARD_SEARCH)
    }
}

impl FromStr for ShardDescriptor {
    type Err = InvalidShardAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let addr = s.trim();
        let invalid = |reason| InvalidShardAddress {
            addr: addr.to_string(),
            reason,
        };

        let (host, port) = addr.rsplit_once(':').ok_or_else(|| invalid("missing port"))?;
        if host.is_empty() {
            return Err(invalid("missing host"));
        }
        port.parse::<u16>().map_err(|_| invalid("invalid port"))?;

        Ok(Self(addr.to_string()))
    }
}

impl fmt::Display for ShardDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A shard whose contribution was dropped from a merged answer.
#[derive(Debug, Clone)]
pub struct ShardFailure {
    pub shard: ShardDescriptor,
    pub error: String,
}

/// What happened during one fan-out.
#[derive(Debug, Clone, Default)]
pub struct FanOutSummary {
    pub shards_queried: usize,
    pub shards_answered: usize,
    pub failures: Vec<ShardFailure>,
}

impl FanOutSummary {
    /// Dispatch tasks that ended without reporting back (e.g. panicked).
    pub fn missing(&self) -> usize {
        self.shards_queried
            .saturating_sub(self.shards_answered + self.failures.len())
    }
}

/// The merged, globally ranked answer of one coordinated query.
#[derive(Debug, Clone)]
pub struct CoordinatedSearch {
    /// Correlates the per-shard log lines of this query.
    pub query_id: String,
    pub results: Vec<SearchResult>,
    pub summary: FanOutSummary,
}
