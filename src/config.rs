//! Runtime configuration for the three entry points.
//!
//! The binary fills these from command-line flags (with environment
//! fallbacks); tests build them directly.

use crate::coordinator::types::ShardDescriptor;
use crate::index::types::SearchStrategy;
use crate::partitioner::partition::validate_pattern;
use crate::shard::files::{list_index_files, select_files_for_shard, shard_id_from_name};

use anyhow::{Context, Result, anyhow, bail};
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_SHARD_PORT: u16 = 9090;
pub const DEFAULT_COORDINATOR_PORT: u16 = 8080;
pub const DEFAULT_SHARD_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_PARTITIONS: usize = 2;
pub const DEFAULT_OUTPUT_PATTERN: &str = "index-%d.txt";

/// Host used when an address gives only a port (`:9090`).
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Turns `addr` into `host:port`.
///
/// A missing port becomes `default_port` and an empty host becomes
/// [`DEFAULT_HOST`]. IPv6 hosts are accepted bare (`::1`) or bracketed
/// (`[::1]:9090`) and always come back bracketed.
pub fn normalize_addr(addr: &str, default_port: u16) -> Result<String> {
    let addr = addr.trim();
    if addr.is_empty() {
        bail!("empty address");
    }

    if let Ok(ip) = addr.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, default_port).to_string());
    }

    if let Some(rest) = addr.strip_prefix('[') {
        let (host, tail) = rest
            .split_once(']')
            .ok_or_else(|| anyhow!("invalid address {:?}: unclosed '['", addr))?;
        let ip: Ipv6Addr = host
            .parse()
            .map_err(|_| anyhow!("invalid address {:?}: bad IPv6 host", addr))?;
        let port = match tail {
            "" => default_port,
            _ => parse_port(addr, tail.strip_prefix(':').unwrap_or(tail))?,
        };
        return Ok(SocketAddr::new(IpAddr::V6(ip), port).to_string());
    }

    match addr.rsplit_once(':') {
        Some((host, _)) if host.contains(':') => {
            Err(anyhow!("invalid address {:?}: bracket IPv6 hosts", addr))
        }
        Some((host, port)) => {
            let port = parse_port(addr, port)?;
            let host = if host.is_empty() { DEFAULT_HOST } else { host };
            Ok(format!("{}:{}", host, port))
        }
        None => Ok(format!("{}:{}", addr, default_port)),
    }
}

fn parse_port(addr: &str, port: &str) -> Result<u16> {
    port.parse::<u16>()
        .map_err(|_| anyhow!("invalid address {:?}: bad port {:?}", addr, port))
}

#[derive(Debug, Clone)]
pub struct ShardConfig {
    pub addr: String,
    pub index_files: Vec<PathBuf>,
    pub index_dir: Option<PathBuf>,
    /// Keep only the partition files assigned to this shard.
    pub partitioned: bool,
    pub shard_id: Option<usize>,
    /// `name-<id>` form, as assigned by an orchestrator.
    pub shard_name: Option<String>,
    pub num_shards: Option<usize>,
    pub use_memory: bool,
    /// Build the in-memory index at startup instead of on the first query.
    pub preload: bool,
    pub top_k: usize,
}

impl Default for ShardConfig {
    fn default() -> Self {
        Self {
            addr: format!("0.0.0.0:{}", DEFAULT_SHARD_PORT),
            index_files: Vec::new(),
            index_dir: None,
            partitioned: false,
            shard_id: None,
            shard_name: None,
            num_shards: None,
            use_memory: false,
            preload: false,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl ShardConfig {
    pub fn validate(&self) -> Result<()> {
        match (self.index_files.is_empty(), &self.index_dir) {
            (true, None) => bail!("one of --index-files or --index-dir is required"),
            (false, Some(_)) => bail!("--index-files and --index-dir are mutually exclusive"),
            _ => {}
        }

        if self.partitioned {
            let num_shards = self.num_shards.unwrap_or(0);
            if num_shards == 0 {
                bail!("--partitioned requires --num-shards >= 1");
            }
            let shard_id = self.shard_id()?;
            if shard_id >= num_shards {
                bail!("shard id {} out of range for {} shard(s)", shard_id, num_shards);
            }
        }

        if self.preload && !self.use_memory {
            bail!("--preload requires --use-memory");
        }

        normalize_addr(&self.addr, DEFAULT_SHARD_PORT)?;
        Ok(())
    }

    /// The explicit `--shard-id`, or the id embedded in `--shard-name`.
    pub fn shard_id(&self) -> Result<usize> {
        if let Some(id) = self.shard_id {
            return Ok(id);
        }
        let name = self
            .shard_name
            .as_deref()
            .ok_or_else(|| anyhow!("--partitioned requires --shard-id or --shard-name"))?;
        shard_id_from_name(name)
            .ok_or_else(|| anyhow!("cannot derive shard id from name {:?}", name))
    }

    /// The index files this shard serves, after partition selection.
    pub fn resolve_index_files(&self) -> Result<Vec<PathBuf>> {
        let files = match &self.index_dir {
            Some(dir) => list_index_files(dir)
                .with_context(|| format!("failed to list index directory {}", dir.display()))?,
            None => self.index_files.clone(),
        };

        let files = if self.partitioned {
            let num_shards = self.num_shards.unwrap_or(0);
            select_files_for_shard(&files, self.shard_id()?, num_shards)
        } else {
            files
        };

        if files.is_empty() {
            bail!("no index files selected for this shard");
        }
        Ok(files)
    }

    pub fn bind_addr(&self) -> Result<String> {
        normalize_addr(&self.addr, DEFAULT_SHARD_PORT)
    }

    pub fn strategy(&self) -> SearchStrategy {
        if self.use_memory {
            SearchStrategy::Memory
        } else {
            SearchStrategy::Scan
        }
    }
}

#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    pub addr: String,
    pub shards: Vec<ShardDescriptor>,
    pub top_k: usize,
    pub shard_timeout: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            addr: format!("0.0.0.0:{}", DEFAULT_COORDINATOR_PORT),
            shards: Vec::new(),
            top_k: DEFAULT_TOP_K,
            shard_timeout: DEFAULT_SHARD_TIMEOUT,
        }
    }
}

impl CoordinatorConfig {
    /// Parses a comma-separated shard list; entries without a port get
    /// the default shard port.
    pub fn parse_shards(list: &str) -> Result<Vec<ShardDescriptor>> {
        list.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| -> Result<ShardDescriptor> {
                let addr = normalize_addr(entry, DEFAULT_SHARD_PORT)?;
                Ok(addr.parse::<ShardDescriptor>()?)
            })
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.shards.is_empty() {
            bail!("at least one shard address is required");
        }
        if self.shard_timeout.is_zero() {
            bail!("shard timeout must be > 0");
        }
        normalize_addr(&self.addr, DEFAULT_COORDINATOR_PORT)?;
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<String> {
        normalize_addr(&self.addr, DEFAULT_COORDINATOR_PORT)
    }
}

#[derive(Debug, Clone)]
pub struct PartitionConfig {
    pub input: PathBuf,
    pub num_partitions: usize,
    /// Output file pattern with one `%d` placeholder.
    pub output_pattern: String,
    /// Fixed seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("index.txt"),
            num_partitions: DEFAULT_PARTITIONS,
            output_pattern: DEFAULT_OUTPUT_PATTERN.to_string(),
            seed: None,
        }
    }
}

impl PartitionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_partitions == 0 {
            bail!("number of partitions must be >= 1");
        }
        validate_pattern(&self.output_pattern)?;
        Ok(())
    }
}
