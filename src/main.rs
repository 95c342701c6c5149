use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use shard_search::config::{
    CoordinatorConfig, DEFAULT_OUTPUT_PATTERN, DEFAULT_PARTITIONS, DEFAULT_TOP_K,
    PartitionConfig, ShardConfig,
};
use shard_search::coordinator::service::ShardCoordinator;
use shard_search::index::store::IndexStore;
use shard_search::partitioner::partition::partition_index_file;
use shard_search::partitioner::rng::seeded_rng;
use shard_search::shard::service::ShardService;
use shard_search::{coordinator, shard};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shard-search", about = "Sharded keyword search over inverted-index files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve one index shard
    Shard(ShardArgs),
    /// Serve the public search API in front of the shards
    Coordinator(CoordinatorArgs),
    /// Split one index file into N partition files
    Partition(PartitionArgs),
}

#[derive(Args)]
struct ShardArgs {
    /// Listen address; a bare host gets port 9090
    #[arg(long, env = "SHARD_ADDR", default_value = "0.0.0.0:9090")]
    addr: String,

    /// Comma-separated index files
    #[arg(long, env = "INDEX_FILES", value_delimiter = ',', conflicts_with = "index_dir")]
    index_files: Vec<PathBuf>,

    /// Directory whose files make up the index
    #[arg(long, env = "INDEX_DIR")]
    index_dir: Option<PathBuf>,

    /// Serve only the `<prefix>-<n>.txt` files assigned to this shard
    #[arg(long, env = "PARTITIONED", default_value_t = false)]
    partitioned: bool,

    #[arg(long, env = "SHARD_ID")]
    shard_id: Option<usize>,

    /// Shard name of the form `name-<id>` (e.g. a StatefulSet pod name)
    #[arg(long, env = "SHARD_NAME")]
    shard_name: Option<String>,

    #[arg(long, env = "NUM_SHARDS")]
    num_shards: Option<usize>,

    /// Load the index into memory once instead of scanning files per query
    #[arg(long, env = "USE_MEMORY", default_value_t = false)]
    use_memory: bool,

    /// With --use-memory, load the index before accepting queries
    #[arg(long, env = "PRELOAD", default_value_t = false)]
    preload: bool,

    /// Default result limit for `/api/search`
    #[arg(long, env = "TOP_K", default_value_t = DEFAULT_TOP_K)]
    top_k: usize,
}

#[derive(Args)]
struct CoordinatorArgs {
    /// Listen address; a bare host gets port 8080
    #[arg(long, env = "COORDINATOR_ADDR", default_value = "0.0.0.0:8080")]
    addr: String,

    /// Comma-separated shard addresses (`host` or `host:port`)
    #[arg(long, env = "SHARDS")]
    shards: String,

    #[arg(long, env = "TOP_K", default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// Per-shard request timeout in milliseconds
    #[arg(long, env = "SHARD_TIMEOUT_MS", default_value_t = 5000)]
    shard_timeout_ms: u64,
}

#[derive(Args)]
struct PartitionArgs {
    /// Combined index file to split
    #[arg(long)]
    input: PathBuf,

    /// Number of partitions
    #[arg(short = 'n', long = "partitions", default_value_t = DEFAULT_PARTITIONS)]
    num_partitions: usize,

    /// Output pattern with one `%d` placeholder
    #[arg(long, default_value = DEFAULT_OUTPUT_PATTERN)]
    output: String,

    /// Seed for a reproducible assignment
    #[arg(long)]
    seed: Option<u64>,
}

impl From<ShardArgs> for ShardConfig {
    fn from(args: ShardArgs) -> Self {
        Self {
            addr: args.addr,
            index_files: args.index_files,
            index_dir: args.index_dir,
            partitioned: args.partitioned,
            shard_id: args.shard_id,
            shard_name: args.shard_name,
            num_shards: args.num_shards,
            use_memory: args.use_memory,
            preload: args.preload,
            top_k: args.top_k,
        }
    }
}

impl From<PartitionArgs> for PartitionConfig {
    fn from(args: PartitionArgs) -> Self {
        Self {
            input: args.input,
            num_partitions: args.num_partitions,
            output_pattern: args.output,
            seed: args.seed,
        }
    }
}

impl TryFrom<CoordinatorArgs> for CoordinatorConfig {
    type Error = anyhow::Error;

    fn try_from(args: CoordinatorArgs) -> anyhow::Result<Self> {
        Ok(Self {
            addr: args.addr,
            shards: CoordinatorConfig::parse_shards(&args.shards)?,
            top_k: args.top_k,
            shard_timeout: Duration::from_millis(args.shard_timeout_ms),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Shard(args) => run_shard(args.into()).await,
        Command::Coordinator(args) => match CoordinatorConfig::try_from(args) {
            Ok(config) => run_coordinator(config).await,
            Err(e) => Err(e),
        },
        Command::Partition(args) => run_partition(args.into()).await,
    };

    if let Err(e) = &outcome {
        tracing::error!("{:#}", e);
    }
    outcome
}

async fn run_shard(config: ShardConfig) -> anyhow::Result<()> {
    config.validate()?;
    let files = config.resolve_index_files()?;
    let bind_addr = config.bind_addr()?;

    tracing::info!(
        "Starting shard with {} index file(s), strategy={}, topK={}",
        files.len(),
        config.strategy(),
        config.top_k
    );
    for file in &files {
        tracing::debug!("  - {}", file.display());
    }

    let store = IndexStore::new(files, config.strategy())?;
    if config.preload {
        store.preload().await?;
    }
    let service = ShardService::new(store, config.top_k);
    let app = shard::handlers::router(service);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Shard listening on {}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn run_coordinator(config: CoordinatorConfig) -> anyhow::Result<()> {
    config.validate()?;
    let bind_addr = config.bind_addr()?;

    tracing::info!(
        "Starting coordinator over {} shard(s), topK={}, shard timeout={:?}",
        config.shards.len(),
        config.top_k,
        config.shard_timeout
    );
    for shard in &config.shards {
        tracing::info!("  - {}", shard);
    }

    let coordinator = ShardCoordinator::new(&config);
    let app = coordinator::handlers::router(coordinator);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Coordinator listening on {}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn run_partition(config: PartitionConfig) -> anyhow::Result<()> {
    config.validate()?;

    let summary = tokio::task::spawn_blocking(move || {
        let mut rng = seeded_rng(config.seed);
        partition_index_file(
            &config.input,
            config.num_partitions,
            &config.output_pattern,
            &mut rng,
        )
    })
    .await??;

    tracing::info!(
        "Done: {} line(s) read, {} skipped",
        summary.lines_read,
        summary.lines_skipped
    );
    Ok(())
}
