//! Predicts, for every useful `(R, W)` pair of an `N`-replica Cassandra
//! table, how likely a read is to see a recent write and how long reads and
//! writes take.
//!
//! ```text
//! pbs --host 10.0.0.1 --keyspace ks --table users -n 3 -t 10
//! pbs --samples latencies.json --json
//! ```

mod report;
mod samples;

use std::{io::Write, path::PathBuf};

use clap::Parser;
use pbs::{config, sweep::sweep, ConfigBuilder, LiveTrace};
use pbs_cassandra::{config as cassandra, CassandraConfig, CassandraTrace, ResponsePool};

use crate::samples::SampleFile;

#[derive(Parser)]
#[command(name = "pbs")]
#[command(about = "Probabilistically bounded staleness for Cassandra quorums")]
struct Args {
    /// Host running the Jolokia agent
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Jolokia agent port
    #[arg(short, long, default_value_t = cassandra::DEFAULT_PORT)]
    port: u16,

    #[arg(long, default_value = cassandra::DEFAULT_KEYSPACE)]
    keyspace: String,

    #[arg(long, default_value = cassandra::DEFAULT_TABLE)]
    table: String,

    /// `type` of the latency metrics (`Table` on Cassandra 3.0 and later)
    #[arg(long, default_value = cassandra::DEFAULT_METRIC_TYPE)]
    metric_type: String,

    /// Number of replicas (N)
    #[arg(short = 'n', long, default_value_t = config::DEFAULT_REPLICATION_FACTOR)]
    replication_factor: usize,

    /// Time between the write returning and the read starting
    #[arg(short = 't', long, default_value_t = config::DEFAULT_TIME_SINCE_WRITE_MS)]
    time_after_write_ms: f64,

    /// Tolerated staleness, in versions (k)
    #[arg(short = 'k', long, default_value_t = config::DEFAULT_VERSIONS_STALE)]
    versions: u32,

    /// Reported latency percentile, between 0 and 1
    #[arg(long, default_value_t = config::DEFAULT_PERCENTILE)]
    percentile: f64,

    /// Monte Carlo trials per (R, W) pair
    #[arg(long, default_value_t = config::DEFAULT_TRIALS)]
    trials: usize,

    /// Histogram read-response latencies are drawn from (read or write)
    #[arg(long, default_value_t = ResponsePool::Read)]
    response_pool: ResponsePool,

    /// Seed for reproducible predictions
    #[arg(long)]
    seed: Option<u64>,

    /// Read latencies from a JSON file (`{"read": [..], "write": [..]}`, in
    /// microseconds) instead of a live node
    #[arg(long)]
    samples: Option<PathBuf>,

    /// Print one JSON object per prediction
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pbs=info".parse()?)
                .add_directive("pbs_cassandra=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let prediction = ConfigBuilder::new()
        .replication_factor(args.replication_factor)
        .time_since_write_ms(args.time_after_write_ms)
        .versions_stale(args.versions)
        .percentile(args.percentile)
        .trials(args.trials)
        .build()?;

    let mut source = CassandraConfig::new(args.host, args.port)
        .with_table(args.keyspace, args.table)
        .with_metric_type(args.metric_type)
        .with_response_pool(args.response_pool);

    if let Some(seed) = args.seed {
        source = source.with_seed(seed);
    }

    let mut trace = match args.samples {
        Some(path) => {
            let client = SampleFile::load(&path)?.into_client(&source);
            CassandraTrace::with_client(source, Box::new(client)).await?
        }
        None => {
            tracing::info!(url = %source.url(), "connecting");
            CassandraTrace::connect(source).await?
        }
    };

    let printed = print_sweep(&prediction, &trace, args.json);
    trace.close().await?;

    printed
}

fn print_sweep(
    prediction: &pbs::PredictionConfig,
    trace: &CassandraTrace,
    json: bool,
) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if !json {
        report::write_header(
            &mut out,
            prediction.time_since_write_ms,
            prediction.versions_stale,
        )?;
    }

    for result in sweep(prediction, trace) {
        let result = result?;

        if json {
            report::write_json(&mut out, &result)?;
        } else {
            report::write_text(&mut out, &result)?;
        }
    }

    out.flush()?;

    Ok(())
}
