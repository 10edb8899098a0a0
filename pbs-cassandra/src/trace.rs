use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use pbs::{LatencyTrace, LiveTrace, SampleTrace};

use crate::{
    client::{JolokiaClient, MetricsClient},
    config::CassandraConfig,
    error::{CassandraError, Result},
    histogram::{phase_pools, Histogram},
};

/// Latency trace resampling the latest latency window of a Cassandra table.
///
/// Draws come from an immutable snapshot taken by the last successful
/// [`refresh`](LiveTrace::refresh). A failed refresh keeps the previous
/// snapshot.
#[derive(Debug)]
pub struct CassandraTrace {
    config: CassandraConfig,
    client: Option<Box<dyn MetricsClient>>,
    snapshot: SampleTrace,
    refreshes: u64,
}

impl CassandraTrace {
    /// Connect to the node's Jolokia agent and take the first snapshot.
    pub async fn connect(config: CassandraConfig) -> Result<Self> {
        let client = JolokiaClient::new(&config)?;

        Self::with_client(config, Box::new(client)).await
    }

    /// Take the first snapshot through `client`.
    pub async fn with_client(
        config: CassandraConfig,
        client: Box<dyn MetricsClient>,
    ) -> Result<Self> {
        let snapshot = take_snapshot(client.as_ref(), &config, 0).await?;

        Ok(Self {
            config,
            client: Some(client),
            snapshot,
            refreshes: 1,
        })
    }

    pub fn config(&self) -> &CassandraConfig {
        &self.config
    }

    /// Samples currently drawn from.
    pub fn snapshot(&self) -> &SampleTrace {
        &self.snapshot
    }

    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }
}

impl LatencyTrace for CassandraTrace {
    fn next_w_value(&self) -> f64 {
        self.snapshot.next_w_value()
    }

    fn next_a_value(&self) -> f64 {
        self.snapshot.next_a_value()
    }

    fn next_r_value(&self) -> f64 {
        self.snapshot.next_r_value()
    }

    fn next_s_value(&self) -> f64 {
        self.snapshot.next_s_value()
    }
}

#[async_trait]
impl LiveTrace for CassandraTrace {
    type Error = CassandraError;

    async fn refresh(&mut self) -> Result<()> {
        let client = self.client.as_deref().ok_or(CassandraError::NotConnected)?;

        match take_snapshot(client, &self.config, self.refreshes).await {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.refreshes += 1;

                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "refresh failed, keeping previous latency window");

                Err(e)
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        if self.client.take().is_some() {
            tracing::debug!(url = %self.config.url(), "latency trace closed");
        }

        Ok(())
    }
}

async fn take_snapshot(
    client: &dyn MetricsClient,
    config: &CassandraConfig,
    refreshes: u64,
) -> Result<SampleTrace> {
    let read = fetch(client, config, Histogram::Read).await?;
    let write = fetch(client, config, Histogram::Write).await?;

    let pools = phase_pools(&read, &write, config.response_pool);
    let snapshot = match config.seed {
        Some(seed) => SampleTrace::with_seed(pools, seed.wrapping_add(refreshes))?,
        None => SampleTrace::new(pools)?,
    };

    tracing::info!(
        keyspace = %config.keyspace,
        table = %config.table,
        read = read.len(),
        write = write.len(),
        "latency window refreshed"
    );

    Ok(snapshot)
}

async fn fetch(
    client: &dyn MetricsClient,
    config: &CassandraConfig,
    histogram: Histogram,
) -> Result<Vec<f64>> {
    let mbean = config.mbean(histogram);
    let mbean = mbean.as_str();

    let values = backoff::future::retry(
        ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(config.retry_max_elapsed))
            .build(),
        move || async move {
            client.histogram_values(mbean).await.map_err(|e| {
                if e.is_retryable() {
                    tracing::warn!(error = %e, mbean, "retrying latency histogram read");

                    return backoff::Error::transient(e);
                }

                backoff::Error::permanent(e)
            })
        },
    )
    .await?;

    if values.is_empty() {
        return Err(CassandraError::NoSamples(histogram));
    }

    Ok(values)
}
