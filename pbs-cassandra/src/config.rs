//! Connection settings for a Cassandra node's Jolokia agent.

use std::time::Duration;

use crate::histogram::{Histogram, ResponsePool};

/// Default Jolokia agent port.
pub const DEFAULT_PORT: u16 = 8778;

pub const DEFAULT_KEYSPACE: &str = "Keyspace1";

pub const DEFAULT_TABLE: &str = "Standard1";

/// Metric type used by Cassandra before 3.0; later versions also register
/// the same histograms under `Table`.
pub const DEFAULT_METRIC_TYPE: &str = "ColumnFamily";

#[derive(Clone, Debug)]
pub struct CassandraConfig {
    pub host: String,

    pub port: u16,

    pub keyspace: String,

    pub table: String,

    /// `type` key of the latency object names.
    pub metric_type: String,

    /// Histogram backing read-response latencies.
    pub response_pool: ResponsePool,

    /// Seed for the snapshot's sampler. Each refresh derives a new seed
    /// from it so successive snapshots are still reproducible.
    pub seed: Option<u64>,

    /// Timeout of a single HTTP request.
    pub request_timeout: Duration,

    /// How long connect and refresh keep retrying transient failures.
    pub retry_max_elapsed: Duration,
}

impl Default for CassandraConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: DEFAULT_PORT,
            keyspace: DEFAULT_KEYSPACE.to_owned(),
            table: DEFAULT_TABLE.to_owned(),
            metric_type: DEFAULT_METRIC_TYPE.to_owned(),
            response_pool: ResponsePool::default(),
            seed: None,
            request_timeout: Duration::from_secs(5),
            retry_max_elapsed: Duration::from_secs(10),
        }
    }
}

impl CassandraConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn with_table(mut self, keyspace: impl Into<String>, table: impl Into<String>) -> Self {
        self.keyspace = keyspace.into();
        self.table = table.into();
        self
    }

    pub fn with_metric_type(mut self, metric_type: impl Into<String>) -> Self {
        self.metric_type = metric_type.into();
        self
    }

    pub fn with_response_pool(mut self, response_pool: ResponsePool) -> Self {
        self.response_pool = response_pool;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_retry_max_elapsed(mut self, max_elapsed: Duration) -> Self {
        self.retry_max_elapsed = max_elapsed;
        self
    }

    /// Jolokia endpoint of the node.
    pub fn url(&self) -> String {
        format!("http://{}:{}/jolokia/", self.host, self.port)
    }

    /// Object name of `histogram` for the configured table.
    pub fn mbean(&self, histogram: Histogram) -> String {
        format!(
            "org.apache.cassandra.metrics:type={},keyspace={},scope={},name={}",
            self.metric_type,
            self.keyspace,
            self.table,
            histogram.metric_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mbean() {
        let config = CassandraConfig::default().with_table("ks", "users");

        assert_eq!(
            config.mbean(Histogram::Read),
            "org.apache.cassandra.metrics:type=ColumnFamily,keyspace=ks,scope=users,name=ReadLatency"
        );

        let config = config.with_metric_type("Table");
        assert_eq!(
            config.mbean(Histogram::Write),
            "org.apache.cassandra.metrics:type=Table,keyspace=ks,scope=users,name=WriteLatency"
        );
    }

    #[test]
    fn test_url() {
        assert_eq!(
            CassandraConfig::new("10.0.0.1", 8080).url(),
            "http://10.0.0.1:8080/jolokia/"
        );
        assert_eq!(CassandraConfig::default().url(), "http://127.0.0.1:8778/jolokia/");
    }
}
