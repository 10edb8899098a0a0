use anyhow::Context;
use pbs_cassandra::{CassandraConfig, Histogram, MemoryClient};
use serde::Deserialize;
use std::path::Path;

/// Recorded round-trip latencies, in microseconds, as exported from a node.
#[derive(Debug, Deserialize)]
pub struct SampleFile {
    pub read: Vec<f64>,
    pub write: Vec<f64>,
}

impl SampleFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read samples from {}", path.display()))?;

        serde_json::from_str(&data)
            .with_context(|| format!("invalid samples file {}", path.display()))
    }

    /// Serve the samples under the histogram names `config` reads.
    pub fn into_client(self, config: &CassandraConfig) -> MemoryClient {
        let client = MemoryClient::new();
        client.set(config.mbean(Histogram::Read), self.read);
        client.set(config.mbean(Histogram::Write), self.write);
        client
    }
}
