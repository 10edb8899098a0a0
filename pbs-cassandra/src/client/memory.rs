use async_trait::async_trait;
use parking_lot::RwLock;
use std::{collections::HashMap, sync::Arc};

use crate::{
    client::MetricsClient,
    error::{CassandraError, Result},
};

/// Histograms held in memory, keyed by object name.
///
/// Clones share the same histograms.
#[derive(Debug, Clone, Default)]
pub struct MemoryClient(Arc<RwLock<HashMap<String, Vec<f64>>>>);

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the recorded latencies, in microseconds, of `mbean`.
    pub fn set(&self, mbean: impl Into<String>, values: Vec<f64>) {
        self.0.write().insert(mbean.into(), values);
    }

    pub fn remove(&self, mbean: &str) -> Option<Vec<f64>> {
        self.0.write().remove(mbean)
    }
}

#[async_trait]
impl MetricsClient for MemoryClient {
    async fn histogram_values(&self, mbean: &str) -> Result<Vec<f64>> {
        self.0
            .read()
            .get(mbean)
            .cloned()
            .ok_or_else(|| CassandraError::Jolokia {
                mbean: mbean.to_owned(),
                status: 404,
                error: format!("javax.management.InstanceNotFoundException : {mbean}"),
            })
    }
}
