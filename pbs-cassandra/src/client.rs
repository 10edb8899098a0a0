use async_trait::async_trait;
use dyn_clone::DynClone;

use crate::error::Result;

mod jolokia;
mod memory;

pub use jolokia::*;
pub use memory::*;

/// Transport reading latency histograms from a node.
#[async_trait]
pub trait MetricsClient: DynClone + Send + Sync {
    /// Recorded latencies, in microseconds, of the histogram named `mbean`.
    async fn histogram_values(&self, mbean: &str) -> Result<Vec<f64>>;
}

dyn_clone::clone_trait_object!(MetricsClient);

impl std::fmt::Debug for dyn MetricsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MetricsClient")
    }
}
