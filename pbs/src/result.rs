use serde::{Deserialize, Serialize};

use crate::config::PredictionConfig;

/// Outcome of one prediction for a given `N`, `R` and `W`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    n: usize,
    r: usize,
    w: usize,
    time_since_write_ms: f64,
    versions_stale: u32,
    consistency_probability: f64,
    average_read_latency: f64,
    average_write_latency: f64,
    percentile_read_latency: f64,
    percentile_read_latency_percentile: f64,
    percentile_write_latency: f64,
    percentile_write_latency_percentile: f64,
}

impl PredictionResult {
    pub(crate) fn new(
        config: &PredictionConfig,
        consistency_probability: f64,
        average_read_latency: f64,
        average_write_latency: f64,
        percentile_read_latency: f64,
        percentile_write_latency: f64,
    ) -> Self {
        Self {
            n: config.n,
            r: config.r,
            w: config.w,
            time_since_write_ms: config.time_since_write_ms,
            versions_stale: config.versions_stale,
            consistency_probability,
            average_read_latency,
            average_write_latency,
            percentile_read_latency,
            percentile_read_latency_percentile: config.percentile,
            percentile_write_latency,
            percentile_write_latency_percentile: config.percentile,
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn r(&self) -> usize {
        self.r
    }

    pub fn w(&self) -> usize {
        self.w
    }

    pub fn time_since_write_ms(&self) -> f64 {
        self.time_since_write_ms
    }

    pub fn versions_stale(&self) -> u32 {
        self.versions_stale
    }

    /// Probability that a read returns a version at most
    /// [`versions_stale`](Self::versions_stale) versions old.
    pub fn consistency_probability(&self) -> f64 {
        self.consistency_probability
    }

    pub fn average_read_latency(&self) -> f64 {
        self.average_read_latency
    }

    pub fn average_write_latency(&self) -> f64 {
        self.average_write_latency
    }

    pub fn percentile_read_latency(&self) -> f64 {
        self.percentile_read_latency
    }

    pub fn percentile_read_latency_percentile(&self) -> f64 {
        self.percentile_read_latency_percentile
    }

    pub fn percentile_write_latency(&self) -> f64 {
        self.percentile_write_latency
    }

    pub fn percentile_write_latency_percentile(&self) -> f64 {
        self.percentile_write_latency_percentile
    }
}
