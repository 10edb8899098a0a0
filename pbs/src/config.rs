//! Prediction request parameters and their defaults.
//!
//! The defaults match a three-replica cluster read and written at
//! consistency level ONE, sampled one millisecond after a write.

use crate::error::{PbsError, Result};

/// Default replication factor `N`.
pub const DEFAULT_REPLICATION_FACTOR: usize = 3;

/// Default read quorum `R`.
pub const DEFAULT_READ_QUORUM: usize = 1;

/// Default write quorum `W`.
pub const DEFAULT_WRITE_QUORUM: usize = 1;

/// Default time between the write completing and the read starting, in milliseconds.
pub const DEFAULT_TIME_SINCE_WRITE_MS: f64 = 1.0;

/// Default staleness bound `k`, in versions.
///
/// A value of 1 asks for the probability of reading the latest version.
pub const DEFAULT_VERSIONS_STALE: u32 = 1;

/// Default latency percentile reported alongside the averages.
pub const DEFAULT_PERCENTILE: f64 = 0.99;

/// Default number of Monte Carlo trials.
///
/// Larger values tighten the estimate at a linear cost in run time; this is
/// the only bound on how long a prediction takes.
pub const DEFAULT_TRIALS: usize = 10_000;

/// A single prediction request.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionConfig {
    /// Replication factor `N`.
    pub n: usize,

    /// Read quorum `R`, the number of replicas a read waits for.
    pub r: usize,

    /// Write quorum `W`, the number of acknowledgments a write waits for.
    pub w: usize,

    /// Milliseconds between the write completing and the read being issued.
    pub time_since_write_ms: f64,

    /// Staleness bound `k`.
    pub versions_stale: u32,

    /// Latency percentile to report, as a fraction in `[0, 1]`.
    pub percentile: f64,

    /// Number of Monte Carlo trials.
    pub trials: usize,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            n: DEFAULT_REPLICATION_FACTOR,
            r: DEFAULT_READ_QUORUM,
            w: DEFAULT_WRITE_QUORUM,
            time_since_write_ms: DEFAULT_TIME_SINCE_WRITE_MS,
            versions_stale: DEFAULT_VERSIONS_STALE,
            percentile: DEFAULT_PERCENTILE,
            trials: DEFAULT_TRIALS,
        }
    }
}

impl PredictionConfig {
    /// Validate the request.
    ///
    /// # Checks
    ///
    /// - `r <= n` and `w <= n`
    /// - `versions_stale >= 1`
    /// - `0 <= percentile <= 1`
    /// - `trials > 0`
    /// - `time_since_write_ms` is finite
    pub fn validate(&self) -> Result<()> {
        if self.r > self.n {
            return Err(PbsError::ReadQuorumTooLarge {
                r: self.r,
                n: self.n,
            });
        }

        if self.w > self.n {
            return Err(PbsError::WriteQuorumTooLarge {
                w: self.w,
                n: self.n,
            });
        }

        if self.versions_stale < 1 {
            return Err(PbsError::InvalidVersionsStale(self.versions_stale));
        }

        if !(0.0..=1.0).contains(&self.percentile) {
            return Err(PbsError::PercentileOutOfRange(self.percentile));
        }

        if self.trials == 0 {
            return Err(PbsError::NoTrials);
        }

        if !self.time_since_write_ms.is_finite() {
            return Err(PbsError::InvalidTimeSinceWrite(self.time_since_write_ms));
        }

        Ok(())
    }

    /// Same request with a different quorum shape.
    pub fn with_quorums(&self, r: usize, w: usize) -> Self {
        Self {
            r,
            w,
            ..self.clone()
        }
    }
}

/// Builder for [`PredictionConfig`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: PredictionConfig,
}

impl ConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the replication factor `N`.
    pub fn replication_factor(mut self, n: usize) -> Self {
        self.config.n = n;
        self
    }

    /// Set the read quorum `R`.
    pub fn read_quorum(mut self, r: usize) -> Self {
        self.config.r = r;
        self
    }

    /// Set the write quorum `W`.
    pub fn write_quorum(mut self, w: usize) -> Self {
        self.config.w = w;
        self
    }

    /// Set the time between write and read, in milliseconds.
    pub fn time_since_write_ms(mut self, ms: f64) -> Self {
        self.config.time_since_write_ms = ms;
        self
    }

    /// Set the staleness bound `k`.
    pub fn versions_stale(mut self, k: u32) -> Self {
        self.config.versions_stale = k;
        self
    }

    /// Set the reported latency percentile.
    pub fn percentile(mut self, percentile: f64) -> Self {
        self.config.percentile = percentile;
        self
    }

    /// Set the number of Monte Carlo trials.
    pub fn trials(mut self, trials: usize) -> Self {
        self.config.trials = trials;
        self
    }

    /// Validate and build the final configuration.
    pub fn build(self) -> Result<PredictionConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
