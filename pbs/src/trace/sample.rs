use parking_lot::Mutex;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{PbsError, Result},
    trace::{LatencyTrace, Phase},
};

/// Captured latency samples, in milliseconds, one pool per phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhasePools {
    pub write_apply: Vec<f64>,
    pub write_ack: Vec<f64>,
    pub read_execute: Vec<f64>,
    pub read_response: Vec<f64>,
}

impl PhasePools {
    pub fn get(&self, phase: Phase) -> &[f64] {
        match phase {
            Phase::WriteApply => &self.write_apply,
            Phase::WriteAck => &self.write_ack,
            Phase::ReadExecute => &self.read_execute,
            Phase::ReadResponse => &self.read_response,
        }
    }

    /// Check that every pool is non-empty and holds finite, non-negative values.
    pub fn validate(&self) -> Result<()> {
        for phase in Phase::ALL {
            let pool = self.get(phase);

            if pool.is_empty() {
                return Err(PbsError::EmptyTrace { phase });
            }

            if let Some(value) = pool.iter().find(|v| !v.is_finite() || **v < 0.0) {
                return Err(PbsError::InvalidSample {
                    phase,
                    value: *value,
                });
            }
        }

        Ok(())
    }
}

/// Trace that resamples, with replacement, from a fixed window of
/// captured latencies.
pub struct SampleTrace {
    pools: PhasePools,
    rng: Mutex<StdRng>,
}

impl SampleTrace {
    /// Create a trace seeded from system entropy.
    pub fn new(pools: PhasePools) -> Result<Self> {
        Self::with_rng(pools, StdRng::from_entropy())
    }

    /// Create a trace whose draws are reproducible for a given seed.
    pub fn with_seed(pools: PhasePools, seed: u64) -> Result<Self> {
        Self::with_rng(pools, StdRng::seed_from_u64(seed))
    }

    fn with_rng(pools: PhasePools, rng: StdRng) -> Result<Self> {
        pools.validate()?;

        Ok(Self {
            pools,
            rng: Mutex::new(rng),
        })
    }

    pub fn pools(&self) -> &PhasePools {
        &self.pools
    }

    fn draw(&self, phase: Phase) -> f64 {
        let pool = self.pools.get(phase);
        let idx = self.rng.lock().gen_range(0..pool.len());

        pool[idx]
    }
}

impl Clone for SampleTrace {
    fn clone(&self) -> Self {
        Self {
            pools: self.pools.clone(),
            rng: Mutex::new(self.rng.lock().clone()),
        }
    }
}

impl std::fmt::Debug for SampleTrace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleTrace")
            .field("write_apply", &self.pools.write_apply.len())
            .field("write_ack", &self.pools.write_ack.len())
            .field("read_execute", &self.pools.read_execute.len())
            .field("read_response", &self.pools.read_response.len())
            .finish()
    }
}

impl LatencyTrace for SampleTrace {
    fn next_w_value(&self) -> f64 {
        self.draw(Phase::WriteApply)
    }

    fn next_a_value(&self) -> f64 {
        self.draw(Phase::WriteAck)
    }

    fn next_r_value(&self) -> f64 {
        self.draw(Phase::ReadExecute)
    }

    fn next_s_value(&self) -> f64 {
        self.draw(Phase::ReadResponse)
    }
}
