#![allow(dead_code)]

use pbs::{PhasePools, PredictionConfig, SampleTrace};
use rand::{rngs::StdRng, Rng, SeedableRng};

pub const SEED: u64 = 20120423;

/// Synthetic latency window with a slow, long-tailed write-apply phase.
pub fn random_pools(seed: u64) -> PhasePools {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pool = |low: f64, high: f64| -> Vec<f64> {
        (0..256).map(|_| rng.gen_range(low..high)).collect()
    };

    PhasePools {
        write_apply: pool(0.1, 200.0),
        write_ack: pool(0.1, 20.0),
        read_execute: pool(0.1, 20.0),
        read_response: pool(0.1, 20.0),
    }
}

pub fn seeded_trace() -> SampleTrace {
    SampleTrace::with_seed(random_pools(SEED), SEED).unwrap()
}

pub fn config(n: usize, r: usize, w: usize) -> PredictionConfig {
    PredictionConfig {
        n,
        r,
        w,
        time_since_write_ms: 0.0,
        versions_stale: 1,
        percentile: 0.99,
        trials: 2000,
    }
}
