//! Scratch state for a single Monte Carlo trial.
//!
//! A trial sends one write to all `N` replicas and, `t` milliseconds after
//! the write quorum acknowledged, one read to `R` replicas. Read replica `i`
//! is write replica `i`; the simulation only cares how many replicas are
//! involved, not which ones.

use crate::{config::PredictionConfig, stats, trace::LatencyTrace};

/// What a single trial observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialOutcome {
    /// Time until the `w`-th write acknowledgment reached the coordinator.
    pub write_latency: f64,
    /// Time until the `r`-th read response reached the coordinator.
    pub read_latency: f64,
    /// Whether any of the read responses carried the new version.
    pub consistent: bool,
}

/// Per-replica latencies for one trial.
///
/// Buffers are allocated once and cleared at the start of every trial so
/// nothing carries over between trials.
#[derive(Debug, Default)]
pub struct Trial {
    /// `W` sample per write replica.
    write_apply: Vec<f64>,
    /// `W + A` per write replica.
    write_completion: Vec<f64>,
    /// `R` sample per read replica.
    read_execute: Vec<f64>,
    /// `R + S` per read replica, in replica order. `None` marks a replica
    /// already examined by the staleness check.
    read_completion: Vec<Option<f64>>,
    /// `R + S` in arrival order.
    read_arrivals: Vec<f64>,
}

impl Trial {
    pub fn with_capacity(n: usize, r: usize) -> Self {
        Self {
            write_apply: Vec::with_capacity(n),
            write_completion: Vec::with_capacity(n),
            read_execute: Vec::with_capacity(r),
            read_completion: Vec::with_capacity(r),
            read_arrivals: Vec::with_capacity(r),
        }
    }

    /// Run one trial against `trace`.
    pub fn simulate<T: LatencyTrace + ?Sized>(
        &mut self,
        trace: &T,
        config: &PredictionConfig,
    ) -> TrialOutcome {
        self.clear();
        self.draw(trace, config.n, config.r);

        stats::sort(&mut self.write_completion);
        let write_latency = stats::order_statistic(&self.write_completion, config.w);

        self.read_arrivals
            .extend(self.read_completion.iter().flatten().copied());
        stats::sort(&mut self.read_arrivals);
        let read_latency = stats::order_statistic(&self.read_arrivals, config.r);

        let consistent = self.is_consistent(write_latency, config.time_since_write_ms);

        TrialOutcome {
            write_latency,
            read_latency,
            consistent,
        }
    }

    fn draw<T: LatencyTrace + ?Sized>(&mut self, trace: &T, n: usize, r: usize) {
        for _ in 0..n {
            let w = trace.next_w_value();
            let a = trace.next_a_value();

            self.write_apply.push(w);
            self.write_completion.push(w + a);
        }

        for _ in 0..r {
            let r = trace.next_r_value();
            let s = trace.next_s_value();

            self.read_execute.push(r);
            self.read_completion.push(Some(r + s));
        }
    }

    /// Walk the read responses in arrival order and report whether any
    /// replica had applied the write before the read reached it.
    ///
    /// The read is sent at `write_latency + time_since_write`, so it reaches
    /// replica `i` at that time plus `R[i]`; the replica applied the write at
    /// `W[i]`.
    fn is_consistent(&mut self, write_latency: f64, time_since_write: f64) -> bool {
        for &arrival in &self.read_arrivals {
            let Some(replica) = self
                .read_completion
                .iter()
                .position(|slot| *slot == Some(arrival))
            else {
                continue;
            };

            if write_latency + time_since_write + self.read_execute[replica]
                >= self.write_apply[replica]
            {
                return true;
            }

            // Equal latencies must resolve to the next replica, not this one again
            self.read_completion[replica] = None;
        }

        false
    }

    pub fn clear(&mut self) {
        self.write_apply.clear();
        self.write_completion.clear();
        self.read_execute.clear();
        self.read_completion.clear();
        self.read_arrivals.clear();
    }
}
