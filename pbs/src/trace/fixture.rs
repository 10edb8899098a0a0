use parking_lot::Mutex;

use crate::{
    error::Result,
    trace::{LatencyTrace, PhasePools, Phase},
};

/// Trace returning the same latency for every draw of a phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantTrace {
    w: f64,
    a: f64,
    r: f64,
    s: f64,
}

impl ConstantTrace {
    pub fn new(w: f64, a: f64, r: f64, s: f64) -> Self {
        Self { w, a, r, s }
    }

    /// Same latency for all four phases.
    pub fn uniform(latency: f64) -> Self {
        Self::new(latency, latency, latency, latency)
    }
}

impl LatencyTrace for ConstantTrace {
    fn next_w_value(&self) -> f64 {
        self.w
    }

    fn next_a_value(&self) -> f64 {
        self.a
    }

    fn next_r_value(&self) -> f64 {
        self.r
    }

    fn next_s_value(&self) -> f64 {
        self.s
    }
}

/// Trace replaying a scripted sequence per phase, wrapping around at the end.
///
/// Draw order within a trial is fixed by the predictor (per replica: W then
/// A; per read replica: R then S), so scripts map one to one onto replicas.
#[derive(Debug)]
pub struct ReplayTrace {
    scripts: PhasePools,
    cursors: Mutex<[usize; 4]>,
}

impl ReplayTrace {
    pub fn new(scripts: PhasePools) -> Result<Self> {
        scripts.validate()?;

        Ok(Self {
            scripts,
            cursors: Mutex::new([0; 4]),
        })
    }

    /// Total number of draws served so far, across all phases.
    pub fn draws(&self) -> usize {
        self.cursors.lock().iter().sum()
    }

    /// Restart every script from its first value.
    pub fn rewind(&self) {
        *self.cursors.lock() = [0; 4];
    }

    fn replay(&self, phase: Phase) -> f64 {
        let script = self.scripts.get(phase);
        let slot = phase as usize;

        let mut cursors = self.cursors.lock();
        let value = script[cursors[slot] % script.len()];
        cursors[slot] += 1;

        value
    }
}

impl LatencyTrace for ReplayTrace {
    fn next_w_value(&self) -> f64 {
        self.replay(Phase::WriteApply)
    }

    fn next_a_value(&self) -> f64 {
        self.replay(Phase::WriteAck)
    }

    fn next_r_value(&self) -> f64 {
        self.replay(Phase::ReadExecute)
    }

    fn next_s_value(&self) -> f64 {
        self.replay(Phase::ReadResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PbsError;

    #[test]
    fn test_constant() {
        let trace = ConstantTrace::uniform(10.0);
        assert_eq!(trace.next_w_value(), 10.0);
        assert_eq!(trace.next_s_value(), 10.0);
    }

    #[test]
    fn test_replay_wraps() {
        let trace = ReplayTrace::new(PhasePools {
            write_apply: vec![1.0, 2.0, 3.0],
            write_ack: vec![0.5],
            read_execute: vec![7.0, 8.0],
            read_response: vec![9.0],
        })
        .unwrap();

        let w: Vec<f64> = (0..5).map(|_| trace.next_w_value()).collect();
        assert_eq!(w, vec![1.0, 2.0, 3.0, 1.0, 2.0]);

        let r: Vec<f64> = (0..3).map(|_| trace.next_r_value()).collect();
        assert_eq!(r, vec![7.0, 8.0, 7.0]);

        assert_eq!(trace.next_a_value(), 0.5);
        assert_eq!(trace.draws(), 9);

        trace.rewind();
        assert_eq!(trace.draws(), 0);
        assert_eq!(trace.next_w_value(), 1.0);
    }

    #[test]
    fn test_replay_rejects_empty_script() {
        let err = ReplayTrace::new(PhasePools {
            write_apply: vec![1.0],
            write_ack: vec![1.0],
            read_execute: vec![1.0],
            read_response: vec![],
        })
        .unwrap_err();

        assert_eq!(
            err,
            PbsError::EmptyTrace {
                phase: Phase::ReadResponse
            }
        );
    }
}
