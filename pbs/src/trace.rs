use async_trait::async_trait;
use parse_display::{Display, FromStr};

mod fixture;
mod sample;

pub use fixture::*;
pub use sample::*;

/// One leg of a replicated operation, in WARS terms.
#[derive(Display, FromStr, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[display(style = "kebab-case")]
pub enum Phase {
    /// `W`: coordinator sends a write until a replica applies it.
    WriteApply,
    /// `A`: replica acknowledges a write until the coordinator observes it.
    WriteAck,
    /// `R`: coordinator sends a read until a replica executes it.
    ReadExecute,
    /// `S`: replica sends a read response until the coordinator receives it.
    ReadResponse,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::WriteApply,
        Phase::WriteAck,
        Phase::ReadExecute,
        Phase::ReadResponse,
    ];
}

/// Source of independent latency samples, in milliseconds, for the four
/// WARS phases.
///
/// Every call returns a fresh draw; no ordering is implied between calls
/// for different phases. Implementations must never be handed to the
/// predictor while any of their phases has no samples.
pub trait LatencyTrace: Send + Sync {
    fn next_w_value(&self) -> f64;

    fn next_a_value(&self) -> f64;

    fn next_r_value(&self) -> f64;

    fn next_s_value(&self) -> f64;

    fn next_value(&self, phase: Phase) -> f64 {
        match phase {
            Phase::WriteApply => self.next_w_value(),
            Phase::WriteAck => self.next_a_value(),
            Phase::ReadExecute => self.next_r_value(),
            Phase::ReadResponse => self.next_s_value(),
        }
    }
}

/// A trace backed by a live metrics source.
///
/// Used by drivers, never by the predictor: `refresh` replaces the sample
/// window and `close` releases the connection.
#[async_trait]
pub trait LiveTrace: LatencyTrace {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn refresh(&mut self) -> std::result::Result<(), Self::Error>;

    async fn close(&mut self) -> std::result::Result<(), Self::Error>;
}
