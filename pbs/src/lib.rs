//! Probabilistically Bounded Staleness (PBS) prediction.
//!
//! Predicts, for an `N`-replica store read at consistency level `R` and
//! written at consistency level `W`:
//!
//! - the probability that a read issued `t` milliseconds after a write
//!   returns a version at most `k` versions stale, and
//! - the average and percentile latency of reads and writes,
//!
//! using nothing but observed per-operation latencies. Predictions come from
//! Monte Carlo simulation of the WARS model (Bailis et al., VLDB 2012):
//!
//! - **W**: coordinator sends a write until a replica applies it
//! - **A**: replica acknowledges until the coordinator hears of it
//! - **R**: coordinator sends a read until a replica executes it
//! - **S**: replica responds until the coordinator receives it
//!
//! # Quick Start
//!
//! ```
//! use pbs::{ConfigBuilder, ConstantTrace};
//!
//! let trace = ConstantTrace::uniform(10.0);
//! let config = ConfigBuilder::new()
//!     .replication_factor(3)
//!     .read_quorum(1)
//!     .write_quorum(1)
//!     .trials(1000)
//!     .build()?;
//!
//! let result = pbs::predict(&config, &trace)?;
//! assert_eq!(result.consistency_probability(), 1.0);
//! assert_eq!(result.average_write_latency(), 20.0);
//! # Ok::<(), pbs::PbsError>(())
//! ```
//!
//! Predictions are conservative: read repair and anti-entropy are not
//! modelled, and multi-version staleness treats versions as independent.
//! They are optimistic about failures: node failure and hinted handoff are
//! not modelled either.

#![forbid(unsafe_code)]

pub mod config;
pub mod stats;
pub mod sweep;
pub mod trial;

mod error;
mod predictor;
mod result;
mod trace;

pub use config::{ConfigBuilder, PredictionConfig};
pub use error::*;
pub use predictor::*;
pub use result::*;
pub use trace::*;
