//! Live latency traces for [`pbs`], read from a Cassandra node's latency
//! histograms.
//!
//! The node must run the [Jolokia](https://jolokia.org) agent, which exposes
//! JMX over HTTP. Every refresh reads the `ReadLatency` and `WriteLatency`
//! histograms of one table and turns them into a [`pbs::SampleTrace`]
//! snapshot. Each recorded round-trip counts as two one-way phases, so every
//! phase sample is half of a recorded latency.
//!
//! ```no_run
//! use pbs::{LiveTrace, PredictionConfig};
//! use pbs_cassandra::{CassandraConfig, CassandraTrace};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = CassandraConfig::new("10.0.0.1", 8778).with_table("ks", "users");
//! let mut trace = CassandraTrace::connect(config).await?;
//!
//! let result = pbs::predict(&PredictionConfig::default(), &trace)?;
//! println!("{}", result.consistency_probability());
//!
//! trace.refresh().await?;
//! trace.close().await?;
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
mod error;
mod histogram;
mod trace;

pub use client::*;
pub use config::*;
pub use error::*;
pub use histogram::*;
pub use trace::*;
