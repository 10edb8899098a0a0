//! Predictions across every useful quorum shape of a cluster.

use crate::{
    config::PredictionConfig, error::Result, predictor::predict, result::PredictionResult,
    trace::LatencyTrace,
};

/// Every `(r, w)` pair with `1 <= r, w <= n` and `r + w <= n + 1`.
///
/// Pairs beyond `n + 1` only add latency: `r + w = n + 1` already
/// guarantees the read and write quorums overlap.
pub fn quorum_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (1..=n).flat_map(move |r| (1..=n).filter(move |w| r + w <= n + 1).map(move |w| (r, w)))
}

/// Run one prediction per [`quorum_pairs`] entry, keeping everything but
/// `r` and `w` from `config`.
///
/// Predictions are computed lazily, in `(r, w)` order.
pub fn sweep<'a, T: LatencyTrace + ?Sized>(
    config: &'a PredictionConfig,
    trace: &'a T,
) -> impl Iterator<Item = Result<PredictionResult>> + 'a {
    quorum_pairs(config.n).map(move |(r, w)| predict(&config.with_quorums(r, w), trace))
}
