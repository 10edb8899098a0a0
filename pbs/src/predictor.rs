use crate::{
    config::PredictionConfig,
    error::Result,
    result::PredictionResult,
    stats,
    trace::LatencyTrace,
    trial::{Trial, TrialOutcome},
};

/// Predict consistency and latency for `config` by sampling `trace`.
///
/// Runs `config.trials` independent trials. Each trial writes to all `N`
/// replicas, waits for `W` acknowledgments, waits `t` more milliseconds,
/// then reads from `R` replicas and checks whether any of them had already
/// applied the write. The request is validated before the first draw.
#[tracing::instrument(
    name = "pbs.predict",
    skip_all,
    fields(n = config.n, r = config.r, w = config.w, trials = config.trials)
)]
pub fn predict<T: LatencyTrace + ?Sized>(
    config: &PredictionConfig,
    trace: &T,
) -> Result<PredictionResult> {
    config.validate()?;

    let mut trial = Trial::with_capacity(config.n, config.r);
    let mut tally = Tally::with_capacity(config.trials);

    for _ in 0..config.trials {
        tally.record(trial.simulate(trace, config));
    }

    Ok(tally.into_result(config))
}

/// Same as [`predict`], spreading trials across the rayon thread pool.
///
/// Each worker owns its trial scratch state; per-worker tallies are merged
/// once all trials ran. Statistically equivalent to [`predict`], but the
/// draws a trial sees depend on scheduling.
#[cfg(feature = "parallel")]
#[tracing::instrument(
    name = "pbs.predict_parallel",
    skip_all,
    fields(n = config.n, r = config.r, w = config.w, trials = config.trials)
)]
pub fn predict_parallel<T: LatencyTrace + ?Sized>(
    config: &PredictionConfig,
    trace: &T,
) -> Result<PredictionResult> {
    use rayon::prelude::*;

    config.validate()?;

    let tally = (0..config.trials)
        .into_par_iter()
        .fold(
            || (Trial::with_capacity(config.n, config.r), Tally::default()),
            |(mut trial, mut tally), _| {
                tally.record(trial.simulate(trace, config));
                (trial, tally)
            },
        )
        .map(|(_, tally)| tally)
        .reduce(Tally::default, Tally::merge);

    Ok(tally.into_result(config))
}

/// Predict with positional arguments.
///
/// Shorthand for building a [`PredictionConfig`] and calling [`predict`].
#[allow(clippy::too_many_arguments)]
pub fn run<T: LatencyTrace + ?Sized>(
    n: usize,
    r: usize,
    w: usize,
    time_since_write_ms: f64,
    versions_stale: u32,
    percentile: f64,
    trials: usize,
    trace: &T,
) -> Result<PredictionResult> {
    let config = PredictionConfig {
        n,
        r,
        w,
        time_since_write_ms,
        versions_stale,
        percentile,
        trials,
    };

    predict(&config, trace)
}

/// Running totals over completed trials.
#[derive(Debug, Default)]
struct Tally {
    write_latencies: Vec<f64>,
    read_latencies: Vec<f64>,
    consistent: usize,
}

impl Tally {
    fn with_capacity(trials: usize) -> Self {
        Self {
            write_latencies: Vec::with_capacity(trials),
            read_latencies: Vec::with_capacity(trials),
            consistent: 0,
        }
    }

    fn record(&mut self, outcome: TrialOutcome) {
        self.write_latencies.push(outcome.write_latency);
        self.read_latencies.push(outcome.read_latency);

        if outcome.consistent {
            self.consistent += 1;
        }
    }

    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    fn merge(mut self, other: Self) -> Self {
        self.write_latencies.extend(other.write_latencies);
        self.read_latencies.extend(other.read_latencies);
        self.consistent += other.consistent;
        self
    }

    fn into_result(mut self, config: &PredictionConfig) -> PredictionResult {
        let trials = self.write_latencies.len() as f64;
        let one_version = self.consistent as f64 / trials;

        // Versions are treated as independent: a read is more than k versions
        // stale only if k single-version reads would all have been stale.
        let consistency_probability = (1.0
            - (1.0 - one_version).powf(f64::from(config.versions_stale)))
        .clamp(0.0, 1.0);

        let average_write_latency = stats::mean(&self.write_latencies).unwrap_or_default();
        let average_read_latency = stats::mean(&self.read_latencies).unwrap_or_default();

        let percentile_write_latency =
            stats::percentile(&mut self.write_latencies, config.percentile).unwrap_or_default();
        let percentile_read_latency =
            stats::percentile(&mut self.read_latencies, config.percentile).unwrap_or_default();

        tracing::debug!(
            consistent = self.consistent,
            consistency_probability,
            average_read_latency,
            average_write_latency,
            "prediction complete"
        );

        PredictionResult::new(
            config,
            consistency_probability,
            average_read_latency,
            average_write_latency,
            percentile_read_latency,
            percentile_write_latency,
        )
    }
}
