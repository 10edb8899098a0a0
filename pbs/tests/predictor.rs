mod common;

use pbs::{ConstantTrace, PbsError, PhasePools, PredictionConfig, ReplayTrace, SampleTrace};
use tracing_test::traced_test;

use crate::common::{config, random_pools, seeded_trace, SEED};

#[test]
fn constant_latencies() {
    let trace = ConstantTrace::uniform(10.0);
    let result = pbs::run(3, 1, 1, 0.0, 1, 0.99, 1000, &trace).unwrap();

    assert_eq!(result.n(), 3);
    assert_eq!(result.r(), 1);
    assert_eq!(result.w(), 1);
    assert_eq!(result.time_since_write_ms(), 0.0);
    assert_eq!(result.versions_stale(), 1);
    assert_eq!(result.consistency_probability(), 1.0);
    assert_eq!(result.average_write_latency(), 20.0);
    assert_eq!(result.average_read_latency(), 20.0);
    assert_eq!(result.percentile_write_latency(), 20.0);
    assert_eq!(result.percentile_read_latency(), 20.0);
    assert_eq!(result.percentile_read_latency_percentile(), 0.99);
    assert_eq!(result.percentile_write_latency_percentile(), 0.99);
}

#[test]
fn fractional_latencies_are_not_truncated() {
    let trace = ConstantTrace::uniform(0.25);
    let result = pbs::run(3, 2, 2, 0.0, 1, 0.5, 100, &trace).unwrap();

    assert_eq!(result.average_write_latency(), 0.5);
    assert_eq!(result.average_read_latency(), 0.5);
}

#[test]
fn order_statistics() {
    // W+A per replica: [6, 2, 13]; R+S per read replica: [6, 8]
    let trace = ReplayTrace::new(PhasePools {
        write_apply: vec![5.0, 1.0, 3.0],
        write_ack: vec![1.0, 1.0, 10.0],
        read_execute: vec![2.0, 7.0],
        read_response: vec![4.0, 1.0],
    })
    .unwrap();

    let result = pbs::run(3, 2, 2, 0.0, 1, 0.5, 1, &trace).unwrap();

    assert_eq!(result.average_write_latency(), 6.0);
    assert_eq!(result.percentile_write_latency(), 6.0);
    assert_eq!(result.average_read_latency(), 8.0);
    assert_eq!(result.percentile_read_latency(), 8.0);
    assert_eq!(result.consistency_probability(), 1.0);
    assert_eq!(trace.draws(), 10);
}

#[test]
fn duplicate_read_latencies() {
    // Both replicas answer after 10ms; the first in line is stale and the
    // second has the write.
    let trace = ReplayTrace::new(PhasePools {
        write_apply: vec![50.0, 2.0],
        write_ack: vec![0.0],
        read_execute: vec![1.0, 9.0],
        read_response: vec![9.0, 1.0],
    })
    .unwrap();

    let result = pbs::run(2, 2, 1, 0.0, 1, 0.5, 100, &trace).unwrap();

    assert_eq!(result.consistency_probability(), 1.0);
    assert_eq!(result.average_read_latency(), 10.0);
    assert_eq!(result.average_write_latency(), 2.0);
}

#[test]
fn alternating_staleness() {
    // Even trials read a replica that applied the write first, odd trials a
    // replica that applies it 49ms after the quorum returned.
    let trace = ReplayTrace::new(PhasePools {
        write_apply: vec![1.0, 50.0, 50.0, 1.0],
        write_ack: vec![0.0],
        read_execute: vec![1.0],
        read_response: vec![0.0],
    })
    .unwrap();

    let one = pbs::run(2, 1, 1, 0.0, 1, 0.5, 1000, &trace).unwrap();
    assert_eq!(one.consistency_probability(), 0.5);

    trace.rewind();
    let two = pbs::run(2, 1, 1, 0.0, 2, 0.5, 1000, &trace).unwrap();
    assert_eq!(two.consistency_probability(), 0.75);

    trace.rewind();
    let later = pbs::run(2, 1, 1, 48.0, 1, 0.5, 1000, &trace).unwrap();
    assert_eq!(later.consistency_probability(), 1.0);
}

#[test]
fn percentile_bounds() {
    // One replica, so trial i writes in W[i] ms
    let trace = ReplayTrace::new(PhasePools {
        write_apply: vec![4.0, 1.0, 3.0, 2.0],
        write_ack: vec![0.0],
        read_execute: vec![1.0],
        read_response: vec![1.0],
    })
    .unwrap();

    let lowest = pbs::run(1, 1, 1, 0.0, 1, 0.0, 4, &trace).unwrap();
    assert_eq!(lowest.percentile_write_latency(), 1.0);

    trace.rewind();
    let median = pbs::run(1, 1, 1, 0.0, 1, 0.5, 4, &trace).unwrap();
    assert_eq!(median.percentile_write_latency(), 3.0);

    trace.rewind();
    let highest = pbs::run(1, 1, 1, 0.0, 1, 1.0, 4, &trace).unwrap();
    assert_eq!(highest.percentile_write_latency(), 4.0);
    assert_eq!(highest.average_write_latency(), 2.5);
}

#[test]
fn valid_quorums_never_fail() {
    let trace = seeded_trace();

    for n in 0..=5 {
        for r in 0..=n {
            for w in 0..=n {
                let result = pbs::predict(&config(n, r, w), &trace).unwrap();
                let p = result.consistency_probability();

                assert!((0.0..=1.0).contains(&p), "n={n} r={r} w={w} p={p}");
                assert!(result.average_read_latency() >= 0.0);
                assert!(result.average_write_latency() >= 0.0);
            }
        }
    }
}

#[test]
fn invalid_arguments_draw_nothing() {
    let trace = ReplayTrace::new(PhasePools {
        write_apply: vec![1.0],
        write_ack: vec![1.0],
        read_execute: vec![1.0],
        read_response: vec![1.0],
    })
    .unwrap();

    let cases = [
        (config(3, 4, 1), PbsError::ReadQuorumTooLarge { r: 4, n: 3 }),
        (config(3, 1, 4), PbsError::WriteQuorumTooLarge { w: 4, n: 3 }),
        (
            PredictionConfig {
                versions_stale: 0,
                ..config(3, 1, 1)
            },
            PbsError::InvalidVersionsStale(0),
        ),
        (
            PredictionConfig {
                percentile: 1.5,
                ..config(3, 1, 1)
            },
            PbsError::PercentileOutOfRange(1.5),
        ),
        (
            PredictionConfig {
                trials: 0,
                ..config(3, 1, 1)
            },
            PbsError::NoTrials,
        ),
    ];

    for (config, expected) in cases {
        let err = pbs::predict(&config, &trace).unwrap_err();

        assert_eq!(err, expected);
        assert!(err.is_invalid_argument());
    }

    assert_eq!(trace.draws(), 0);
}

#[test]
fn more_time_never_hurts() {
    let mut previous = 0.0;

    for t in [0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0] {
        let trace = seeded_trace();
        let config = PredictionConfig {
            time_since_write_ms: t,
            ..config(3, 1, 1)
        };

        let p = pbs::predict(&config, &trace)
            .unwrap()
            .consistency_probability();

        assert!(p >= previous, "t={t}: {p} < {previous}");
        previous = p;
    }

    // Longer than any write can take
    assert_eq!(previous, 1.0);
}

#[test]
fn more_versions_never_hurt() {
    let mut previous = 0.0;

    for k in 1..=6 {
        let trace = seeded_trace();
        let config = PredictionConfig {
            versions_stale: k,
            ..config(3, 1, 1)
        };

        let p = pbs::predict(&config, &trace)
            .unwrap()
            .consistency_probability();

        assert!(p >= previous, "k={k}: {p} < {previous}");
        previous = p;
    }
}

#[test]
fn reading_every_replica_is_consistent() {
    let trace = SampleTrace::with_seed(random_pools(7), 7).unwrap();

    for n in 1..=5 {
        for w in 1..=n {
            for t in [0.0, 0.001, 1.0] {
                let config = PredictionConfig {
                    time_since_write_ms: t,
                    ..config(n, n, w)
                };

                let result = pbs::predict(&config, &trace).unwrap();
                assert_eq!(result.consistency_probability(), 1.0, "n={n} w={w} t={t}");
            }
        }
    }
}

#[test]
fn reading_every_replica_with_scripted_latencies() {
    // Replica 0 acknowledges first but applies last among the read set
    let trace = ReplayTrace::new(PhasePools {
        write_apply: vec![30.0, 5.0, 80.0],
        write_ack: vec![0.5, 40.0, 1.0],
        read_execute: vec![0.1, 0.1, 0.1],
        read_response: vec![1.0, 2.0, 3.0],
    })
    .unwrap();

    let result = pbs::run(3, 3, 1, 0.001, 1, 0.99, 100, &trace).unwrap();
    assert_eq!(result.consistency_probability(), 1.0);
}

#[test]
fn stronger_write_quorum_is_slower() {
    let fast = pbs::predict(&config(3, 1, 1), &seeded_trace()).unwrap();
    let slow = pbs::predict(&config(3, 1, 3), &seeded_trace()).unwrap();

    assert!(slow.average_write_latency() > fast.average_write_latency());
    assert!(slow.consistency_probability() >= fast.consistency_probability());
}

#[test]
fn same_seed_same_prediction() {
    let first = pbs::predict(&config(5, 2, 2), &seeded_trace()).unwrap();
    let second = pbs::predict(&config(5, 2, 2), &seeded_trace()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn result_serializes() {
    let result = pbs::run(3, 1, 1, 0.0, 1, 0.99, 10, &ConstantTrace::uniform(10.0)).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["n"], 3);
    assert_eq!(json["consistency_probability"], 1.0);
    assert_eq!(json["average_read_latency"], 20.0);

    let back: pbs::PredictionResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, result);
}

#[test]
#[traced_test]
fn prediction_is_traced() {
    pbs::run(3, 1, 1, 0.0, 1, 0.99, 10, &ConstantTrace::uniform(1.0)).unwrap();

    assert!(logs_contain("prediction complete"));
    assert!(logs_contain("pbs.predict"));
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_matches_constant_scenario() {
    let trace = ConstantTrace::uniform(10.0);
    let config = config(3, 1, 1);

    let result = pbs::predict_parallel(&config, &trace).unwrap();

    assert_eq!(result.consistency_probability(), 1.0);
    assert_eq!(result.average_write_latency(), 20.0);
    assert_eq!(result.average_read_latency(), 20.0);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_is_close_to_sequential() {
    let config = PredictionConfig {
        trials: 20_000,
        time_since_write_ms: 10.0,
        ..config(3, 1, 1)
    };

    let sequential = pbs::predict(&config, &seeded_trace()).unwrap();
    let parallel = pbs::predict_parallel(&config, &seeded_trace()).unwrap();

    let delta = (sequential.consistency_probability() - parallel.consistency_probability()).abs();
    assert!(delta < 0.05, "delta {delta}");

    let empty = PredictionConfig { trials: 0, ..config };
    assert!(pbs::predict_parallel(&empty, &seeded_trace()).is_err());
}

#[test]
fn seed_constant_is_used() {
    assert_eq!(seeded_trace().pools(), &random_pools(SEED));
}
