use parse_display::{Display, FromStr};
use pbs::PhasePools;

const MICROS_PER_MILLI: f64 = 1000.0;

/// Latency histogram kept by Cassandra per table.
#[derive(Display, FromStr, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[display(style = "kebab-case")]
pub enum Histogram {
    Read,
    Write,
}

impl Histogram {
    /// Metric name of the histogram in the node's object names.
    pub fn metric_name(&self) -> &'static str {
        match self {
            Self::Read => "ReadLatency",
            Self::Write => "WriteLatency",
        }
    }
}

/// Histogram that read-response (`S`) latencies are drawn from.
#[derive(Display, FromStr, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[display(style = "kebab-case")]
pub enum ResponsePool {
    #[default]
    Read,
    Write,
}

impl From<ResponsePool> for Histogram {
    fn from(value: ResponsePool) -> Self {
        match value {
            ResponsePool::Read => Histogram::Read,
            ResponsePool::Write => Histogram::Write,
        }
    }
}

/// Split recorded round-trip latencies, in microseconds, into per-phase
/// pools in milliseconds.
///
/// A round-trip covers a request leg and a response leg, each taken as half
/// of it. `W` and `A` come from the write histogram, `R` from the read
/// histogram and `S` from the one picked by `response`.
pub fn phase_pools(
    read_micros: &[f64],
    write_micros: &[f64],
    response: ResponsePool,
) -> PhasePools {
    let one_way = |values: &[f64]| -> Vec<f64> {
        values.iter().map(|v| v / MICROS_PER_MILLI / 2.0).collect()
    };

    let write = one_way(write_micros);
    let read = one_way(read_micros);

    let read_response = match response {
        ResponsePool::Read => read.clone(),
        ResponsePool::Write => write.clone(),
    };

    PhasePools {
        write_apply: write.clone(),
        write_ack: write,
        read_execute: read,
        read_response,
    }
}
