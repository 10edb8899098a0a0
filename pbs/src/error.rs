use crate::trace::Phase;

/// Errors reported by the prediction engine and the core latency traces.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum PbsError {
    #[error("read quorum {r} is larger than replication factor {n}")]
    ReadQuorumTooLarge { r: usize, n: usize },

    #[error("write quorum {w} is larger than replication factor {n}")]
    WriteQuorumTooLarge { w: usize, n: usize },

    #[error("number of stale versions must be at least 1, got {0}")]
    InvalidVersionsStale(u32),

    #[error("percentile must be between 0 and 1 inclusive, got {0}")]
    PercentileOutOfRange(f64),

    #[error("number of trials must be greater than 0")]
    NoTrials,

    #[error("time since write must be finite, got {0}")]
    InvalidTimeSinceWrite(f64),

    #[error("no {phase} latencies recorded")]
    EmptyTrace { phase: Phase },

    #[error("invalid {phase} latency sample `{value}`")]
    InvalidSample { phase: Phase, value: f64 },
}

impl PbsError {
    /// Check if this error rejects the arguments of a prediction request.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::ReadQuorumTooLarge { .. }
                | Self::WriteQuorumTooLarge { .. }
                | Self::InvalidVersionsStale(_)
                | Self::PercentileOutOfRange(_)
                | Self::NoTrials
                | Self::InvalidTimeSinceWrite(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PbsError>;
