use pbs::PbsError;

use crate::histogram::Histogram;

#[derive(Debug, thiserror::Error)]
pub enum CassandraError {
    #[error("reqwest `{0}`")]
    Http(#[from] reqwest::Error),

    #[error("jolokia request for `{mbean}` failed with status {status}: {error}")]
    Jolokia {
        mbean: String,
        status: u16,
        error: String,
    },

    #[error("no {0} latencies recorded!")]
    NoSamples(Histogram),

    #[error("pbs `{0}`")]
    Trace(#[from] PbsError),

    #[error("trace is closed")]
    NotConnected,

    #[error("{0}")]
    Any(#[from] anyhow::Error),
}

impl CassandraError {
    /// Check if the request may succeed when retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => {
                e.is_connect()
                    || e.is_timeout()
                    || e.status().is_some_and(|s| s.is_server_error())
            }
            Self::Jolokia { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CassandraError>;
