//! Why a metric source could not produce a value this tick.

use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("`{program}` exited with {status}")]
    Exit { program: String, status: ExitStatus },

    #[error("malformed output: {0:?}")]
    Malformed(String),

    #[error("metrics facility error: {0}")]
    Facility(String),

    #[error("host metrics are not supported on this platform")]
    Unsupported,
}

impl SourceError {
    /// True when the source ran but its output could not be understood.
    pub fn is_malformed(&self) -> bool {
        matches!(self, SourceError::Malformed(_))
    }
}
