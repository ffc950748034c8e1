use std::fmt;
use serde::{Deserialize, Serialize};

/// Reason code attached to a failed job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Input could not be established for any analyzer.
    Precondition,
    Cancelled,
    /// The job outlived its aggregate ceiling.
    AggregateTimeout,
    /// The job driver itself stopped unexpectedly.
    Internal,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Precondition => write!(f, "precondition"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::AggregateTimeout => write!(f, "aggregate_timeout"),
            Self::Internal => write!(f, "internal"),
        }
    }
}
