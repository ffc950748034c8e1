use std::fmt;
use serde::{Deserialize, Serialize};

/// Coarse phase of a job. Every phase except `Analyzing` pins the progress
/// bar to a fixed percentage; `Analyzing` spans the band that the dimension
/// tasks share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobPhase {
    Queued,
    Initializing,
    Dispatching,
    Analyzing,
    Aggregating,
    Scoring,
    Completed,
    Failed,
}

pub const ANALYSIS_BAND_START: u8 = 15;
pub const ANALYSIS_BAND_END: u8 = 90;

impl JobPhase {
    pub fn fixed_percent(&self) -> u8 {
        match self {
            Self::Queued => 0,
            Self::Initializing => 5,
            Self::Dispatching => 10,
            Self::Analyzing => ANALYSIS_BAND_START,
            Self::Aggregating => 92,
            Self::Scoring => 95,
            Self::Completed | Self::Failed => 100,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Queued => "Analysis queued for processing",
            Self::Initializing => "Initializing analysis...",
            Self::Dispatching => "Dispatching analyzers...",
            Self::Analyzing => "Running comprehensive analysis...",
            Self::Aggregating => "Aggregating analysis results...",
            Self::Scoring => "Calculating readiness score...",
            Self::Completed => "Analysis completed successfully",
            Self::Failed => "Analysis failed",
        }
    }
}

impl fmt::Display for JobPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queued => write!(f, "Queued"),
            Self::Initializing => write!(f, "Initializing"),
            Self::Dispatching => write!(f, "Dispatching"),
            Self::Analyzing => write!(f, "Analyzing"),
            Self::Aggregating => write!(f, "Aggregating"),
            Self::Scoring => write!(f, "Scoring"),
            Self::Completed => write!(f, "Completed"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}
