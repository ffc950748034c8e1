use std::time::Duration;
use crate::enums::analyzer_error::AnalyzerError;
use crate::structs::issue::Issue;

/// How a single dimension task ended. Every variant but `Completed` degrades
/// the dimension to its fallback result.
#[derive(Debug, Clone)]
pub enum TaskOutcome {
    Completed(Vec<Issue>),
    Failed(AnalyzerError),
    TimedOut(Duration),
    Cancelled,
}

impl TaskOutcome {
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Completed(_) => None,
            Self::Failed(error) => Some(error.to_string()),
            Self::TimedOut(limit) => Some(format!("analysis exceeded the {}s timeout", limit.as_secs_f64())),
            Self::Cancelled => Some("analysis was cancelled".to_string()),
        }
    }
}
