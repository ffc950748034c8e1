use crate::enums::dimension::Dimension;
use crate::enums::task_outcome::TaskOutcome;
use crate::structs::issue::Issue;

/// Issues of one dimension after the task outcome has been settled. A failed,
/// timed-out or cancelled task is replaced by its fallback: a single
/// diagnostic issue and a degraded marker.
#[derive(Debug, Clone)]
pub struct DimensionReport {
    pub dimension: Dimension,
    pub weight: f64,
    pub issues: Vec<Issue>,
    pub degraded_reason: Option<String>,
}

impl DimensionReport {
    pub fn from_outcome(dimension: Dimension, weight: f64, outcome: TaskOutcome) -> Self {
        match outcome {
            TaskOutcome::Completed(issues) => Self {
                dimension,
                weight,
                issues: issues
                    .into_iter()
                    .map(|mut issue| {
                        issue.dimension = dimension;
                        issue
                    })
                    .collect(),
                degraded_reason: None,
            },
            failed => {
                let reason = failed
                    .failure_reason()
                    .unwrap_or_else(|| "unknown failure".to_string());
                Self::fallback(dimension, weight, &reason)
            }
        }
    }

    pub fn fallback(dimension: Dimension, weight: f64, reason: &str) -> Self {
        Self {
            dimension,
            weight,
            issues: vec![Issue::diagnostic(dimension, reason)],
            degraded_reason: Some(reason.to_string()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded_reason.is_some()
    }
}
