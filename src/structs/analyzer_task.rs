use serde::{Deserialize, Serialize};
use crate::enums::dimension::Dimension;
use crate::enums::task_state::TaskState;

/// State of one dimension task inside a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerTask {
    pub dimension: Dimension,
    pub weight: f64,
    pub state: TaskState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalyzerTask {
    pub fn pending(dimension: Dimension, weight: f64) -> Self {
        Self {
            dimension,
            weight,
            state: TaskState::Pending,
            issue_count: None,
            error: None,
        }
    }
}
