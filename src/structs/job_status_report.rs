use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::enums::job_phase::JobPhase;
use crate::enums::job_status::JobStatus;
use crate::structs::analyzer_task::AnalyzerTask;

/// Immutable snapshot returned by `Orchestrator::status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusReport {
    pub job_id: String,
    pub file_key: String,
    pub status: JobStatus,
    pub progress: u8,
    pub phase: JobPhase,
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub tasks: Vec<AnalyzerTask>,
}
