use std::sync::Arc;
use chrono::{DateTime, Utc};
use crate::enums::job_status::JobStatus;
use crate::enums::task_state::TaskState;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::analyzer_task::AnalyzerTask;
use crate::structs::file_metadata::FileMetadata;
use crate::structs::job_failure::JobFailure;

/// Mutable state of one job. Only the orchestrator writes it; readers get
/// snapshots.
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub job_id: String,
    pub metadata: FileMetadata,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub tasks: Vec<AnalyzerTask>,
    pub result: Option<Arc<AnalysisResult>>,
    pub failure: Option<JobFailure>,
    /// Message shown once the job is terminal.
    pub final_message: Option<String>,
}

impl JobRecord {
    pub fn new(job_id: &str, metadata: FileMetadata, tasks: Vec<AnalyzerTask>) -> Self {
        Self {
            job_id: job_id.to_string(),
            metadata,
            status: JobStatus::Pending,
            created_at: Utc::now(),
            completed_at: None,
            tasks,
            result: None,
            failure: None,
            final_message: None,
        }
    }

    /// Every task still pending or running ends failed with `reason`.
    pub fn fail_open_tasks(&mut self, reason: &str) {
        for task in self.tasks.iter_mut().filter(|task| !task.state.is_terminal()) {
            task.state = TaskState::Failed;
            task.error = Some(reason.to_string());
        }
    }
}
