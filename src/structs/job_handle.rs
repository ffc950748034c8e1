use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio_util::sync::CancellationToken;
use crate::enums::failure_reason::FailureReason;
use crate::enums::job_phase::JobPhase;
use crate::enums::job_status::JobStatus;
use crate::enums::result_lookup::ResultLookup;
use crate::services::progress_tracker::ProgressTracker;
use crate::structs::job_failure::JobFailure;
use crate::structs::job_record::JobRecord;
use crate::structs::job_status_report::JobStatusReport;

/// Registry entry for one job.
pub struct JobHandle {
    record: RwLock<JobRecord>,
    pub progress: Arc<ProgressTracker>,
    pub cancel: CancellationToken,
}

impl JobHandle {
    pub fn new(record: JobRecord, progress: ProgressTracker) -> Self {
        Self {
            record: RwLock::new(record),
            progress: Arc::new(progress),
            cancel: CancellationToken::new(),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, JobRecord> {
        self.record.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, JobRecord> {
        self.record.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn status(&self) -> JobStatus {
        self.read().status
    }

    /// Status is read before progress, and a terminal job always reports 100,
    /// so successive reports never go backwards.
    pub fn status_report(&self) -> JobStatusReport {
        let record = self.read().clone();
        let snapshot = self.progress.snapshot();

        let (progress, phase, message) = match record.status {
            JobStatus::Completed => (100, JobPhase::Completed, record.final_message.clone()),
            JobStatus::Failed => (100, JobPhase::Failed, record.final_message.clone()),
            _ => (snapshot.percent, snapshot.phase, Some(snapshot.message)),
        };

        JobStatusReport {
            job_id: record.job_id,
            file_key: record.metadata.file_key,
            status: record.status,
            progress,
            phase,
            message: message.unwrap_or_else(|| phase.default_message().to_string()),
            created_at: record.created_at,
            completed_at: record.completed_at,
            tasks: record.tasks,
        }
    }

    pub fn lookup(&self) -> ResultLookup {
        let record = self.read();
        if let (JobStatus::Completed, Some(result)) = (record.status, &record.result) {
            return ResultLookup::Ready(Arc::clone(result));
        }
        if record.status == JobStatus::Failed {
            let failure = record
                .failure
                .clone()
                .unwrap_or_else(|| JobFailure::new(FailureReason::Internal, "job failed without detail"));
            return ResultLookup::Failed(failure);
        }
        let status = record.status;
        drop(record);
        ResultLookup::NotReady { status, progress: self.progress.percent() }
    }
}
