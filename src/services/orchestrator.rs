use std::sync::Arc;
use std::time::Instant as StdInstant;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::join_all;
use tokio::task::{AbortHandle, JoinError, JoinHandle};
use tokio::time::Instant;
use uuid::Uuid;
use crate::enums::analyzer_error::AnalyzerError;
use crate::enums::cancel_ack::CancelAck;
use crate::enums::failure_reason::FailureReason;
use crate::enums::job_phase::JobPhase;
use crate::enums::job_status::JobStatus;
use crate::enums::result_lookup::ResultLookup;
use crate::enums::task_outcome::TaskOutcome;
use crate::enums::task_state::TaskState;
use crate::errors::{ReviewerError, ReviewerResult};
use crate::services::progress_tracker::ProgressTracker;
use crate::services::result_aggregator::ResultAggregator;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::analyzer_binding::AnalyzerBinding;
use crate::structs::analyzer_context::AnalyzerContext;
use crate::structs::analyzer_task::AnalyzerTask;
use crate::structs::dimension_report::DimensionReport;
use crate::structs::dimension_table::DimensionTable;
use crate::structs::file_metadata::FileMetadata;
use crate::structs::issue::Issue;
use crate::structs::job_failure::JobFailure;
use crate::structs::job_handle::JobHandle;
use crate::structs::job_record::JobRecord;
use crate::structs::job_status_report::JobStatusReport;
use crate::structs::orchestrator_settings::OrchestratorSettings;
use crate::structs::task_progress::TaskProgress;
use crate::traits::analyzer::Analyzer;

/// Runs analysis jobs: one concurrent task per dimension, each with its own
/// timeout, folded into a single scored result.
///
/// Cloning is cheap and every clone shares the same job registry.
#[derive(Clone)]
pub struct Orchestrator {
    bindings: Arc<Vec<AnalyzerBinding>>,
    table: DimensionTable,
    settings: OrchestratorSettings,
    aggregator: Arc<ResultAggregator>,
    jobs: Arc<DashMap<String, Arc<JobHandle>>>,
    /// file key -> job id of the one non-terminal job for that key.
    active: Arc<DashMap<String, String>>,
}

/// Aborts the spawned analyzer tasks if the job driver is dropped early,
/// e.g. when the aggregate ceiling fires.
struct AbortOnDrop(Vec<AbortHandle>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

impl Orchestrator {
    /// Binds one analyzer to every dimension of `table`. A dimension without
    /// an analyzer, a duplicate analyzer or an analyzer for a dimension the
    /// table does not weight is a configuration error.
    pub fn new(
        table: DimensionTable,
        analyzers: Vec<Arc<dyn Analyzer>>,
        settings: OrchestratorSettings,
    ) -> ReviewerResult<Self> {
        let mut bindings = Vec::with_capacity(table.len());
        for entry in table.entries() {
            let mut matching = analyzers.iter().filter(|analyzer| analyzer.dimension() == entry.dimension);
            let analyzer = matching.next().ok_or_else(|| {
                ReviewerError::config_error(
                    &format!("no analyzer registered for dimension '{}'", entry.dimension),
                    Some("analyzers"),
                    None,
                )
            })?;
            if matching.next().is_some() {
                return Err(ReviewerError::config_error(
                    &format!("more than one analyzer registered for dimension '{}'", entry.dimension),
                    Some("analyzers"),
                    None,
                ));
            }
            bindings.push(AnalyzerBinding {
                dimension: entry.dimension,
                weight: entry.weight,
                analyzer: Arc::clone(analyzer),
            });
        }

        if let Some(stray) = analyzers.iter().find(|analyzer| table.position(analyzer.dimension()).is_none()) {
            return Err(ReviewerError::config_error(
                &format!("analyzer for dimension '{}' has no weight", stray.dimension()),
                Some("scoring.weights"),
                Some("Add the dimension to [scoring.weights] or drop its analyzer"),
            ));
        }

        if let Err(errors) = settings.check() {
            return Err(ReviewerError::config_error(&errors.join("; "), Some("orchestrator"), None));
        }

        let aggregator = ResultAggregator::new(table.clone(), settings.recommendation_limit);
        Ok(Self {
            bindings: Arc::new(bindings),
            table,
            settings,
            aggregator: Arc::new(aggregator),
            jobs: Arc::new(DashMap::new()),
            active: Arc::new(DashMap::new()),
        })
    }

    /// Registers a job for `metadata.file_key` and starts it in the background.
    /// Returns as soon as the job is registered. A second start for a key
    /// whose job is still running fails with `AnalysisInProgress`.
    pub fn start(&self, content: Vec<u8>, metadata: FileMetadata) -> ReviewerResult<String> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| ReviewerError::system_error("start analysis", &e.to_string()))?;

        let job_id = Uuid::new_v4().to_string();
        let handle = match self.active.entry(metadata.file_key.clone()) {
            Entry::Occupied(mut existing) => {
                // A finished job may still hold the key until its driver releases it.
                if !self.is_finished(existing.get()) {
                    log::warn!("⏳ Analysis already running for {} (job {})", metadata.file_key, existing.get());
                    return Err(ReviewerError::analysis_in_progress(&metadata.file_key, existing.get()));
                }
                let handle = self.register(&job_id, &metadata);
                existing.insert(job_id.clone());
                handle
            }
            Entry::Vacant(slot) => {
                let handle = self.register(&job_id, &metadata);
                slot.insert(job_id.clone());
                handle
            }
        };

        log::info!(
            "🚀 Starting job {} for {} ({} bytes, {} dimensions)",
            job_id,
            metadata.file_name,
            metadata.file_size,
            self.bindings.len()
        );

        let run = JobRun {
            job_id: job_id.clone(),
            metadata,
            handle,
            bindings: Arc::clone(&self.bindings),
            settings: self.settings.clone(),
            aggregator: Arc::clone(&self.aggregator),
            active: Arc::clone(&self.active),
        };
        runtime.spawn(run.execute(content));

        Ok(job_id)
    }

    pub fn status(&self, job_id: &str) -> ReviewerResult<JobStatusReport> {
        Ok(self.handle(job_id)?.status_report())
    }

    pub fn result(&self, job_id: &str) -> ReviewerResult<ResultLookup> {
        Ok(self.handle(job_id)?.lookup())
    }

    /// Best-effort stop. Outstanding analyzer tasks are aborted and the job
    /// ends `failed` with reason `cancelled`.
    pub fn cancel(&self, job_id: &str) -> ReviewerResult<CancelAck> {
        let handle = self.handle(job_id)?;
        // Held while the token fires so completion can't slip in between.
        let record = handle.write();
        if record.status.is_terminal() {
            return Ok(CancelAck::AlreadyTerminal);
        }
        handle.cancel.cancel();
        drop(record);
        log::warn!("🛑 Cancellation requested for job {}", job_id);
        Ok(CancelAck::Requested)
    }

    /// Forgets a terminal job and its result.
    pub fn discard(&self, job_id: &str) -> ReviewerResult<()> {
        if self.jobs.remove_if(job_id, |_, handle| handle.status().is_terminal()).is_some() {
            log::debug!("🗑️ Discarded job {}", job_id);
            return Ok(());
        }
        if self.jobs.contains_key(job_id) {
            Err(ReviewerError::JobStillActive { job_id: job_id.to_string() })
        } else {
            Err(ReviewerError::job_not_found(job_id))
        }
    }

    /// Job id of the running job for `file_key`, if any.
    pub fn active_job(&self, file_key: &str) -> Option<String> {
        self.active.get(file_key).map(|entry| entry.value().clone())
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    fn register(&self, job_id: &str, metadata: &FileMetadata) -> Arc<JobHandle> {
        let tasks = self
            .bindings
            .iter()
            .map(|binding| AnalyzerTask::pending(binding.dimension, binding.weight))
            .collect();
        let mut record = JobRecord::new(job_id, metadata.clone(), tasks);
        record.status = JobStatus::Running;
        let handle = Arc::new(JobHandle::new(record, ProgressTracker::new(&self.table)));
        self.jobs.insert(job_id.to_string(), Arc::clone(&handle));
        handle
    }

    fn is_finished(&self, job_id: &str) -> bool {
        let handle = self.jobs.get(job_id).map(|entry| Arc::clone(entry.value()));
        match handle {
            Some(handle) => handle.status().is_terminal(),
            None => true,
        }
    }

    fn handle(&self, job_id: &str) -> ReviewerResult<Arc<JobHandle>> {
        self.jobs
            .get(job_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| ReviewerError::job_not_found(job_id))
    }
}

/// Everything the background driver of one job needs.
struct JobRun {
    job_id: String,
    metadata: FileMetadata,
    handle: Arc<JobHandle>,
    bindings: Arc<Vec<AnalyzerBinding>>,
    settings: OrchestratorSettings,
    aggregator: Arc<ResultAggregator>,
    active: Arc<DashMap<String, String>>,
}

impl JobRun {
    /// Runs the driver as its own task so that neither a stalled nor a
    /// panicking driver can leave the job non-terminal.
    async fn execute(self, content: Vec<u8>) {
        let run = Arc::new(self);
        let ceiling = run.settings.job_ceiling();
        let driver = tokio::spawn({
            let run = Arc::clone(&run);
            async move { run.drive(content).await }
        });
        let abort = driver.abort_handle();

        match tokio::time::timeout(ceiling, driver).await {
            Ok(Ok(())) => {}
            Ok(Err(join_error)) => {
                let detail = if join_error.is_panic() {
                    Self::panic_message(join_error)
                } else {
                    join_error.to_string()
                };
                log::error!("💥 Job {} driver stopped: {}", run.job_id, detail);
                run.fail(FailureReason::Internal, &format!("Analysis stopped unexpectedly: {}", detail));
            }
            Err(_) => {
                abort.abort();
                log::error!("⏰ Job {} exceeded its {}s ceiling", run.job_id, ceiling.as_secs_f64());
                run.fail(
                    FailureReason::AggregateTimeout,
                    &format!("Analysis did not finish within {}s", ceiling.as_secs_f64()),
                );
            }
        }
    }

    async fn drive(&self, content: Vec<u8>) {
        let started_at = Utc::now();
        let clock = StdInstant::now();
        let tracker = Arc::clone(&self.handle.progress);

        tracker.enter_phase(JobPhase::Initializing);
        if self.handle.cancel.is_cancelled() {
            self.fail(FailureReason::Cancelled, "Analysis was cancelled");
            return;
        }

        let text = match String::from_utf8(content) {
            Ok(text) => text,
            Err(e) => {
                log::error!("❌ Job {}: {} is not valid UTF-8: {}", self.job_id, self.metadata.file_name, e);
                self.fail(FailureReason::Precondition, &format!("File content could not be decoded as UTF-8: {}", e));
                return;
            }
        };
        let request = Arc::new(AnalysisRequest { content: text, metadata: self.metadata.clone() });

        tracker.enter_phase(JobPhase::Dispatching);
        let Some(deadline) = Instant::now().checked_add(self.settings.task_timeout) else {
            self.fail(FailureReason::Internal, "Task timeout is too large to schedule");
            return;
        };
        let mut joins = Vec::with_capacity(self.bindings.len());
        for (slot, binding) in self.bindings.iter().enumerate() {
            let analyzer = Arc::clone(&binding.analyzer);
            let request = Arc::clone(&request);
            let ctx = AnalyzerContext::new(deadline, TaskProgress::new(Arc::clone(&tracker), slot));
            joins.push(tokio::spawn(async move { analyzer.analyze(&request, &ctx).await }));
        }
        let _guard = AbortOnDrop(joins.iter().map(|join| join.abort_handle()).collect());

        tracker.enter_phase(JobPhase::Analyzing);
        let tasks = joins
            .into_iter()
            .enumerate()
            .map(|(slot, join)| self.supervise(slot, join));
        let outcomes = join_all(tasks).await;

        if self.handle.cancel.is_cancelled() {
            self.fail(FailureReason::Cancelled, "Analysis was cancelled");
            return;
        }

        tracker.enter_phase(JobPhase::Aggregating);
        let reports: Vec<DimensionReport> = self
            .bindings
            .iter()
            .zip(outcomes)
            .map(|(binding, outcome)| {
                let report = DimensionReport::from_outcome(binding.dimension, binding.weight, outcome);
                if let Some(reason) = &report.degraded_reason {
                    log::warn!("⚠️ Job {}: {} degraded: {}", self.job_id, binding.dimension, reason);
                }
                report
            })
            .collect();

        tracker.enter_phase(JobPhase::Scoring);
        let result = self.aggregator.aggregate(&self.job_id, &self.metadata, started_at, clock.elapsed(), reports);
        self.complete(result);
    }

    /// Waits for one analyzer task under its timeout and the job's cancel
    /// token. Never fails: every ending becomes a `TaskOutcome`.
    async fn supervise(
        &self,
        slot: usize,
        join: JoinHandle<Result<Vec<Issue>, AnalyzerError>>,
    ) -> TaskOutcome {
        let abort = join.abort_handle();
        self.set_task_state(slot, TaskState::Running, None, None);
        self.handle.progress.task_started(slot);

        let timeout = self.settings.task_timeout;
        let outcome = tokio::select! {
            _ = self.handle.cancel.cancelled() => {
                abort.abort();
                TaskOutcome::Cancelled
            }
            joined = tokio::time::timeout(timeout, join) => match joined {
                Ok(Ok(Ok(issues))) => TaskOutcome::Completed(issues),
                Ok(Ok(Err(error))) => TaskOutcome::Failed(error),
                Ok(Err(join_error)) if join_error.is_panic() => {
                    TaskOutcome::Failed(AnalyzerError::Panicked(Self::panic_message(join_error)))
                }
                Ok(Err(join_error)) => TaskOutcome::Failed(AnalyzerError::Internal(join_error.to_string())),
                Err(_) => {
                    abort.abort();
                    TaskOutcome::TimedOut(timeout)
                }
            }
        };

        match &outcome {
            TaskOutcome::Completed(issues) => {
                log::debug!("Job {}: task {} completed with {} issue(s)", self.job_id, slot, issues.len());
                self.set_task_state(slot, TaskState::Completed, Some(issues.len()), None);
            }
            other => {
                let reason = other.failure_reason();
                log::debug!("Job {}: task {} failed: {:?}", self.job_id, slot, reason);
                self.set_task_state(slot, TaskState::Failed, None, reason);
            }
        }
        self.handle.progress.task_finished(slot);
        outcome
    }

    fn panic_message(error: JoinError) -> String {
        let payload = error.into_panic();
        if let Some(message) = payload.downcast_ref::<&str>() {
            message.to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "task panicked".to_string()
        }
    }

    fn set_task_state(&self, slot: usize, state: TaskState, issue_count: Option<usize>, error: Option<String>) {
        let mut record = self.handle.write();
        if let Some(task) = record.tasks.get_mut(slot) {
            if task.state.is_terminal() {
                return;
            }
            task.state = state;
            task.issue_count = issue_count;
            task.error = error;
        }
    }

    fn complete(&self, result: AnalysisResult) {
        let score = result.overall_score;
        let duration = result.analysis_duration;
        let message = format!("Analysis completed successfully (score {}/100)", score);
        {
            let mut record = self.handle.write();
            if record.status.is_terminal() {
                return;
            }
            if self.handle.cancel.is_cancelled() {
                drop(record);
                self.fail(FailureReason::Cancelled, "Analysis was cancelled");
                return;
            }
            record.result = Some(Arc::new(result));
            record.status = JobStatus::Completed;
            record.completed_at = Some(Utc::now());
            record.final_message = Some(message.clone());
        }
        self.handle.progress.finish(JobPhase::Completed, &message);
        self.release();
        log::info!("✅ Job {} completed: score {}/100 in {:.2}s", self.job_id, score, duration);
    }

    fn fail(&self, reason: FailureReason, message: &str) {
        {
            let mut record = self.handle.write();
            if record.status.is_terminal() {
                return;
            }
            record.fail_open_tasks(&format!("job ended: {}", reason));
            record.status = JobStatus::Failed;
            record.failure = Some(JobFailure::new(reason, message));
            record.completed_at = Some(Utc::now());
            record.final_message = Some(message.to_string());
        }
        self.handle.progress.finish(JobPhase::Failed, message);
        self.release();

        match reason {
            FailureReason::Cancelled => log::warn!("🛑 Job {} cancelled", self.job_id),
            _ => log::error!("❌ Job {} failed ({}): {}", self.job_id, reason, message),
        }
    }

    /// Frees the file key for a new job.
    fn release(&self) {
        self.active.remove_if(&self.metadata.file_key, |_, job_id| job_id == &self.job_id);
    }
}
