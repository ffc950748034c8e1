use std::sync::Arc;
use crate::services::progress_tracker::ProgressTracker;

/// Sub-progress reporter bound to one task slot of one job.
#[derive(Clone)]
pub struct TaskProgress {
    tracker: Arc<ProgressTracker>,
    slot: usize,
}

impl TaskProgress {
    pub fn new(tracker: Arc<ProgressTracker>, slot: usize) -> Self {
        Self { tracker, slot }
    }

    /// Report how far the analyzer got, as a fraction in `[0, 1]`.
    pub fn report(&self, fraction: f64) {
        self.tracker.report_sub_progress(self.slot, fraction);
    }
}
