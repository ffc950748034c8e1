use tokio::time::Instant;
use crate::structs::task_progress::TaskProgress;

/// Per-call context handed to an analyzer: the deadline it must respect and a
/// handle for optional sub-progress reports.
#[derive(Clone)]
pub struct AnalyzerContext {
    pub deadline: Instant,
    pub progress: TaskProgress,
}

impl AnalyzerContext {
    pub fn new(deadline: Instant, progress: TaskProgress) -> Self {
        Self { deadline, progress }
    }
}
