use std::sync::Arc;
use crate::enums::job_status::JobStatus;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::job_failure::JobFailure;

/// Answer to `Orchestrator::result`.
#[derive(Debug, Clone)]
pub enum ResultLookup {
    Ready(Arc<AnalysisResult>),
    NotReady { status: JobStatus, progress: u8 },
    Failed(JobFailure),
}

impl ResultLookup {
    pub fn ready(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Ready(result) => Some(result.as_ref()),
            _ => None,
        }
    }
}
