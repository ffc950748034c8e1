use serde::{Deserialize, Serialize};
use crate::enums::job_phase::JobPhase;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub percent: u8,
    pub phase: JobPhase,
    pub message: String,
}
