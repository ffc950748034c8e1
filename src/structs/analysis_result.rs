use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::enums::dimension::Dimension;
use crate::enums::readiness_verdict::ReadinessVerdict;
use crate::structs::category_score::CategoryScore;
use crate::structs::issue::Issue;

/// Terminal artifact of a completed job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub job_id: String,
    pub file_key: String,
    pub file_name: String,
    pub file_size: u64,
    pub analysis_timestamp: DateTime<Utc>,
    pub analysis_duration: f64,

    pub overall_score: u8,
    pub verdict: ReadinessVerdict,
    pub score_breakdown: BTreeMap<Dimension, CategoryScore>,

    pub total_issues: usize,
    pub critical_issues: usize,
    pub high_issues: usize,

    pub issues: Vec<Issue>,
    pub recommendations: Vec<String>,
    pub summary: String,
    pub degraded_dimensions: Vec<Dimension>,
}

impl AnalysisResult {
    pub fn is_degraded(&self) -> bool {
        !self.degraded_dimensions.is_empty()
    }
}
