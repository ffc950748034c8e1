use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::enums::dimension::Dimension;
use crate::enums::severity::Severity;

/// Derived score of one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub dimension: Dimension,
    pub score: u8,
    pub weight: f64,
    pub weighted_score: f64,
    pub issue_count: usize,
    /// Count per severity present. Empty for a degraded dimension.
    pub severity_breakdown: BTreeMap<Severity, usize>,
    pub degraded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degraded_reason: Option<String>,
}
