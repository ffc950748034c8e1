use std::sync::Arc;
use crate::enums::dimension::Dimension;
use crate::traits::analyzer::Analyzer;

/// One row of the orchestrator's dimension table: the weight and the adapter
/// that produces the dimension's issues.
#[derive(Clone)]
pub struct AnalyzerBinding {
    pub dimension: Dimension,
    pub weight: f64,
    pub analyzer: Arc<dyn Analyzer>,
}
