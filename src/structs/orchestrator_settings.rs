use std::time::Duration;
use crate::config::constants::{
    DEFAULT_AGGREGATION_OVERHEAD_SECS, DEFAULT_RECOMMENDATION_LIMIT, DEFAULT_TASK_TIMEOUT_SECS, MAX_TIMEOUT_SECS,
};
use crate::structs::config::orchestrator_config::OrchestratorConfig;

/// Deployment-wide knobs of the orchestrator, fixed at construction.
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    pub task_timeout: Duration,
    pub aggregation_overhead: Duration,
    pub recommendation_limit: usize,
}

impl OrchestratorSettings {
    pub fn from_config(config: &OrchestratorConfig) -> Self {
        Self {
            task_timeout: Duration::from_secs(config.task_timeout_secs),
            aggregation_overhead: Duration::from_secs(config.aggregation_overhead_secs),
            recommendation_limit: config.recommendation_limit,
        }
    }

    /// Longest a job may stay non-terminal: slowest permitted task plus
    /// aggregation overhead.
    pub fn job_ceiling(&self) -> Duration {
        self.task_timeout.saturating_add(self.aggregation_overhead)
    }

    /// Problems that would stop a job from ever reaching a deadline.
    pub fn check(&self) -> Result<(), Vec<String>> {
        let limit = Duration::from_secs(MAX_TIMEOUT_SECS);
        let mut errors = Vec::new();
        if self.task_timeout.is_zero() {
            errors.push("task timeout must be greater than zero".to_string());
        }
        if self.task_timeout > limit {
            errors.push(format!("task timeout must not exceed {}s", MAX_TIMEOUT_SECS));
        }
        if self.aggregation_overhead > limit {
            errors.push(format!("aggregation overhead must not exceed {}s", MAX_TIMEOUT_SECS));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            task_timeout: Duration::from_secs(DEFAULT_TASK_TIMEOUT_SECS),
            aggregation_overhead: Duration::from_secs(DEFAULT_AGGREGATION_OVERHEAD_SECS),
            recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }
}
