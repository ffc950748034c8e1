use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OrchestratorConfig {
    #[serde(default = "ConfigHelper::default_task_timeout_secs")]
    pub task_timeout_secs: u64,

    #[serde(default = "ConfigHelper::default_aggregation_overhead_secs")]
    pub aggregation_overhead_secs: u64,

    #[serde(default = "ConfigHelper::default_recommendation_limit")]
    pub recommendation_limit: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            task_timeout_secs: ConfigHelper::default_task_timeout_secs(),
            aggregation_overhead_secs: ConfigHelper::default_aggregation_overhead_secs(),
            recommendation_limit: ConfigHelper::default_recommendation_limit(),
        }
    }
}
