use std::collections::BTreeMap;
use crate::config::constants::{
    ANTHROPIC_API_KEY_ENV, DEFAULT_AGGREGATION_OVERHEAD_SECS, DEFAULT_RECOMMENDATION_LIMIT,
    DEFAULT_TASK_TIMEOUT_SECS,
};
use crate::enums::dimension::Dimension;

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_task_timeout_secs() -> u64 {
        DEFAULT_TASK_TIMEOUT_SECS
    }

    pub fn default_aggregation_overhead_secs() -> u64 {
        DEFAULT_AGGREGATION_OVERHEAD_SECS
    }

    pub fn default_recommendation_limit() -> usize {
        DEFAULT_RECOMMENDATION_LIMIT
    }

    pub fn default_weights() -> BTreeMap<String, f64> {
        Dimension::ALL
            .iter()
            .map(|dimension| (dimension.key().to_string(), dimension.default_weight()))
            .collect()
    }

    pub fn default_model() -> String {
        "claude-sonnet-4-20250514".to_string()
    }

    pub fn default_max_tokens() -> u32 {
        8192
    }

    pub fn default_temperature() -> f32 {
        0.0
    }

    pub fn default_provider() -> String {
        "anthropic".to_string()
    }

    pub fn default_api_key_env() -> String {
        ANTHROPIC_API_KEY_ENV.to_string()
    }
}
