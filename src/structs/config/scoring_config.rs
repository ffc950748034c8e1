use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScoringConfig {
    /// Dimension key -> weight. Checked by `DimensionTable` when loaded.
    #[serde(default = "ConfigHelper::default_weights")]
    pub weights: BTreeMap<String, f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ConfigHelper::default_weights(),
        }
    }
}
