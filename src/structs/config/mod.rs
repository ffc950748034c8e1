pub mod config;
pub mod orchestrator_config;
pub mod scoring_config;
pub mod ai_config;
