pub mod ai_providers;
pub mod orchestrator;
pub mod progress_tracker;
pub mod response_parser;
pub mod result_aggregator;
pub mod scoring_engine;
