pub mod ai;
pub mod config;
pub mod cli;
pub mod issue;
pub mod file_metadata;
pub mod analysis_request;
pub mod analyzer_context;
pub mod task_progress;
pub mod analyzer_task;
pub mod category_score;
pub mod dimension_report;
pub mod dimension_table;
pub mod analysis_result;
pub mod job_failure;
pub mod job_status_report;
pub mod orchestrator_settings;
pub mod raw_issue;
pub mod progress_snapshot;
pub mod analyzer_binding;
pub mod job_record;
pub mod job_handle;
