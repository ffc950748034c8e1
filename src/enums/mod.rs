pub mod severity;
pub mod dimension;
pub mod job_status;
pub mod job_phase;
pub mod task_state;
pub mod task_outcome;
pub mod analyzer_error;
pub mod failure_reason;
pub mod readiness_verdict;
pub mod cancel_ack;
pub mod result_lookup;
pub mod ai_provider_error;
pub mod commands;
