use serde::{Deserialize, Serialize};

/// Acknowledgement returned by `Orchestrator::cancel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelAck {
    /// Cancellation was signalled; the job will end `failed` with reason `cancelled`.
    Requested,
    /// The job had already reached a terminal status. Nothing changed.
    AlreadyTerminal,
}
