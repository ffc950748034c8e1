use serde::{Deserialize, Serialize};
use crate::enums::failure_reason::FailureReason;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFailure {
    pub reason: FailureReason,
    pub message: String,
}

impl JobFailure {
    pub fn new(reason: FailureReason, message: &str) -> Self {
        Self {
            reason,
            message: message.to_string(),
        }
    }
}
