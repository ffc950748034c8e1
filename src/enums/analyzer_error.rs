use thiserror::Error;

/// Typed failure an analyzer adapter hands back instead of a finding list.
#[derive(Debug, Clone, Error)]
pub enum AnalyzerError {
    #[error("required tool is unavailable: {0}")]
    Unavailable(String),

    #[error("provider request failed: {0}")]
    Provider(String),

    #[error("analyzer response could not be parsed: {0}")]
    MalformedResponse(String),

    #[error("analyzer did not finish before its deadline")]
    DeadlineExceeded,

    #[error("analyzer task panicked: {0}")]
    Panicked(String),

    #[error("{0}")]
    Internal(String),
}
