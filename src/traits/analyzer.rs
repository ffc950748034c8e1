use async_trait::async_trait;
use crate::enums::analyzer_error::AnalyzerError;
use crate::enums::dimension::Dimension;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::analyzer_context::AnalyzerContext;
use crate::structs::issue::Issue;

/// One analysis dimension. Implementations must not touch shared mutable
/// state and must return promptly once `ctx.deadline` has passed. The
/// orchestrator enforces its own hard timeout regardless.
///
/// A partial problem (a tool missing, a garbled reply) is reported as an
/// `AnalyzerError`, never as an empty success.
#[async_trait]
pub trait Analyzer: Send + Sync {
    fn dimension(&self) -> Dimension;

    async fn analyze(&self, request: &AnalysisRequest, ctx: &AnalyzerContext) -> Result<Vec<Issue>, AnalyzerError>;
}
