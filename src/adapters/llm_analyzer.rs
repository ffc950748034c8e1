use std::sync::Arc;
use async_trait::async_trait;
use crate::enums::ai_provider_error::AiProviderError;
use crate::enums::analyzer_error::AnalyzerError;
use crate::enums::dimension::Dimension;
use crate::prompts::code_quality_prompt::CODE_QUALITY_PROMPT;
use crate::prompts::response_format_prompt::RESPONSE_FORMAT_PROMPT;
use crate::prompts::security_prompt::SECURITY_PROMPT;
use crate::prompts::ui_ux_prompt::UI_UX_PROMPT;
use crate::services::response_parser::ResponseParser;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::analyzer_context::AnalyzerContext;
use crate::structs::dimension_table::DimensionTable;
use crate::structs::issue::Issue;
use crate::traits::ai_provider::AiProvider;
use crate::traits::analyzer::Analyzer;

/// Dimension analyzer backed by a chat model.
pub struct LlmAnalyzer {
    dimension: Dimension,
    provider: Arc<dyn AiProvider>,
}

impl LlmAnalyzer {

    pub fn new(dimension: Dimension, provider: Arc<dyn AiProvider>) -> Self {
        Self { dimension, provider }
    }

    /// One analyzer per dimension the table weights, all sharing the same provider.
    pub fn for_table(table: &DimensionTable, provider: Arc<dyn AiProvider>) -> Vec<Arc<dyn Analyzer>> {
        table
            .entries()
            .iter()
            .map(|entry| Arc::new(Self::new(entry.dimension, Arc::clone(&provider))) as Arc<dyn Analyzer>)
            .collect()
    }

    pub fn system_prompt(&self) -> String {
        let focus = match self.dimension {
            Dimension::Security => SECURITY_PROMPT,
            Dimension::CodeQuality => CODE_QUALITY_PROMPT,
            Dimension::UiUx => UI_UX_PROMPT,
        };
        format!("{}\n{}", focus.trim(), RESPONSE_FORMAT_PROMPT)
    }

    pub fn user_prompt(request: &AnalysisRequest) -> String {
        let metadata = &request.metadata;
        let file_type = if metadata.file_type.is_empty() { "unknown" } else { &metadata.file_type };
        format!(
            "File: {}\nType: {}\nSize: {} bytes\n\n```\n{}\n```",
            metadata.file_name, file_type, metadata.file_size, request.content
        )
    }
}

#[async_trait]
impl Analyzer for LlmAnalyzer {

    fn dimension(&self) -> Dimension {
        self.dimension
    }

    async fn analyze(&self, request: &AnalysisRequest, ctx: &AnalyzerContext) -> Result<Vec<Issue>, AnalyzerError> {
        log::debug!("🤖 Requesting {} analysis of {}", self.dimension, request.metadata.file_name);
        ctx.progress.report(0.0);

        let call = self.provider.chat(self.system_prompt(), vec![Self::user_prompt(request)]);
        let reply = tokio::time::timeout_at(ctx.deadline, call)
            .await
            .map_err(|_| AnalyzerError::DeadlineExceeded)?
            .map_err(|e| match e {
                AiProviderError::AuthenticationError(msg) => AnalyzerError::Unavailable(msg),
                other => AnalyzerError::Provider(other.to_string()),
            })?;

        ctx.progress.report(0.8);
        let issues = ResponseParser::parse_issues(self.dimension, &reply)?;
        log::debug!("✅ {} analysis returned {} issue(s)", self.dimension, issues.len());
        Ok(issues)
    }
}
