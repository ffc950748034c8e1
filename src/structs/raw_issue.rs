use serde::Deserialize;
use crate::enums::dimension::Dimension;
use crate::enums::severity::Severity;
use crate::structs::issue::Issue;

/// Issue as an LLM reports it. Every field is optional so a sloppy reply
/// still yields something usable.
#[derive(Deserialize, Debug, Default)]
pub struct RawIssue {
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub line_number: Option<u32>,
    #[serde(default)]
    pub code_snippet: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
}

impl RawIssue {
    pub fn into_issue(self, dimension: Dimension) -> Issue {
        let severity = self
            .severity
            .as_deref()
            .map(Severity::parse_lenient)
            .unwrap_or_default();

        Issue::new(
            dimension,
            severity,
            self.title.as_deref().unwrap_or("Untitled issue"),
            self.description.as_deref().unwrap_or(""),
            self.recommendation.as_deref().unwrap_or(""),
        )
        .with_location(self.line_number, self.code_snippet.filter(|s| !s.trim().is_empty()))
    }
}

/// Top-level object an analyzer prompt asks the model to return.
#[derive(Deserialize, Debug, Default)]
pub struct AnalyzerReply {
    #[serde(default)]
    pub issues: Vec<RawIssue>,
    #[serde(default)]
    pub recommendations: Vec<serde_json::Value>,
}
