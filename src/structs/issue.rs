use serde::{Deserialize, Serialize};
use crate::enums::dimension::Dimension;
use crate::enums::severity::Severity;

/// A single finding. Immutable once an analyzer hands it over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
    pub recommendation: String,
    pub dimension: Dimension,
    /// Set only on the synthetic issue that stands in for a degraded dimension.
    #[serde(default)]
    pub diagnostic: bool,
}

impl Issue {
    pub fn new(dimension: Dimension, severity: Severity, title: &str, description: &str, recommendation: &str) -> Self {
        Self {
            severity,
            title: title.to_string(),
            description: description.to_string(),
            line_number: None,
            code_snippet: None,
            recommendation: recommendation.to_string(),
            dimension,
            diagnostic: false,
        }
    }

    pub fn with_location(mut self, line_number: Option<u32>, code_snippet: Option<String>) -> Self {
        self.line_number = line_number;
        self.code_snippet = code_snippet;
        self
    }

    /// The issue recorded when a dimension fails, times out or is cancelled.
    pub fn diagnostic(dimension: Dimension, reason: &str) -> Self {
        Self {
            severity: Severity::Critical,
            title: format!("{} Analysis Failed", dimension.title()),
            description: format!("The {} analyzer encountered an error: {}", dimension.key(), reason),
            line_number: None,
            code_snippet: None,
            recommendation: "Please check the file format and try again. Contact support if the issue persists.".to_string(),
            dimension,
            diagnostic: true,
        }
    }
}
