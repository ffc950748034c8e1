use crate::enums::analyzer_error::AnalyzerError;
use crate::enums::dimension::Dimension;
use crate::structs::issue::Issue;
use crate::structs::raw_issue::AnalyzerReply;

pub struct ResponseParser;

impl ResponseParser {

    /// Models like to wrap JSON in prose or code fences. Take the outermost
    /// `{ ... }` span.
    pub fn extract_json(response: &str) -> Option<&str> {
        let start = response.find('{')?;
        let end = response.rfind('}')?;
        if end < start {
            return None;
        }
        Some(&response[start..=end])
    }

    pub fn parse_issues(dimension: Dimension, response: &str) -> Result<Vec<Issue>, AnalyzerError> {
        let json = Self::extract_json(response).ok_or_else(|| {
            AnalyzerError::MalformedResponse(format!("no JSON object in {} reply", dimension))
        })?;

        let reply: AnalyzerReply = serde_json::from_str(json).map_err(|e| {
            log::debug!("Unparsable {} reply: {}", dimension, response);
            AnalyzerError::MalformedResponse(e.to_string())
        })?;

        Ok(reply
            .issues
            .into_iter()
            .map(|raw| raw.into_issue(dimension))
            .collect())
    }
}
