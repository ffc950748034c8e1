use std::collections::{BTreeMap, HashSet};
use std::time::Duration;
use chrono::{DateTime, Utc};
use crate::enums::dimension::Dimension;
use crate::enums::readiness_verdict::ReadinessVerdict;
use crate::enums::severity::Severity;
use crate::services::scoring_engine::ScoringEngine;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::category_score::CategoryScore;
use crate::structs::dimension_report::DimensionReport;
use crate::structs::dimension_table::DimensionTable;
use crate::structs::file_metadata::FileMetadata;
use crate::structs::issue::Issue;

/// Folds the settled dimension reports of a job into its `AnalysisResult`.
///
/// Reports may arrive in any completion order. They are re-sorted by the
/// table before anything is derived, so the output only depends on the set
/// of reports.
pub struct ResultAggregator {
    table: DimensionTable,
    recommendation_limit: usize,
}

impl ResultAggregator {
    pub fn new(table: DimensionTable, recommendation_limit: usize) -> Self {
        Self { table, recommendation_limit }
    }

    pub fn aggregate(
        &self,
        job_id: &str,
        metadata: &FileMetadata,
        started_at: DateTime<Utc>,
        elapsed: Duration,
        mut reports: Vec<DimensionReport>,
    ) -> AnalysisResult {
        reports.sort_by_key(|report| self.position(report.dimension));

        let score_breakdown: BTreeMap<Dimension, CategoryScore> = reports
            .iter()
            .map(|report| (report.dimension, ScoringEngine::category_score(report)))
            .collect();
        let overall_score = ScoringEngine::overall_score(score_breakdown.values());

        let degraded_dimensions: Vec<Dimension> = reports
            .iter()
            .filter(|report| report.is_degraded())
            .map(|report| report.dimension)
            .collect();

        let issues = self.order_issues(reports.into_iter().flat_map(|report| report.issues).collect());
        let total_issues = issues.len();
        let critical_issues = Self::count(&issues, Severity::Critical);
        let high_issues = Self::count(&issues, Severity::High);
        let recommendations = Self::recommendations(&issues, self.recommendation_limit);
        let summary = Self::summary(overall_score, total_issues, critical_issues, high_issues, degraded_dimensions.len());

        AnalysisResult {
            job_id: job_id.to_string(),
            file_key: metadata.file_key.clone(),
            file_name: metadata.file_name.clone(),
            file_size: metadata.file_size,
            analysis_timestamp: started_at,
            analysis_duration: (elapsed.as_secs_f64() * 100.0).round() / 100.0,
            overall_score,
            verdict: ReadinessVerdict::from_score(overall_score),
            score_breakdown,
            total_issues,
            critical_issues,
            high_issues,
            issues,
            recommendations,
            summary,
            degraded_dimensions,
        }
    }

    /// Severity rank first, then table position. `sort_by_key` is stable, so
    /// issues keep their analyzer order within a tie.
    pub fn order_issues(&self, mut issues: Vec<Issue>) -> Vec<Issue> {
        issues.sort_by_key(|issue| (issue.severity.rank(), self.position(issue.dimension)));
        issues
    }

    /// First `limit` distinct recommendation texts, taken from the ordered issue
    /// list. Exact-text duplicates and blanks are skipped.
    pub fn recommendations(ordered: &[Issue], limit: usize) -> Vec<String> {
        let mut seen = HashSet::new();
        ordered
            .iter()
            .map(|issue| issue.recommendation.trim())
            .filter(|text| !text.is_empty())
            .filter(|text| seen.insert(text.to_string()))
            .take(limit)
            .map(str::to_string)
            .collect()
    }

    pub fn summary(overall_score: u8, total_issues: usize, critical_issues: usize, high_issues: usize, degraded: usize) -> String {
        let quality = match overall_score {
            90..=u8::MAX => "excellent",
            80..=89 => "good",
            60..=79 => "fair",
            _ => "poor",
        };

        let priority = if critical_issues > 0 {
            format!(" with {} critical issue(s) requiring immediate attention", critical_issues)
        } else if high_issues > 0 {
            format!(" with {} high-priority issue(s) to address", high_issues)
        } else {
            String::new()
        };

        let mut summary = format!(
            "Analysis complete: {} code quality (score: {}/100) with {} total issue(s) identified{}.",
            quality, overall_score, total_issues, priority
        );
        if degraded > 0 {
            summary.push_str(&format!(" {} dimension(s) could not be analyzed and scored 0.", degraded));
        }
        summary
    }

    fn position(&self, dimension: Dimension) -> usize {
        self.table.position(dimension).unwrap_or(usize::MAX)
    }

    fn count(issues: &[Issue], severity: Severity) -> usize {
        issues.iter().filter(|issue| issue.severity == severity).count()
    }
}
