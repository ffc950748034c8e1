use std::collections::BTreeMap;
use crate::config::constants::{DEDUCTION_DAMPING, DEDUCTION_KNEE};
use crate::enums::severity::Severity;
use crate::structs::category_score::CategoryScore;
use crate::structs::dimension_report::DimensionReport;
use crate::structs::issue::Issue;

pub struct ScoringEngine;

impl ScoringEngine {

    pub fn deduction_total(issues: &[Issue]) -> u32 {
        issues.iter().map(|issue| issue.severity.deduction()).sum()
    }

    /// Deductions past the knee count at half weight.
    pub fn effective_deduction(total: u32) -> f64 {
        if total > DEDUCTION_KNEE {
            DEDUCTION_KNEE as f64 + (total - DEDUCTION_KNEE) as f64 * DEDUCTION_DAMPING
        } else {
            total as f64
        }
    }

    /// `max(0, 100 - effective)`, rounded half to even.
    pub fn score_from_deductions(total: u32) -> u8 {
        let raw = (100.0 - Self::effective_deduction(total)).max(0.0);
        raw.round_ties_even().min(100.0) as u8
    }

    /// A list holding a diagnostic issue belongs to a degraded dimension and scores 0.
    pub fn score_issues(issues: &[Issue]) -> u8 {
        if issues.iter().any(|issue| issue.diagnostic) {
            return 0;
        }
        Self::score_from_deductions(Self::deduction_total(issues))
    }

    pub fn severity_breakdown(issues: &[Issue]) -> BTreeMap<Severity, usize> {
        let mut breakdown = BTreeMap::new();
        for issue in issues {
            *breakdown.entry(issue.severity).or_insert(0) += 1;
        }
        breakdown
    }

    pub fn category_score(report: &DimensionReport) -> CategoryScore {
        let degraded = report.is_degraded();
        let score = if degraded { 0 } else { Self::score_issues(&report.issues) };
        let severity_breakdown = if degraded {
            BTreeMap::new()
        } else {
            Self::severity_breakdown(&report.issues)
        };

        CategoryScore {
            dimension: report.dimension,
            score,
            weight: report.weight,
            weighted_score: score as f64 * report.weight,
            issue_count: report.issues.len(),
            severity_breakdown,
            degraded,
            degraded_reason: report.degraded_reason.clone(),
        }
    }

    /// `round(sum of score * weight)`, halves to even. Weights are validated
    /// when the table is built, so the result already lies in `[0, 100]`;
    /// the clamp only absorbs float noise.
    pub fn overall_score<'a, I>(scores: I) -> u8
    where
        I: IntoIterator<Item = &'a CategoryScore>,
    {
        let total: f64 = scores.into_iter().map(|score| score.weighted_score).sum();
        total.round_ties_even().clamp(0.0, 100.0) as u8
    }
}
