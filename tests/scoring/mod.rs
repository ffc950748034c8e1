use std::collections::BTreeMap;
use std::time::Duration;
use chrono::Utc;
use proptest::prelude::*;
use app_reviewer::enums::dimension::Dimension;
use app_reviewer::enums::severity::Severity;
use app_reviewer::services::result_aggregator::ResultAggregator;
use app_reviewer::services::scoring_engine::ScoringEngine;
use app_reviewer::structs::dimension_report::DimensionReport;
use app_reviewer::structs::dimension_table::DimensionTable;
use app_reviewer::structs::issue::Issue;
use crate::common::metadata;

fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Critical),
        Just(Severity::High),
        Just(Severity::Medium),
        Just(Severity::Low),
    ]
}

fn reports(per_dimension: &[Vec<Severity>], degraded: &[bool]) -> Vec<DimensionReport> {
    Dimension::ALL
        .iter()
        .zip(per_dimension.iter().zip(degraded.iter()))
        .map(|(dimension, (severities, degraded))| {
            if *degraded {
                DimensionReport::fallback(*dimension, dimension.default_weight(), "analyzer failed")
            } else {
                DimensionReport {
                    dimension: *dimension,
                    weight: dimension.default_weight(),
                    issues: severities
                        .iter()
                        .enumerate()
                        .map(|(i, s)| Issue::new(*dimension, *s, &format!("issue {}", i), "", &format!("rec {}", i % 3)))
                        .collect(),
                    degraded_reason: None,
                }
            }
        })
        .collect()
}

proptest! {
    /// The overall score can be recomputed from the published issue list and the weights alone.
    #[test]
    fn overall_score_is_reproducible_from_issues(
        per_dimension in proptest::collection::vec(proptest::collection::vec(severity(), 0..25), 3),
        degraded in proptest::collection::vec(any::<bool>(), 3),
    ) {
        let table = DimensionTable::standard();
        let aggregator = ResultAggregator::new(table.clone(), 5);
        let result = aggregator.aggregate("job", &metadata("prop"), Utc::now(), Duration::from_secs(1), reports(&per_dimension, &degraded));

        let mut grouped: BTreeMap<Dimension, Vec<Issue>> = BTreeMap::new();
        for issue in &result.issues {
            grouped.entry(issue.dimension).or_default().push(issue.clone());
        }
        let recomputed: f64 = table
            .entries()
            .iter()
            .map(|entry| {
                let issues = grouped.remove(&entry.dimension).unwrap_or_default();
                ScoringEngine::score_issues(&issues) as f64 * entry.weight
            })
            .sum();

        prop_assert_eq!(result.overall_score, recomputed.round_ties_even() as u8);
        prop_assert!(result.overall_score <= 100);
        prop_assert_eq!(result.total_issues, result.issues.len());
        prop_assert!(result.recommendations.len() <= 5);

        let ranks: Vec<u8> = result.issues.iter().map(|issue| issue.severity.rank()).collect();
        prop_assert!(ranks.windows(2).all(|pair| pair[0] <= pair[1]));

        let flagged = degraded.iter().filter(|d| **d).count();
        prop_assert_eq!(result.degraded_dimensions.len(), flagged);
    }
}
