use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use app_reviewer::enums::analyzer_error::AnalyzerError;
use app_reviewer::enums::cancel_ack::CancelAck;
use app_reviewer::enums::dimension::Dimension;
use app_reviewer::enums::failure_reason::FailureReason;
use app_reviewer::enums::job_phase::JobPhase;
use app_reviewer::enums::job_status::JobStatus;
use app_reviewer::enums::result_lookup::ResultLookup;
use app_reviewer::enums::severity::Severity::{Critical, High, Low};
use app_reviewer::enums::task_state::TaskState;
use app_reviewer::errors::ReviewerError;
use app_reviewer::services::orchestrator::Orchestrator;
use app_reviewer::structs::analysis_result::AnalysisResult;
use app_reviewer::structs::dimension_table::DimensionTable;
use app_reviewer::traits::analyzer::Analyzer;
use app_reviewer::structs::orchestrator_settings::OrchestratorSettings;
use crate::common::{analyzers, metadata, orchestrator, settings, source, wait_terminal, OnDrop, Script, ScriptedAnalyzer};

const FAST: Duration = Duration::from_secs(5);

fn ready(orchestrator: &Orchestrator, job_id: &str) -> Arc<AnalysisResult> {
    match orchestrator.result(job_id).unwrap() {
        ResultLookup::Ready(result) => result,
        other => panic!("expected a ready result, got {:?}", other),
    }
}

#[tokio::test]
async fn weighted_example_scores_79() {
    let orch = orchestrator(
        analyzers(
            Script::Issues(vec![Critical, High, Low]),
            Script::Issues(vec![Low; 5]),
            Script::Issues(vec![High, High]),
        ),
        FAST,
    );

    let job_id = orch.start(source(), metadata("example")).unwrap();
    let reports = wait_terminal(&orch, &job_id).await;
    assert_eq!(reports.last().unwrap().status, JobStatus::Completed);

    let result = ready(&orch, &job_id);
    assert_eq!(result.score_breakdown[&Dimension::Security].score, 68);
    assert_eq!(result.score_breakdown[&Dimension::CodeQuality].score, 90);
    assert_eq!(result.score_breakdown[&Dimension::UiUx].score, 80);
    assert_eq!(result.overall_score, 79);
    assert_eq!(result.total_issues, 10);
    assert_eq!(result.critical_issues, 1);
    assert_eq!(result.high_issues, 3);
    assert_eq!(result.issues[0].severity, Critical);
    assert!(result.recommendations.len() <= 5);
    assert!(!result.is_degraded());
    assert_eq!(result.file_key, "example");
}

#[tokio::test]
async fn ten_criticals_clamp_the_dimension_to_zero() {
    let orch = orchestrator(
        analyzers(Script::Issues(vec![]), Script::Issues(vec![Critical; 10]), Script::Issues(vec![])),
        FAST,
    );

    let job_id = orch.start(source(), metadata("criticals")).unwrap();
    wait_terminal(&orch, &job_id).await;

    let result = ready(&orch, &job_id);
    let quality = &result.score_breakdown[&Dimension::CodeQuality];
    assert_eq!(quality.score, 0);
    assert!(!quality.degraded);
    assert_eq!(quality.severity_breakdown.get(&Critical), Some(&10));
    assert_eq!(result.overall_score, 70);
}

#[tokio::test]
async fn timed_out_dimension_degrades_but_job_completes() {
    let orch = orchestrator(
        analyzers(
            Script::Issues(vec![High]),
            Script::Issues(vec![]),
            Script::Sleep(Duration::from_secs(30)),
        ),
        Duration::from_millis(200),
    );

    let job_id = orch.start(source(), metadata("timeout")).unwrap();
    let reports = wait_terminal(&orch, &job_id).await;
    let last = reports.last().unwrap();
    assert_eq!(last.status, JobStatus::Completed);
    assert_eq!(last.progress, 100);

    let ui_task = last.tasks.iter().find(|task| task.dimension == Dimension::UiUx).unwrap();
    assert_eq!(ui_task.state, TaskState::Failed);
    assert!(ui_task.error.as_deref().unwrap_or_default().contains("timeout"));

    let result = ready(&orch, &job_id);
    let ui = &result.score_breakdown[&Dimension::UiUx];
    assert_eq!(ui.score, 0);
    assert!(ui.degraded);
    assert!(ui.severity_breakdown.is_empty());
    assert_eq!(result.degraded_dimensions, vec![Dimension::UiUx]);

    let diagnostics: Vec<_> = result.issues.iter().filter(|issue| issue.diagnostic).collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].dimension, Dimension::UiUx);
    assert_eq!(diagnostics[0].severity, Critical);

    // 90 * 0.30 + 100 * 0.30 + 0 * 0.40
    assert_eq!(result.overall_score, 57);
}

#[tokio::test]
async fn failing_and_panicking_analyzers_are_isolated() {
    let orch = orchestrator(
        analyzers(
            Script::Fail(AnalyzerError::Unavailable("scanner missing".to_string())),
            Script::Panic,
            Script::Issues(vec![Low]),
        ),
        FAST,
    );

    let job_id = orch.start(source(), metadata("isolation")).unwrap();
    let reports = wait_terminal(&orch, &job_id).await;
    let last = reports.last().unwrap();
    assert_eq!(last.status, JobStatus::Completed);
    assert!(last.tasks.iter().all(|task| task.state.is_terminal()));

    let result = ready(&orch, &job_id);
    assert_eq!(result.degraded_dimensions, vec![Dimension::Security, Dimension::CodeQuality]);
    assert_eq!(result.score_breakdown[&Dimension::UiUx].score, 98);
    assert!(result.score_breakdown[&Dimension::Security]
        .degraded_reason
        .as_deref()
        .unwrap_or_default()
        .contains("scanner missing"));
    assert!(result.score_breakdown[&Dimension::CodeQuality]
        .degraded_reason
        .as_deref()
        .unwrap_or_default()
        .contains("panicked"));
    assert_eq!(result.overall_score, 39);
    assert!(result.summary.contains("2 dimension(s) could not be analyzed"));
}

#[tokio::test]
async fn second_start_for_same_file_is_rejected() {
    let gate = CancellationToken::new();
    let orch = orchestrator(
        analyzers(Script::Gate(gate.clone()), Script::Issues(vec![]), Script::Issues(vec![])),
        FAST,
    );

    let first = orch.start(source(), metadata("same")).unwrap();
    match orch.start(source(), metadata("same")) {
        Err(ReviewerError::AnalysisInProgress { job_id, file_key }) => {
            assert_eq!(job_id, first);
            assert_eq!(file_key, "same");
        }
        other => panic!("expected AnalysisInProgress, got {:?}", other),
    }
    assert_eq!(orch.active_job("same"), Some(first.clone()));

    let other_file = orch.start(source(), metadata("other")).unwrap();
    assert_ne!(other_file, first);

    gate.cancel();
    wait_terminal(&orch, &first).await;
    wait_terminal(&orch, &other_file).await;

    assert_eq!(orch.active_job("same"), None);
    let again = orch.start(source(), metadata("same")).unwrap();
    assert_ne!(again, first);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_starts_yield_one_winner() {
    let gate = CancellationToken::new();
    let orch = orchestrator(
        analyzers(Script::Gate(gate.clone()), Script::Issues(vec![]), Script::Issues(vec![])),
        FAST,
    );

    let attempts: Vec<_> = (0..8)
        .map(|_| {
            let orch = orch.clone();
            tokio::spawn(async move { orch.start(source(), metadata("race")) })
        })
        .collect();

    let mut winners = Vec::new();
    for attempt in attempts {
        if let Ok(job_id) = attempt.await.unwrap() {
            winners.push(job_id);
        }
    }
    assert_eq!(winners.len(), 1);
    assert_eq!(orch.job_count(), 1);

    orch.cancel(&winners[0]).unwrap();
    wait_terminal(&orch, &winners[0]).await;
}

#[tokio::test]
async fn cancel_fails_the_job_with_cancelled_reason() {
    let orch = orchestrator(
        analyzers(
            Script::Sleep(Duration::from_secs(30)),
            Script::Sleep(Duration::from_secs(30)),
            Script::Issues(vec![]),
        ),
        Duration::from_secs(60),
    );

    let job_id = orch.start(source(), metadata("cancel")).unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(orch.cancel(&job_id).unwrap(), CancelAck::Requested);

    let reports = wait_terminal(&orch, &job_id).await;
    let last = reports.last().unwrap();
    assert_eq!(last.status, JobStatus::Failed);
    assert_eq!(last.phase, JobPhase::Failed);
    assert_eq!(last.progress, 100);
    assert!(last.tasks.iter().all(|task| task.state.is_terminal()));

    match orch.result(&job_id).unwrap() {
        ResultLookup::Failed(failure) => assert_eq!(failure.reason, FailureReason::Cancelled),
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(orch.cancel(&job_id).unwrap(), CancelAck::AlreadyTerminal);
    assert_eq!(orch.active_job("cancel"), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stalled_driver_fails_at_the_job_ceiling() {
    let orch = Orchestrator::new(
        DimensionTable::standard(),
        analyzers(
            Script::Issues(vec![]),
            Script::PanicWith(OnDrop::Block(Duration::from_secs(1))),
            Script::Issues(vec![]),
        ),
        OrchestratorSettings {
            task_timeout: Duration::from_millis(100),
            aggregation_overhead: Duration::from_millis(100),
            recommendation_limit: 5,
        },
    )
    .unwrap();

    let job_id = orch.start(source(), metadata("ceiling")).unwrap();
    let reports = wait_terminal(&orch, &job_id).await;
    let last = reports.last().unwrap();
    assert_eq!(last.status, JobStatus::Failed);
    assert_eq!(last.phase, JobPhase::Failed);
    assert_eq!(last.progress, 100);
    assert!(last.tasks.iter().all(|task| task.state.is_terminal()));

    match orch.result(&job_id).unwrap() {
        ResultLookup::Failed(failure) => assert_eq!(failure.reason, FailureReason::AggregateTimeout),
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(orch.active_job("ceiling"), None);
}

#[tokio::test]
async fn panicking_driver_fails_the_job_and_frees_the_key() {
    let orch = orchestrator(
        analyzers(Script::Issues(vec![]), Script::Issues(vec![]), Script::PanicWith(OnDrop::Panic)),
        FAST,
    );

    let job_id = orch.start(source(), metadata("driver")).unwrap();
    let reports = wait_terminal(&orch, &job_id).await;
    let last = reports.last().unwrap();
    assert_eq!(last.status, JobStatus::Failed);
    assert_eq!(last.progress, 100);
    assert!(last.tasks.iter().all(|task| task.state.is_terminal()));

    match orch.result(&job_id).unwrap() {
        ResultLookup::Failed(failure) => {
            assert_eq!(failure.reason, FailureReason::Internal);
            assert!(failure.message.contains("payload dropped"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(orch.active_job("driver"), None);
}

#[test]
fn unschedulable_timeouts_are_rejected() {
    let huge = OrchestratorSettings {
        task_timeout: Duration::from_secs(i64::MAX as u64),
        ..settings(FAST)
    };
    let all = analyzers(Script::Issues(vec![]), Script::Issues(vec![]), Script::Issues(vec![]));
    assert!(matches!(
        Orchestrator::new(DimensionTable::standard(), all, huge),
        Err(ReviewerError::ConfigurationError { .. })
    ));
}

#[tokio::test]
async fn restart_is_accepted_once_status_is_terminal() {
    let orch = orchestrator(analyzers(Script::Issues(vec![]), Script::Issues(vec![Low]), Script::Issues(vec![])), FAST);

    let mut previous = orch.start(source(), metadata("again")).unwrap();
    for _ in 0..20 {
        wait_terminal(&orch, &previous).await;
        let next = orch.start(source(), metadata("again")).unwrap();
        assert_ne!(next, previous);
        previous = next;
    }
    wait_terminal(&orch, &previous).await;
}

#[tokio::test]
async fn undecodable_input_is_a_precondition_failure() {
    let security = Arc::new(ScriptedAnalyzer::new(Dimension::Security, Script::Issues(vec![])));
    let calls = Arc::clone(&security.calls);
    let analyzers: Vec<Arc<dyn Analyzer>> = vec![
        security as Arc<dyn Analyzer>,
        Arc::new(ScriptedAnalyzer::new(Dimension::CodeQuality, Script::Issues(vec![]))) as Arc<dyn Analyzer>,
        Arc::new(ScriptedAnalyzer::new(Dimension::UiUx, Script::Issues(vec![]))) as Arc<dyn Analyzer>,
    ];
    let orch = orchestrator(analyzers, FAST);

    let job_id = orch.start(vec![0xff, 0xfe, 0x00, 0xc3], metadata("binary")).unwrap();
    let reports = wait_terminal(&orch, &job_id).await;
    let last = reports.last().unwrap();
    assert_eq!(last.status, JobStatus::Failed);
    assert!(last.tasks.iter().all(|task| task.state == TaskState::Failed));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    match orch.result(&job_id).unwrap() {
        ResultLookup::Failed(failure) => assert_eq!(failure.reason, FailureReason::Precondition),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn progress_never_decreases() {
    let orch = orchestrator(
        analyzers(
            Script::Progress(vec![0.1, 0.5, 0.9], Duration::from_millis(15)),
            Script::Progress(vec![0.3, 0.2, 0.8], Duration::from_millis(10)),
            Script::Sleep(Duration::from_millis(60)),
        ),
        FAST,
    );

    let job_id = orch.start(source(), metadata("progress")).unwrap();
    let reports = wait_terminal(&orch, &job_id).await;

    let percents: Vec<u8> = reports.iter().map(|report| report.progress).collect();
    assert!(percents.windows(2).all(|pair| pair[0] <= pair[1]), "progress regressed: {:?}", percents);
    assert_eq!(*percents.last().unwrap(), 100);
    assert_eq!(reports.last().unwrap().phase, JobPhase::Completed);
}

#[tokio::test]
async fn result_is_not_ready_while_running() {
    let gate = CancellationToken::new();
    let orch = orchestrator(
        analyzers(Script::Issues(vec![]), Script::Gate(gate.clone()), Script::Issues(vec![])),
        FAST,
    );

    let job_id = orch.start(source(), metadata("pending")).unwrap();
    match orch.result(&job_id).unwrap() {
        ResultLookup::NotReady { status, progress } => {
            assert_eq!(status, JobStatus::Running);
            assert!(progress < 100);
        }
        other => panic!("expected not ready, got {:?}", other),
    }

    assert!(matches!(orch.discard(&job_id), Err(ReviewerError::JobStillActive { .. })));

    gate.cancel();
    wait_terminal(&orch, &job_id).await;
    assert!(orch.result(&job_id).unwrap().ready().is_some());

    orch.discard(&job_id).unwrap();
    assert!(matches!(orch.status(&job_id), Err(ReviewerError::JobNotFound { .. })));
    assert!(matches!(orch.discard(&job_id), Err(ReviewerError::JobNotFound { .. })));
}

#[tokio::test]
async fn unknown_jobs_are_not_found() {
    let orch = orchestrator(analyzers(Script::Issues(vec![]), Script::Issues(vec![]), Script::Issues(vec![])), FAST);
    assert!(matches!(orch.status("nope"), Err(ReviewerError::JobNotFound { .. })));
    assert!(matches!(orch.result("nope"), Err(ReviewerError::JobNotFound { .. })));
    assert!(matches!(orch.cancel("nope"), Err(ReviewerError::JobNotFound { .. })));
}

#[test]
fn every_weighted_dimension_needs_one_analyzer() {
    let missing = vec![Arc::new(ScriptedAnalyzer::new(Dimension::Security, Script::Issues(vec![]))) as Arc<dyn Analyzer>];
    assert!(Orchestrator::new(DimensionTable::standard(), missing, settings(FAST)).is_err());

    let duplicated = {
        let mut all = analyzers(Script::Issues(vec![]), Script::Issues(vec![]), Script::Issues(vec![]));
        all.push(Arc::new(ScriptedAnalyzer::new(Dimension::UiUx, Script::Issues(vec![]))));
        all
    };
    assert!(Orchestrator::new(DimensionTable::standard(), duplicated, settings(FAST)).is_err());
}

#[test]
fn start_outside_a_runtime_is_an_error() {
    let orch = orchestrator(analyzers(Script::Issues(vec![]), Script::Issues(vec![]), Script::Issues(vec![])), FAST);
    assert!(matches!(orch.start(source(), metadata("no-runtime")), Err(ReviewerError::SystemError { .. })));
    assert_eq!(orch.active_job("no-runtime"), None);
}
