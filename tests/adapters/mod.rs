use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use tokio::time::Instant;
use app_reviewer::adapters::llm_analyzer::LlmAnalyzer;
use app_reviewer::enums::ai_provider_error::AiProviderError;
use app_reviewer::enums::analyzer_error::AnalyzerError;
use app_reviewer::enums::dimension::Dimension;
use app_reviewer::enums::severity::Severity;
use app_reviewer::services::progress_tracker::ProgressTracker;
use app_reviewer::structs::analysis_request::AnalysisRequest;
use app_reviewer::structs::analyzer_context::AnalyzerContext;
use app_reviewer::structs::dimension_table::DimensionTable;
use app_reviewer::structs::task_progress::TaskProgress;
use app_reviewer::traits::ai_provider::AiProvider;
use app_reviewer::traits::analyzer::Analyzer;
use app_reviewer::config::config_manager::ConfigManager;
use app_reviewer::enums::result_lookup::ResultLookup;
use app_reviewer::workers::command_runner::CommandRunner;
use crate::common::{metadata, wait_terminal};

enum Reply {
    Text(&'static str),
    Error(AiProviderError),
    Stall,
}

struct CannedProvider {
    reply: Reply,
}

#[async_trait]
impl AiProvider for CannedProvider {
    async fn chat(&self, system_prompt: String, user_prompts: Vec<String>) -> Result<String, AiProviderError> {
        assert!(system_prompt.contains("JSON"));
        assert_eq!(user_prompts.len(), 1);
        match &self.reply {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Error(error) => Err(error.clone()),
            Reply::Stall => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(String::new())
            }
        }
    }
}

fn request() -> AnalysisRequest {
    AnalysisRequest {
        content: "const token = 'sk-live-123';".to_string(),
        metadata: metadata("adapter"),
    }
}

fn context(budget: Duration) -> (AnalyzerContext, Arc<ProgressTracker>) {
    let tracker = Arc::new(ProgressTracker::new(&DimensionTable::standard()));
    let ctx = AnalyzerContext::new(Instant::now() + budget, TaskProgress::new(Arc::clone(&tracker), 0));
    (ctx, tracker)
}

fn analyzer(reply: Reply) -> LlmAnalyzer {
    LlmAnalyzer::new(Dimension::Security, Arc::new(CannedProvider { reply }))
}

#[tokio::test]
async fn parses_issues_from_the_model_reply() {
    let reply = Reply::Text(
        r#"Sure. {"issues":[{"severity":"critical","title":"Hardcoded secret","description":"API key in source","line_number":1,"code_snippet":"const token = 'sk-live-123';","recommendation":"Load the key from the environment"}],"recommendations":["Rotate the key"]}"#,
    );
    let (ctx, tracker) = context(Duration::from_secs(5));

    let issues = analyzer(reply).analyze(&request(), &ctx).await.unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Critical);
    assert_eq!(issues[0].dimension, Dimension::Security);
    assert_eq!(issues[0].line_number, Some(1));
    // sub-progress reports moved the security band forward
    assert!(tracker.percent() > 15);
}

#[tokio::test]
async fn unparsable_reply_is_an_error() {
    let (ctx, _) = context(Duration::from_secs(5));
    let err = analyzer(Reply::Text("I am unable to help with that.")).analyze(&request(), &ctx).await.unwrap_err();
    assert!(matches!(err, AnalyzerError::MalformedResponse(_)));
}

#[tokio::test]
async fn provider_failures_are_typed() {
    let (ctx, _) = context(Duration::from_secs(5));
    let err = analyzer(Reply::Error(AiProviderError::AuthenticationError("bad key".to_string())))
        .analyze(&request(), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, AnalyzerError::Unavailable(_)));

    let err = analyzer(Reply::Error(AiProviderError::NetworkError("reset".to_string())))
        .analyze(&request(), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, AnalyzerError::Provider(_)));
}

#[tokio::test]
async fn respects_the_caller_deadline() {
    let (ctx, _) = context(Duration::from_millis(50));
    let started = std::time::Instant::now();
    let err = analyzer(Reply::Stall).analyze(&request(), &ctx).await.unwrap_err();
    assert!(matches!(err, AnalyzerError::DeadlineExceeded));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn one_analyzer_per_dimension() {
    let provider: Arc<dyn AiProvider> = Arc::new(CannedProvider { reply: Reply::Text("{}") });
    let analyzers = LlmAnalyzer::for_table(&DimensionTable::standard(), provider);
    let dimensions: Vec<Dimension> = analyzers.iter().map(|analyzer| analyzer.dimension()).collect();
    assert_eq!(dimensions, Dimension::ALL.to_vec());

    let prompt = LlmAnalyzer::new(Dimension::UiUx, Arc::new(CannedProvider { reply: Reply::Text("{}") })).system_prompt();
    assert!(prompt.contains("accessibility"));
    assert!(prompt.contains("\"issues\""));
}

#[test]
fn subset_weight_config_builds_an_orchestrator() {
    let config = ConfigManager::parse(
        r#"
[scoring.weights]
security = 0.5
ui_ux = 0.5
"#,
    )
    .unwrap();
    assert!(ConfigManager::validate_config(&config).is_ok());

    let provider: Arc<dyn AiProvider> = Arc::new(CannedProvider { reply: Reply::Text(r#"{"issues": []}"#) });
    let orchestrator = CommandRunner::build_orchestrator(&config, provider).unwrap();
    assert_eq!(orchestrator.job_count(), 0);

    let table = DimensionTable::from_weights(&config.scoring.weights).unwrap();
    let analyzers = LlmAnalyzer::for_table(&table, Arc::new(CannedProvider { reply: Reply::Text("{}") }));
    let dimensions: Vec<Dimension> = analyzers.iter().map(|analyzer| analyzer.dimension()).collect();
    assert_eq!(dimensions, vec![Dimension::Security, Dimension::UiUx]);
}

#[tokio::test]
async fn subset_weight_config_scores_only_weighted_dimensions() {
    let config = ConfigManager::parse(
        r#"
[scoring.weights]
security = 0.5
ui_ux = 0.5
"#,
    )
    .unwrap();
    let provider: Arc<dyn AiProvider> = Arc::new(CannedProvider {
        reply: Reply::Text(r#"{"issues": [{"severity": "medium", "title": "t", "description": "d", "recommendation": "r"}]}"#),
    });
    let orchestrator = CommandRunner::build_orchestrator(&config, provider).unwrap();

    let job_id = orchestrator.start(b"let x = 1;".to_vec(), metadata("subset")).unwrap();
    wait_terminal(&orchestrator, &job_id).await;

    let result = match orchestrator.result(&job_id).unwrap() {
        ResultLookup::Ready(result) => result,
        other => panic!("expected a result, got {:?}", other),
    };
    let dimensions: Vec<Dimension> = result.score_breakdown.keys().copied().collect();
    assert_eq!(dimensions, vec![Dimension::Security, Dimension::UiUx]);
    assert_eq!(result.overall_score, 95);
}
