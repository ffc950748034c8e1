use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use crate::adapters::llm_analyzer::LlmAnalyzer;
use crate::config::config_manager::ConfigManager;
use crate::config::constants::STATUS_POLL_INTERVAL_MS;
use crate::enums::commands::Commands;
use crate::enums::result_lookup::ResultLookup;
use crate::errors::{ReviewerError, ReviewerResult};
use crate::services::ai_providers::anthropic::AnthropicProvider;
use crate::services::orchestrator::Orchestrator;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::config::config::Config;
use crate::structs::dimension_table::DimensionTable;
use crate::structs::file_metadata::FileMetadata;
use crate::structs::orchestrator_settings::OrchestratorSettings;
use crate::traits::ai_provider::AiProvider;

pub struct CommandRunner {
    start_time: Option<Instant>,
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner {
    pub fn new() -> Self {
        Self {
            start_time: None,
        }
    }

    pub async fn run_command(&mut self, command: Commands) -> ReviewerResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command().await,
            Commands::Analyze { file, config, json } => self.analyze_command(file, config, json).await,
            Commands::Validate { config } => self.validate_command(config).await,
        };

        if let Some(start) = self.start_time {
            let duration = start.elapsed();
            log::info!("⏱️  Command completed in {:.2}s", duration.as_secs_f64());
        }

        result
    }

    async fn init_command(&self) -> ReviewerResult<()> {
        log::info!("🚀 Initializing app-reviewer configuration...");

        match ConfigManager::create_sample_config(None) {
            Ok(path) => {
                log::info!("✅ Configuration file created successfully at {}", path.display());
                log::info!("📝 Adjust timeouts and weights to suit your deployment.");
                log::info!("🔧 Run 'app-reviewer validate' to check your configuration.");
            }
            Err(e) => {
                log::error!("❌ Failed to create configuration: {}", e);
                return Err(e);
            }
        }

        Ok(())
    }

    async fn validate_command(&self, config_path: Option<PathBuf>) -> ReviewerResult<()> {
        log::info!("🔍 Validating app-reviewer configuration...");

        let config = Self::load_config(config_path.as_deref())?;
        log::info!("✅ Configuration file loaded successfully");

        let table = DimensionTable::from_weights(&config.scoring.weights)?;
        for entry in table.entries() {
            log::info!("   {} weight {:.2}", entry.dimension.title(), entry.weight);
        }
        log::info!(
            "   task timeout {}s, aggregation overhead {}s",
            config.orchestrator.task_timeout_secs,
            config.orchestrator.aggregation_overhead_secs
        );

        if std::env::var(&config.ai.api_key_env).is_err() {
            log::warn!("⚠️ {} is not set; 'analyze' will fail until it is", config.ai.api_key_env);
        }

        log::info!("✅ Configuration is valid");
        Ok(())
    }

    async fn analyze_command(&self, file: PathBuf, config_path: Option<PathBuf>, json: bool) -> ReviewerResult<()> {
        log::info!("🔍 Starting analysis of {}...", file.display());

        let config = match Self::load_config(config_path.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                log::error!("❌ Failed to load configuration: {}", e);
                log::error!("💡 Run 'app-reviewer init' to create a configuration file.");
                return Err(e);
            }
        };

        let provider = AnthropicProvider::from_env(&config.ai).map_err(|e| {
            ReviewerError::config_error(
                &e.to_string(),
                Some("ai.api_key_env"),
                Some("Export your Anthropic API key before running 'analyze'"),
            )
        })?;
        let orchestrator = Self::build_orchestrator(&config, Arc::new(provider))?;

        let content = tokio::fs::read(&file)
            .await
            .map_err(|e| ReviewerError::file_error(&file.display().to_string(), "read", &e.to_string()))?;
        let metadata = FileMetadata::for_path(&file, content.len() as u64);

        let job_id = orchestrator.start(content, metadata)?;
        let result = Self::wait_for_result(&orchestrator, &job_id).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(result.as_ref())?);
        } else {
            Self::print_report(&result);
        }

        Ok(())
    }

    /// Wires one model-backed analyzer to each dimension the config weights.
    pub fn build_orchestrator(config: &Config, provider: Arc<dyn AiProvider>) -> ReviewerResult<Orchestrator> {
        let table = DimensionTable::from_weights(&config.scoring.weights)?;
        let analyzers = LlmAnalyzer::for_table(&table, provider);
        Orchestrator::new(table, analyzers, OrchestratorSettings::from_config(&config.orchestrator))
    }

    /// Polls the job, logging each progress change. Ctrl-C cancels it.
    async fn wait_for_result(orchestrator: &Orchestrator, job_id: &str) -> ReviewerResult<Arc<AnalysisResult>> {
        let mut last_progress = None;
        let mut cancel_sent = false;

        loop {
            let status = orchestrator.status(job_id)?;
            if last_progress != Some(status.progress) {
                log::info!("📈 [{:>3}%] {}", status.progress, status.message);
                last_progress = Some(status.progress);
            }

            if status.status.is_terminal() {
                break;
            }

            tokio::select! {
                _ = tokio::signal::ctrl_c(), if !cancel_sent => {
                    log::warn!("🛑 Interrupt received, cancelling job {}", job_id);
                    orchestrator.cancel(job_id)?;
                    cancel_sent = true;
                }
                _ = tokio::time::sleep(Duration::from_millis(STATUS_POLL_INTERVAL_MS)) => {}
            }
        }

        match orchestrator.result(job_id)? {
            ResultLookup::Ready(result) => Ok(result),
            ResultLookup::Failed(failure) => Err(ReviewerError::system_error(
                &format!("analysis ({})", failure.reason),
                &failure.message,
            )),
            ResultLookup::NotReady { status, progress } => Err(ReviewerError::system_error(
                "analysis",
                &format!("job is {} at {}% after reporting a terminal status", status, progress),
            )),
        }
    }

    fn print_report(result: &AnalysisResult) {
        log::info!("\n{}", "=".repeat(60));
        log::info!("📊 Analysis report for: {}", result.file_name);
        log::info!("{}", "=".repeat(60));
        log::info!("{}", result.verdict.headline());
        log::info!("🏆 Overall score: {}/100", result.overall_score);

        for score in result.score_breakdown.values() {
            let marker = if score.degraded { " (degraded)" } else { "" };
            log::info!(
                "   {:<14} {:>3}/100  weight {:.2}  issues {}{}",
                score.dimension.title(),
                score.score,
                score.weight,
                score.issue_count,
                marker
            );
        }

        log::info!("\n🧾 Issues: {} total, {} critical, {} high", result.total_issues, result.critical_issues, result.high_issues);
        for issue in &result.issues {
            let location = issue.line_number.map(|line| format!(" (line {})", line)).unwrap_or_default();
            log::info!("   {} [{}] {}: {}{}", issue.severity.emoji(), issue.dimension, issue.severity, issue.title, location);
        }

        if !result.recommendations.is_empty() {
            log::info!("\n💡 Recommendations:");
            for (i, recommendation) in result.recommendations.iter().enumerate() {
                log::info!("   {}. {}", i + 1, recommendation);
            }
        }

        log::info!("\n{}", result.summary);
    }

    fn load_config(path: Option<&Path>) -> ReviewerResult<Config> {
        let config = ConfigManager::load(path)?;
        ConfigManager::validate_config(&config).map_err(|errors| {
            for error in &errors {
                log::error!("   - {}", error);
            }
            ReviewerError::config_error(&errors.join("; "), None, Some("Run 'app-reviewer validate' for details"))
        })?;
        Ok(config)
    }
}
