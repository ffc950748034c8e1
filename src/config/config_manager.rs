use std::fs;
use std::path::{Path, PathBuf};
use crate::config::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, MAX_TIMEOUT_SECS};
use crate::errors::{ReviewerError, ReviewerResult};
use crate::structs::config::config::Config;
use crate::structs::dimension_table::DimensionTable;

pub struct ConfigManager;

impl ConfigManager {

    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the config at `path`, or the default location when none is given.
    /// A missing default file yields built-in defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> ReviewerResult<Config> {
        let (location, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_config_path() {
                Some(path) => (path, false),
                None => return Ok(Config::default()),
            },
        };

        if !location.exists() {
            if explicit {
                return Err(ReviewerError::ConfigurationFileError {
                    path: location.display().to_string(),
                    reason: "file does not exist".to_string(),
                });
            }
            log::debug!("No config at {}, using defaults", location.display());
            return Ok(Config::default());
        }

        log::info!("📋 Loading config from: {}", location.display());
        let content = fs::read_to_string(&location)
            .map_err(|e| ReviewerError::file_error(&location.display().to_string(), "read", &e.to_string()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> ReviewerResult<Config> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn sample_config() -> &'static str {
        r#"# App Reviewer Configuration

[orchestrator]
# Seconds each dimension analyzer may run before it is abandoned
task_timeout_secs = 300

# Extra seconds the whole job may take beyond the analyzer timeout
aggregation_overhead_secs = 30

# Maximum number of distinct recommendations in a report
recommendation_limit = 5

# Dimension weights, must sum to 1.0
[scoring.weights]
security = 0.30
code_quality = 0.30
ui_ux = 0.40

# AI Configuration
[ai]
provider = "anthropic"
model = "claude-sonnet-4-20250514"
max_tokens = 8192
temperature = 0.0
api_key_env = "ANTHROPIC_API_KEY"
"#
    }

    pub fn create_sample_config(target: Option<&Path>) -> ReviewerResult<PathBuf> {
        let config_file_path = match target {
            Some(path) => path.to_path_buf(),
            None => Self::default_config_path()
                .ok_or_else(|| ReviewerError::system_error("locate home directory", "no home directory available"))?,
        };

        if config_file_path.exists() {
            return Err(ReviewerError::ConfigurationFileError {
                path: config_file_path.display().to_string(),
                reason: "file already exists".to_string(),
            });
        }

        if let Some(parent) = config_file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_file_path, Self::sample_config())?;
        log::info!("✅ Created sample config at: {}", config_file_path.display());
        Ok(config_file_path)
    }

    pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if config.orchestrator.task_timeout_secs == 0 {
            errors.push("orchestrator.task_timeout_secs must be greater than zero".to_string());
        }

        if config.orchestrator.task_timeout_secs > MAX_TIMEOUT_SECS {
            errors.push(format!("orchestrator.task_timeout_secs must not exceed {}", MAX_TIMEOUT_SECS));
        }

        if config.orchestrator.aggregation_overhead_secs > MAX_TIMEOUT_SECS {
            errors.push(format!("orchestrator.aggregation_overhead_secs must not exceed {}", MAX_TIMEOUT_SECS));
        }

        if config.orchestrator.recommendation_limit == 0 {
            errors.push("orchestrator.recommendation_limit must be greater than zero".to_string());
        }

        match DimensionTable::from_weights(&config.scoring.weights) {
            Ok(_) => {}
            Err(ReviewerError::ConfigurationError { message, .. }) => errors.push(message),
            Err(other) => errors.push(other.user_message()),
        }

        if config.ai.provider != "anthropic" {
            errors.push(format!("Unsupported AI provider: {}", config.ai.provider));
        }

        if config.ai.max_tokens == 0 {
            errors.push("ai.max_tokens must be greater than zero".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
