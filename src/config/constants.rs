pub const DEFAULT_TASK_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_AGGREGATION_OVERHEAD_SECS: u64 = 30;
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 5;
/// Upper bound for either timeout knob, in seconds (one day).
pub const MAX_TIMEOUT_SECS: u64 = 86_400;

pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

pub const CONFIG_DIR_NAME: &str = "app-reviewer";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Running tasks that have not reported sub-progress count this far through their band.
pub const RUNNING_TASK_CREDIT: f64 = 0.25;

/// Severity points above which further deductions count at half weight.
pub const DEDUCTION_KNEE: u32 = 50;
pub const DEDUCTION_DAMPING: f64 = 0.5;


pub const STATUS_POLL_INTERVAL_MS: u64 = 250;
