//! Runtime configuration

/// Application configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Storage directory for the JSON records |
/// | LOG_LEVEL | info | tracing level filter |
/// | LOG_DIR | (unset) | Daily-rolling log file directory |
/// | DEFAULT_MANAGER_CODE | 1995 | Bootstrap manager access code |
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding users.json, orders.json and current_user.json
    pub work_dir: String,
    /// Log level: trace | debug | info | warn | error
    pub log_level: String,
    /// Optional directory for file-backed logs
    pub log_dir: Option<String>,
    /// Access code seeded for the first-run manager
    pub default_manager_code: String,
}

impl Config {
    /// Load from environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            default_manager_code: std::env::var("DEFAULT_MANAGER_CODE")
                .unwrap_or_else(|_| "1995".into()),
        }
    }

    /// Override the storage directory, used by tests
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
