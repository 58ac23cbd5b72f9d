// --- File: crates/turnero_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- Backend Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendConfig {
    /// Backend origin, without a trailing slash (e.g. "http://localhost:8080").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

// --- Log Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogConfig {
    /// Directory for the rolling log files. The TUI owns the terminal, so
    /// nothing is ever logged to stdout.
    #[serde(default = "default_log_directory")]
    pub directory: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
        }
    }
}

fn default_log_directory() -> String {
    "logs".to_string()
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub log: LogConfig,
}
