use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    /// Mirror stdout alongside the log file (text mode only)
    #[serde(default = "default_true")]
    pub log_to_stdout: bool,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub transfer: TransferConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

fn default_true() -> bool {
    true
}

/// Where the session mirror lives
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionConfig {
    pub storage_dir: String,
    /// Fixed name the mirror is stored under
    pub key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_dir: "./data/session".to_string(),
            key: "user".to_string(),
        }
    }
}

impl SessionConfig {
    pub fn storage_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_dir)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthConfig {
    /// Shared demo credential accepted for every account
    pub demo_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            demo_password: "password".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TransferConfig {
    /// Simulated network latency before a confirmed transfer completes
    pub simulated_delay_ms: u64,
    /// Also credit the receiver's balance on completion
    #[serde(default)]
    pub credit_receiver: bool,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            simulated_delay_ms: 2000,
            credit_receiver: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HistoryConfig {
    pub page_size: usize,
    /// Customers below this balance count as low-balance in the admin view
    pub low_balance_threshold: i64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            low_balance_threshold: 100,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "bankdash.log".to_string(),
            use_json: false,
            rotation: "never".to_string(),
            log_to_stdout: true,
            session: SessionConfig::default(),
            auth: AuthConfig::default(),
            transfer: TransferConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse {}", config_path))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}
