use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for the job runner: which jobs run, how often, where the
/// GraphQL endpoint lives, and where the log files go. Every field has a
/// default so an empty file is a valid configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub logs: LogConfig,
    pub heartbeat: JobSchedule,
    pub low_stock: LowStockSchedule,
    pub report: ReportSchedule,
    pub order_reminders: ReminderSchedule,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub url: String,
    /// Bound on each request; there is no retry.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000/graphql".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub dir: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("/tmp"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct JobSchedule {
    pub enabled: bool,
    pub every_secs: u64,
}

impl Default for JobSchedule {
    fn default() -> Self {
        // Heartbeat cadence: every five minutes.
        Self {
            enabled: true,
            every_secs: 5 * 60,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LowStockSchedule {
    pub enabled: bool,
    pub every_secs: u64,
}

impl Default for LowStockSchedule {
    fn default() -> Self {
        // Twice a day.
        Self {
            enabled: true,
            every_secs: 12 * 60 * 60,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportSchedule {
    pub enabled: bool,
    pub every_secs: u64,
}

impl Default for ReportSchedule {
    fn default() -> Self {
        // Weekly.
        Self {
            enabled: true,
            every_secs: 7 * 24 * 60 * 60,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReminderSchedule {
    pub enabled: bool,
    pub every_secs: u64,
    /// Orders placed within this many days get a reminder line.
    pub lookback_days: i64,
}

impl Default for ReminderSchedule {
    fn default() -> Self {
        // Daily, looking back one week.
        Self {
            enabled: true,
            every_secs: 24 * 60 * 60,
            lookback_days: 7,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api.url, "http://localhost:8000/graphql");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.logs.dir, PathBuf::from("/tmp"));
        assert!(config.heartbeat.enabled);
        assert_eq!(config.heartbeat.every_secs, 300);
        assert_eq!(config.low_stock.every_secs, 43_200);
        assert_eq!(config.report.every_secs, 604_800);
        assert_eq!(config.order_reminders.lookback_days, 7);
    }

    #[test]
    fn partial_config_overrides_only_named_fields() {
        let config: Config = toml::from_str(
            r#"
            [api]
            url = "http://crm:9000/graphql"

            [heartbeat]
            every_secs = 60

            [order_reminders]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.api.url, "http://crm:9000/graphql");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.heartbeat.every_secs, 60);
        assert!(!config.order_reminders.enabled);
        assert!(config.low_stock.enabled);
    }
}
