//! Configuration system
//!
//! Handles TOML config file parsing and validation. A [`Config`] is loaded
//! once at startup, validated, and then only ever read.

pub mod file;

pub use file::ConfigFile;

use crate::error::ConfigError;
use lettre::Address;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound for cooldown and duration windows (one year)
pub const MAX_COOLDOWN_SECS: u64 = 365 * 24 * 3600;

/// Upper bound for one HTTP request
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Upper bound for the pause between HTTP check cycles (one day)
pub const MAX_INTERVAL_SECS: u64 = 24 * 3600;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Per-metric alert thresholds
    #[serde(default)]
    pub thresholds: Thresholds,
    /// SMTP settings; alerts go to the terminal when absent
    #[serde(default)]
    pub email: Option<EmailConfig>,
}

impl Config {
    /// Check every field the monitors depend on.
    ///
    /// A config that passes is safe to hand to the monitors as-is.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.cpu.validate("thresholds.cpu")?;
        self.thresholds.memory.validate("thresholds.memory")?;
        self.thresholds.disk.validate()?;
        self.thresholds.http.validate()?;
        if let Some(email) = &self.email {
            email.validate()?;
        }
        Ok(())
    }
}

/// Thresholds for all monitored metrics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Thresholds {
    pub cpu: ThresholdSpec,
    pub memory: ThresholdSpec,
    pub disk: DiskSpec,
    pub http: HttpProbeSpec,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cpu: ThresholdSpec {
                threshold: 90.0,
                duration_secs: Some(300),
                cooldown_secs: 1800,
            },
            memory: ThresholdSpec {
                threshold: 80.0,
                duration_secs: None,
                cooldown_secs: 1800,
            },
            disk: DiskSpec::default(),
            http: HttpProbeSpec::default(),
        }
    }
}

/// Threshold for a percentage metric
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ThresholdSpec {
    /// Alert when the measured percentage is strictly above this value
    pub threshold: f64,
    /// Sustained-breach window. Parsed and reported, not enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,
    /// Minimum time between two alerts for this metric
    pub cooldown_secs: u64,
}

impl ThresholdSpec {
    /// Cooldown as a [`Duration`]
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    /// Reserved sustained-breach window
    pub fn duration(&self) -> Option<Duration> {
        self.duration_secs.map(Duration::from_secs)
    }

    fn validate(&self, key: &str) -> Result<(), ConfigError> {
        validate_percent(&format!("{}.threshold", key), self.threshold)?;
        validate_secs(
            &format!("{}.cooldown_secs", key),
            self.cooldown_secs,
            0,
            MAX_COOLDOWN_SECS,
        )?;
        if let Some(duration) = self.duration_secs {
            validate_secs(
                &format!("{}.duration_secs", key),
                duration,
                0,
                MAX_COOLDOWN_SECS,
            )?;
        }
        Ok(())
    }
}

/// Disk usage threshold for one mount point
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiskSpec {
    /// Whether the disk monitor runs at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Mount point to watch
    #[serde(default = "default_mount_point")]
    pub mount_point: String,
    #[serde(flatten)]
    pub limits: ThresholdSpec,
}

impl Default for DiskSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            mount_point: default_mount_point(),
            limits: ThresholdSpec {
                threshold: 90.0,
                duration_secs: None,
                cooldown_secs: 4 * 3600,
            },
        }
    }
}

impl DiskSpec {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.mount_point.trim().is_empty() {
            return Err(ConfigError::invalid(
                "thresholds.disk.mount_point",
                "must not be empty",
            ));
        }
        self.limits.validate("thresholds.disk")
    }
}

/// HTTP availability probe settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HttpProbeSpec {
    /// Whether the HTTP monitor runs at all
    pub enabled: bool,
    /// Endpoint to GET
    pub url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Number of probes per check cycle
    pub sample_rate: u32,
    /// Alert when the failure percentage is strictly above this value
    pub failure_threshold: f64,
    /// Pause between check cycles
    pub check_interval_secs: u64,
    /// Minimum time between two alerts
    pub cooldown_secs: u64,
}

impl Default for HttpProbeSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "http://localhost:8080/health".to_string(),
            timeout_secs: 5,
            sample_rate: 10,
            failure_threshold: 20.0,
            check_interval_secs: 60,
            cooldown_secs: 900,
        }
    }
}

impl HttpProbeSpec {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::invalid(
                "thresholds.http.sample_rate",
                "must be greater than 0",
            ));
        }
        validate_secs(
            "thresholds.http.timeout_secs",
            self.timeout_secs,
            1,
            MAX_TIMEOUT_SECS,
        )?;
        validate_secs(
            "thresholds.http.check_interval_secs",
            self.check_interval_secs,
            1,
            MAX_INTERVAL_SECS,
        )?;
        validate_secs(
            "thresholds.http.cooldown_secs",
            self.cooldown_secs,
            0,
            MAX_COOLDOWN_SECS,
        )?;
        validate_percent("thresholds.http.failure_threshold", self.failure_threshold)?;

        let url = reqwest::Url::parse(&self.url)
            .map_err(|e| ConfigError::invalid("thresholds.http.url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "thresholds.http.url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        Ok(())
    }
}

/// SMTP delivery settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailConfig {
    /// SMTP relay host
    pub smtp_server: String,
    /// SMTP port (STARTTLS)
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// Sender address
    pub from: String,
    /// Recipient address
    pub to: String,
    /// SMTP username
    pub username: String,
    /// SMTP password
    pub password: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_server: "smtp.example.com".to_string(),
            smtp_port: default_smtp_port(),
            from: "alerts@example.com".to_string(),
            to: "admin@example.com".to_string(),
            username: "alertuser".to_string(),
            password: "alertpassword".to_string(),
        }
    }
}

impl EmailConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.smtp_server.trim().is_empty() {
            return Err(ConfigError::invalid("email.smtp_server", "must not be empty"));
        }
        self.from
            .parse::<Address>()
            .map_err(|e| ConfigError::invalid("email.from", e.to_string()))?;
        self.to
            .parse::<Address>()
            .map_err(|e| ConfigError::invalid("email.to", e.to_string()))?;
        Ok(())
    }
}

fn validate_secs(key: &str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if !(min..=max).contains(&value) {
        return Err(ConfigError::invalid(
            key,
            format!("{} is outside {}..={} seconds", value, min, max),
        ));
    }
    Ok(())
}

fn validate_percent(key: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(ConfigError::invalid(
            key,
            format!("{} is not a percentage between 0 and 100", value),
        ));
    }
    Ok(())
}

fn default_true() -> bool {
    true
}

fn default_mount_point() -> String {
    "/".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

/// Render a duration the way it is written in log lines, e.g. `30m` or `1h30m`
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    if total == 0 {
        return "0s".to_string();
    }

    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h", hours));
    }
    if mins > 0 {
        out.push_str(&format!("{}m", mins));
    }
    if secs > 0 {
        out.push_str(&format!("{}s", secs));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_email() -> Config {
        Config {
            email: Some(EmailConfig::default()),
            ..Config::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.thresholds.cpu.threshold, 90.0);
        assert_eq!(config.thresholds.cpu.cooldown(), Duration::from_secs(30 * 60));
        assert_eq!(config.thresholds.memory.threshold, 80.0);
        assert_eq!(config.thresholds.disk.limits.cooldown(), Duration::from_secs(4 * 3600));
        assert_eq!(config.thresholds.http.sample_rate, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_with_email_is_valid() {
        assert!(config_with_email().validate().is_ok());
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        let mut config = Config::default();
        config.thresholds.http.sample_rate = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sample_rate"));
    }

    #[test]
    fn test_oversized_windows_rejected() {
        let config: Config = toml::from_str(
            r#"
            [thresholds.cpu]
            threshold = 90.0
            cooldown_secs = 9223372036854775807
            "#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("thresholds.cpu.cooldown_secs"));

        let mut config = Config::default();
        config.thresholds.http.timeout_secs = MAX_TIMEOUT_SECS + 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));

        let mut config = Config::default();
        config.thresholds.http.check_interval_secs = u64::MAX;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("check_interval_secs"));

        let mut config = Config::default();
        config.thresholds.http.cooldown_secs = MAX_COOLDOWN_SECS + 1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.thresholds.disk.limits.cooldown_secs = MAX_COOLDOWN_SECS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let mut config = Config::default();
        config.thresholds.memory.threshold = 120.0;
        assert!(config.validate().is_err());

        config.thresholds.memory.threshold = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_url_rejected() {
        let mut config = Config::default();
        config.thresholds.http.url = "ftp://example.com/health".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));

        config.thresholds.http.url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_recipient_rejected() {
        let mut config = config_with_email();
        if let Some(email) = config.email.as_mut() {
            email.to = "admin-at-example".to_string();
        }
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("email.to"));
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: Config = toml::from_str(
            r#"
            [thresholds.cpu]
            threshold = 75.0
            cooldown_secs = 60

            [thresholds.disk]
            enabled = false
            threshold = 95.0
            cooldown_secs = 3600
            "#,
        )
        .unwrap();

        assert_eq!(config.thresholds.cpu.threshold, 75.0);
        assert_eq!(config.thresholds.cpu.duration_secs, None);
        assert!(!config.thresholds.disk.enabled);
        assert_eq!(config.thresholds.disk.mount_point, "/");
        assert_eq!(config.thresholds.disk.limits.threshold, 95.0);
        // Sections left out fall back to defaults
        assert_eq!(config.thresholds.memory.threshold, 80.0);
        assert!(config.email.is_none());
    }

    #[test]
    fn test_partial_http_section() {
        let config: Config = toml::from_str(
            r#"
            [thresholds.http]
            url = "https://example.com/status"
            sample_rate = 5
            "#,
        )
        .unwrap();

        let http = &config.thresholds.http;
        assert_eq!(http.url, "https://example.com/status");
        assert_eq!(http.sample_rate, 5);
        assert_eq!(http.failure_threshold, 20.0);
        assert_eq!(http.check_interval(), Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(0)), "0s");
        assert_eq!(format_duration(Duration::from_secs(5)), "5s");
        assert_eq!(format_duration(Duration::from_secs(1800)), "30m");
        assert_eq!(format_duration(Duration::from_secs(4 * 3600)), "4h");
        assert_eq!(format_duration(Duration::from_secs(5430)), "1h30m30s");
    }
}
