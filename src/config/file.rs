//! Configuration file loading
//!
//! Handles loading and writing configuration as TOML files.

use crate::config::{Config, EmailConfig};
use crate::error::ConfigError;

use std::path::{Path, PathBuf};

/// Configuration file handler
pub struct ConfigFile;

impl ConfigFile {
    /// Load and validate configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let config: Config = toml::from_str(&content)?;
        config.validate()?;

        for (name, duration) in [
            ("cpu", config.thresholds.cpu.duration_secs),
            ("memory", config.thresholds.memory.duration_secs),
            ("disk", config.thresholds.disk.limits.duration_secs),
        ] {
            if duration.is_some() {
                log::debug!(
                    "thresholds.{}.duration_secs is set but sustained breaches are not enforced",
                    name
                );
            }
        }

        Ok(config)
    }

    /// Write configuration to a file, creating parent directories.
    ///
    /// Refuses to replace an existing file unless `overwrite` is set.
    pub fn save<P: AsRef<Path>>(config: &Config, path: P, overwrite: bool) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if path.exists() && !overwrite {
            return Err(ConfigError::AlreadyExists(path.display().to_string()));
        }

        let contents = toml::to_string_pretty(config)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ConfigError::Write(format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
        }
        std::fs::write(path, contents).map_err(|e| {
            ConfigError::Write(format!("cannot write {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Configuration written on first run, email section included
    pub fn template() -> Config {
        Config {
            email: Some(EmailConfig::default()),
            ..Config::default()
        }
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("servmon").join("config.toml")
        } else {
            PathBuf::from("servmon.toml")
        }
    }

    /// Resolve an optional CLI path to the file that should be used
    pub fn resolve(path: Option<&str>) -> PathBuf {
        path.map(PathBuf::from).unwrap_or_else(Self::default_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file() {
        let result = ConfigFile::load("/nonexistent/path/config.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_template_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let template = ConfigFile::template();
        ConfigFile::save(&template, &path, false).unwrap();

        let loaded = ConfigFile::load(&path).unwrap();
        assert_eq!(loaded, template);
        assert_eq!(loaded.email.unwrap().smtp_server, "smtp.example.com");
    }

    #[test]
    fn test_save_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        ConfigFile::save(&Config::default(), &path, false).unwrap();
        let err = ConfigFile::save(&Config::default(), &path, false).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));

        assert!(ConfigFile::save(&Config::default(), &path, true).is_ok());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [thresholds.http]
            url = "http://localhost:8080/health"
            timeout_secs = 5
            sample_rate = 0
            failure_threshold = 20.0
            check_interval_secs = 60
            cooldown_secs = 900
            "#,
        )
        .unwrap();

        let err = ConfigFile::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[thresholds.cpu\nthreshold = ").unwrap();

        assert!(matches!(
            ConfigFile::load(&path),
            Err(ConfigError::TomlError(_))
        ));
    }

    #[test]
    fn test_resolve_prefers_explicit_path() {
        assert_eq!(
            ConfigFile::resolve(Some("/tmp/servmon.toml")),
            PathBuf::from("/tmp/servmon.toml")
        );
        assert_eq!(ConfigFile::resolve(None), ConfigFile::default_path());
    }
}
