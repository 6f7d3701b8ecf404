//! Unified error types for servmon
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from notification delivery or notifier setup
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// A monitor thread could not be started
    #[error("Failed to start {0} monitor: {1}")]
    MonitorSpawn(String, std::io::Error),

    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Signal handler installation failed
    #[error("Failed to install signal handler: {0}")]
    Signal(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Transient failure while acquiring a metric reading
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SampleError {
    /// The host reported no CPU cores
    #[error("No CPU cores reported by the host")]
    NoCpus,

    /// The host reported zero total memory
    #[error("Host reported zero total memory")]
    NoMemory,

    /// The configured mount point is not mounted
    #[error("Mount point not found: {0}")]
    MountNotFound(String),

    /// The mount point reports zero capacity
    #[error("Mount point {0} reports zero capacity")]
    EmptyVolume(String),

    /// Shutdown was requested while sampling
    #[error("Sampling interrupted by shutdown")]
    Interrupted,

    /// Any other OS query failure
    #[error("Metric query failed: {0}")]
    Query(String),
}

/// Failure while delivering an alert notification
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The sender or recipient address could not be parsed
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled
    #[error("Failed to build email: {0}")]
    Build(String),

    /// SMTP transport failure (connection, TLS, authentication)
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// Terminal output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Config file could not be written
    #[error("Failed to write configuration: {0}")]
    Write(String),

    /// Config file already exists and overwriting was not requested
    #[error("Configuration file already exists: {0} (use --force to overwrite)")]
    AlreadyExists(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl ConfigError {
    /// Shorthand for an [`ConfigError::InvalidValue`]
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
