//! servmon - host resource and HTTP endpoint monitor
//!
//! This library provides the core of a small alerting daemon: four monitors
//! (CPU, memory, disk, HTTP) that sample on their own threads, compare against
//! thresholds, and notify through a cooldown gate.
//!
//! # Modules
//!
//! - [`alerts`]: Breach rule, cooldown gate, and notifiers
//! - [`cli`]: Command-line interface definitions
//! - [`clock`]: Time source and cancellation
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`error`]: Error types
//! - [`metrics`]: Host and HTTP sampling layer
//! - [`services`]: Monitor loop and supervisor

pub mod alerts;
pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod metrics;
pub mod services;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{AppError, Result};
