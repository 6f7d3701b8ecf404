//! Service layer for the monitoring loop
//!
//! Services hold the per-metric monitor loop and the supervisor that runs
//! the monitors on their own threads.

pub mod monitor;
pub mod supervisor;

pub use monitor::{CycleOutcome, Monitor, MonitorSpec, HOST_INTERVAL};
pub use supervisor::{build_source, Supervisor};
