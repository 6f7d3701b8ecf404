//! Metric sampling layer
//!
//! Provides trait-based abstractions over the host and the network for
//! testability, and the per-metric sources the monitors evaluate.

pub mod host;
pub mod http;
pub mod source;
pub mod traits;

pub use host::SysinfoHost;
pub use http::ReqwestProbe;
pub use source::{failure_rate, mean, CpuLoad, DiskUsage, HttpFailureRate, MemoryUsage, MetricSource};
pub use traits::{HostMetrics, HttpProbe, ProbeOutcome};
