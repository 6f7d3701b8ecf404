//! Trait definitions for metric sampling
//!
//! These traits abstract over the OS and the network to enable testing with mocks.

use crate::error::SampleError;

/// Trait for host resource readings
///
/// Each call takes one fresh reading. Implementations may block while they
/// measure.
pub trait HostMetrics: Send {
    /// Per-core CPU utilization percentages.
    ///
    /// Blocks for the measurement window (one second for the real host).
    fn cpu_per_core(&mut self) -> Result<Vec<f64>, SampleError>;

    /// Used share of physical memory, in percent
    fn memory_used_percent(&mut self) -> Result<f64, SampleError>;

    /// Used share of the volume mounted at `mount_point`, in percent
    fn disk_used_percent(&mut self, mount_point: &str) -> Result<f64, SampleError>;
}

/// Outcome of a single HTTP probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Response with a status below 400
    Success(u16),
    /// Response with a status of 400 or above
    ErrorStatus(u16),
    /// No response: timeout, connection refused, TLS failure, ...
    Unreachable(String),
}

impl ProbeOutcome {
    /// Whether this probe counts toward the failure rate
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Success(_))
    }
}

/// Trait for a single availability probe
///
/// Probes never fail as such: every error is folded into [`ProbeOutcome`].
pub trait HttpProbe: Send {
    /// Issue one request
    fn probe(&self) -> ProbeOutcome;

    /// Probed URL, for messages
    fn url(&self) -> &str;
}
