//! Metric sources
//!
//! A [`MetricSource`] turns raw readings into the single decision value a
//! monitor compares with its threshold:
//!
//! - CPU: mean of the per-core percentages
//! - memory and disk: the used percentage as read
//! - HTTP: percentage of failed probes out of `sample_rate` sequential probes

use super::traits::{HostMetrics, HttpProbe};
use crate::alerts::MetricKind;
use crate::clock::CancelToken;
use crate::error::SampleError;

/// One metric's sampler plus evaluator
pub trait MetricSource: Send {
    /// Metric produced by this source
    fn kind(&self) -> MetricKind;

    /// What is measured, when the kind alone does not say (mount point, URL)
    fn target(&self) -> Option<&str> {
        None
    }

    /// Take one reading and reduce it to the decision value
    fn measure(&mut self) -> Result<f64, SampleError>;
}

impl<S: MetricSource + ?Sized> MetricSource for Box<S> {
    fn kind(&self) -> MetricKind {
        (**self).kind()
    }

    fn target(&self) -> Option<&str> {
        (**self).target()
    }

    fn measure(&mut self) -> Result<f64, SampleError> {
        (**self).measure()
    }
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Failed share of `samples` probes, in percent.
///
/// `samples` is validated to be non-zero at config load; zero yields 0.
pub fn failure_rate(failures: u32, samples: u32) -> f64 {
    if samples == 0 {
        return 0.0;
    }
    f64::from(failures) / f64::from(samples) * 100.0
}

/// Mean CPU utilization across cores
pub struct CpuLoad<H> {
    host: H,
}

impl<H: HostMetrics> CpuLoad<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }
}

impl<H: HostMetrics> MetricSource for CpuLoad<H> {
    fn kind(&self) -> MetricKind {
        MetricKind::Cpu
    }

    fn measure(&mut self) -> Result<f64, SampleError> {
        let cores = self.host.cpu_per_core()?;
        mean(&cores).ok_or(SampleError::NoCpus)
    }
}

/// Used physical memory
pub struct MemoryUsage<H> {
    host: H,
}

impl<H: HostMetrics> MemoryUsage<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }
}

impl<H: HostMetrics> MetricSource for MemoryUsage<H> {
    fn kind(&self) -> MetricKind {
        MetricKind::Memory
    }

    fn measure(&mut self) -> Result<f64, SampleError> {
        self.host.memory_used_percent()
    }
}

/// Used space on one mount point
pub struct DiskUsage<H> {
    host: H,
    mount_point: String,
}

impl<H: HostMetrics> DiskUsage<H> {
    pub fn new(host: H, mount_point: impl Into<String>) -> Self {
        Self {
            host,
            mount_point: mount_point.into(),
        }
    }
}

impl<H: HostMetrics> MetricSource for DiskUsage<H> {
    fn kind(&self) -> MetricKind {
        MetricKind::Disk
    }

    fn target(&self) -> Option<&str> {
        Some(&self.mount_point)
    }

    fn measure(&mut self) -> Result<f64, SampleError> {
        self.host.disk_used_percent(&self.mount_point)
    }
}

/// Failure rate over a burst of sequential HTTP probes
pub struct HttpFailureRate<P> {
    probe: P,
    sample_rate: u32,
    cancel: Option<CancelToken>,
}

impl<P: HttpProbe> HttpFailureRate<P> {
    pub fn new(probe: P, sample_rate: u32) -> Self {
        Self {
            probe,
            sample_rate,
            cancel: None,
        }
    }

    /// Builder: abandon a burst between probes once `cancel` fires
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Run one burst and count failed probes
    pub fn count_failures(&self) -> Result<u32, SampleError> {
        let mut failures = 0;
        for attempt in 1..=self.sample_rate {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                return Err(SampleError::Interrupted);
            }

            let outcome = self.probe.probe();
            if outcome.is_failure() {
                log::debug!(
                    "HTTP probe {}/{} against {} failed: {:?}",
                    attempt,
                    self.sample_rate,
                    self.probe.url(),
                    outcome
                );
                failures += 1;
            }
        }
        Ok(failures)
    }
}

impl<P: HttpProbe> MetricSource for HttpFailureRate<P> {
    fn kind(&self) -> MetricKind {
        MetricKind::Http
    }

    fn target(&self) -> Option<&str> {
        Some(self.probe.url())
    }

    fn measure(&mut self) -> Result<f64, SampleError> {
        let failures = self.count_failures()?;
        Ok(failure_rate(failures, self.sample_rate))
    }
}
