//! Mock implementations for testing
//!
//! Provides scripted host readings, HTTP probes, notifiers and a virtual
//! clock so monitors can be exercised without a real OS or network.

use crate::alerts::{MetricKind, Notifier};
use crate::clock::{CancelToken, Clock};
use crate::error::{NotifyError, SampleError};
use crate::metrics::{HostMetrics, HttpProbe, MetricSource, ProbeOutcome};

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Mock host with fixed readings
#[derive(Debug, Clone)]
pub struct MockHost {
    cpu: Result<Vec<f64>, SampleError>,
    memory: Result<f64, SampleError>,
    disks: HashMap<String, f64>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHost {
    /// Idle host: 4 cores at 10%, 40% memory, no mounts
    pub fn new() -> Self {
        Self {
            cpu: Ok(vec![10.0; 4]),
            memory: Ok(40.0),
            disks: HashMap::new(),
        }
    }

    /// Builder: set per-core CPU readings
    pub fn with_cpu(mut self, cores: Vec<f64>) -> Self {
        self.cpu = Ok(cores);
        self
    }

    /// Builder: make CPU sampling fail
    pub fn with_cpu_error(mut self, err: SampleError) -> Self {
        self.cpu = Err(err);
        self
    }

    /// Builder: set memory usage
    pub fn with_memory(mut self, percent: f64) -> Self {
        self.memory = Ok(percent);
        self
    }

    /// Builder: add a mount point
    pub fn with_disk(mut self, mount_point: impl Into<String>, percent: f64) -> Self {
        self.disks.insert(mount_point.into(), percent);
        self
    }
}

impl HostMetrics for MockHost {
    fn cpu_per_core(&mut self) -> Result<Vec<f64>, SampleError> {
        self.cpu.clone()
    }

    fn memory_used_percent(&mut self) -> Result<f64, SampleError> {
        self.memory.clone()
    }

    fn disk_used_percent(&mut self, mount_point: &str) -> Result<f64, SampleError> {
        self.disks
            .get(mount_point)
            .copied()
            .ok_or_else(|| SampleError::MountNotFound(mount_point.to_string()))
    }
}

/// Mock probe cycling through a fixed list of outcomes
#[derive(Debug)]
pub struct MockProbe {
    url: String,
    outcomes: Vec<ProbeOutcome>,
    calls: AtomicUsize,
}

impl MockProbe {
    /// Probe replaying `outcomes` in order, wrapping around
    pub fn new(outcomes: Vec<ProbeOutcome>) -> Self {
        assert!(!outcomes.is_empty(), "MockProbe needs at least one outcome");
        Self {
            url: "http://mock.local/health".to_string(),
            outcomes,
            calls: AtomicUsize::new(0),
        }
    }

    /// Every probe answers 200
    pub fn always_ok() -> Self {
        Self::new(vec![ProbeOutcome::Success(200)])
    }

    /// Each run of `burst` probes contains `failures` failed ones
    pub fn with_failures_per_burst(burst: usize, failures: usize) -> Self {
        let outcomes = (0..burst)
            .map(|i| {
                if i < failures {
                    ProbeOutcome::ErrorStatus(503)
                } else {
                    ProbeOutcome::Success(200)
                }
            })
            .collect();
        Self::new(outcomes)
    }

    /// Number of probes issued so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HttpProbe for MockProbe {
    fn probe(&self) -> ProbeOutcome {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes[n % self.outcomes.len()].clone()
    }

    fn url(&self) -> &str {
        &self.url
    }
}

/// Source replaying a fixed list of decision values
///
/// Once the script runs out every measurement fails; if a token was attached
/// it is cancelled first so a running monitor stops.
#[derive(Debug)]
pub struct ScriptedSource {
    kind: MetricKind,
    readings: VecDeque<Result<f64, SampleError>>,
    cancel_when_done: Option<CancelToken>,
}

impl ScriptedSource {
    pub fn new(kind: MetricKind, readings: Vec<Result<f64, SampleError>>) -> Self {
        Self {
            kind,
            readings: readings.into(),
            cancel_when_done: None,
        }
    }

    /// Script made only of successful readings
    pub fn values(kind: MetricKind, values: &[f64]) -> Self {
        Self::new(kind, values.iter().map(|v| Ok(*v)).collect())
    }

    /// Builder: cancel `token` when the script is exhausted
    pub fn cancel_when_done(mut self, token: CancelToken) -> Self {
        self.cancel_when_done = Some(token);
        self
    }
}

impl MetricSource for ScriptedSource {
    fn kind(&self) -> MetricKind {
        self.kind
    }

    fn measure(&mut self) -> Result<f64, SampleError> {
        match self.readings.pop_front() {
            Some(reading) => reading,
            None => {
                if let Some(token) = &self.cancel_when_done {
                    token.cancel();
                }
                Err(SampleError::Query("script exhausted".to_string()))
            }
        }
    }
}

/// Notifier that records every message
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifier that records attempts but reports every send as failed
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Recorded `(subject, body)` pairs
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of send attempts
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push((subject.to_string(), body.to_string()));

        if self.fail {
            return Err(NotifyError::Build("recording notifier set to fail".to_string()));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Virtual clock; `sleep` advances time instantly
///
/// Clones share the same time line.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }

    fn sleep(&self, duration: Duration, cancel: &CancelToken) -> bool {
        if cancel.is_cancelled() {
            return false;
        }
        self.advance(duration);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_host_defaults() {
        let mut host = MockHost::new();
        assert_eq!(host.cpu_per_core().unwrap().len(), 4);
        assert_eq!(host.memory_used_percent().unwrap(), 40.0);
        assert!(host.disk_used_percent("/").is_err());
    }

    #[test]
    fn test_mock_probe_wraps_around() {
        let probe = MockProbe::with_failures_per_burst(3, 1);
        let outcomes: Vec<bool> = (0..6).map(|_| probe.probe().is_failure()).collect();
        assert_eq!(outcomes, vec![true, false, false, true, false, false]);
        assert_eq!(probe.calls(), 6);
    }

    #[test]
    fn test_scripted_source_cancels_when_exhausted() {
        let token = CancelToken::new();
        let mut source =
            ScriptedSource::values(MetricKind::Memory, &[50.0]).cancel_when_done(token.clone());

        assert_eq!(source.measure().unwrap(), 50.0);
        assert!(!token.is_cancelled());
        assert!(source.measure().is_err());
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_manual_clock_sleep() {
        let clock = ManualClock::new();
        let start = clock.now();
        let token = CancelToken::new();

        assert!(clock.sleep(Duration::from_secs(60), &token));
        assert_eq!(clock.now() - start, Duration::from_secs(60));

        token.cancel();
        assert!(!clock.sleep(Duration::from_secs(60), &token));
        assert_eq!(clock.now() - start, Duration::from_secs(60));
    }

    #[test]
    fn test_recording_notifier_failing() {
        let notifier = RecordingNotifier::failing();
        assert!(notifier.send("s", "b").is_err());
        assert_eq!(notifier.count(), 1);
    }
}
