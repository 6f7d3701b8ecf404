//! Monitor supervisor
//!
//! Starts one named OS thread per enabled monitor and stops them all through a
//! shared [`CancelToken`].

use super::monitor::{Monitor, MonitorSpec};
use crate::alerts::{MetricKind, Notifier};
use crate::clock::{CancelToken, Clock, SystemClock};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::metrics::{
    CpuLoad, DiskUsage, HttpFailureRate, MemoryUsage, MetricSource, ReqwestProbe, SysinfoHost,
};

use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Build the live metric source for one monitor.
///
/// Every source gets its own host handle; nothing is shared between threads.
/// An HTTP burst stops between probes once `cancel` fires.
pub fn build_source(
    spec: &MonitorSpec,
    config: &Config,
    cancel: &CancelToken,
) -> Result<Box<dyn MetricSource>> {
    let source: Box<dyn MetricSource> = match spec.kind {
        MetricKind::Cpu => Box::new(CpuLoad::new(SysinfoHost::new())),
        MetricKind::Memory => Box::new(MemoryUsage::new(SysinfoHost::new())),
        MetricKind::Disk => Box::new(DiskUsage::new(
            SysinfoHost::new(),
            config.thresholds.disk.mount_point.clone(),
        )),
        MetricKind::Http => {
            let http = &config.thresholds.http;
            let probe = ReqwestProbe::new(http.url.clone(), http.timeout())?;
            Box::new(HttpFailureRate::new(probe, http.sample_rate).with_cancel(cancel.clone()))
        }
    };
    Ok(source)
}

/// Owner of the running monitor threads
pub struct Supervisor {
    cancel: CancelToken,
    handles: Vec<(MetricKind, JoinHandle<()>)>,
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Supervisor {
    /// Create a supervisor with no monitors running
    pub fn new() -> Self {
        Self {
            cancel: CancelToken::new(),
            handles: Vec::new(),
        }
    }

    /// Start every monitor enabled in `config` on the system clock
    pub fn start(config: &Config, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let mut supervisor = Self::new();

        for spec in MonitorSpec::enabled(config) {
            let source = match build_source(&spec, config, &supervisor.cancel) {
                Ok(source) => source,
                Err(e) => {
                    supervisor.shutdown();
                    return Err(e);
                }
            };
            let monitor = Monitor::new(spec, source, Arc::clone(&notifier), SystemClock);
            if let Err(e) = supervisor.spawn(monitor) {
                supervisor.shutdown();
                return Err(e);
            }
        }

        Ok(supervisor)
    }

    /// Run `monitor` on its own thread
    pub fn spawn<S, C>(&mut self, mut monitor: Monitor<S, C>) -> Result<()>
    where
        S: MetricSource + 'static,
        C: Clock + 'static,
    {
        let kind = monitor.spec().kind;
        let cancel = self.cancel.clone();

        let handle = thread::Builder::new()
            .name(format!("servmon-{}", kind))
            .spawn(move || monitor.run(&cancel))
            .map_err(|e| AppError::MonitorSpawn(kind.to_string(), e))?;

        self.handles.push((kind, handle));
        Ok(())
    }

    /// Handle that stops every monitor when cancelled
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Number of monitor threads started
    pub fn running(&self) -> usize {
        self.handles.len()
    }

    /// Block until the token fires, then join every monitor
    pub fn wait(self) {
        self.cancel.wait();
        self.join();
    }

    /// Cancel and join every monitor
    pub fn shutdown(self) {
        self.cancel.cancel();
        self.join();
    }

    fn join(self) {
        for (kind, handle) in self.handles {
            if handle.join().is_err() {
                log::error!("{} monitor panicked", kind);
            }
        }
        log::info!("All monitors stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{ManualClock, RecordingNotifier, ScriptedSource};
    use std::time::Duration;

    fn spec(kind: MetricKind) -> MonitorSpec {
        MonitorSpec {
            kind,
            target: None,
            threshold: 50.0,
            cooldown: Duration::from_secs(600),
            interval: Duration::from_secs(1),
            duration: None,
        }
    }

    #[test]
    fn test_monitors_run_until_cancelled() {
        let mut supervisor = Supervisor::new();
        let notifier = Arc::new(RecordingNotifier::new());

        for kind in [MetricKind::Cpu, MetricKind::Memory] {
            let source = ScriptedSource::values(kind, &[75.0, 80.0]);
            let monitor = Monitor::new(spec(kind), source, notifier.clone(), ManualClock::new());
            supervisor.spawn(monitor).unwrap();
        }
        assert_eq!(supervisor.running(), 2);

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while notifier.count() < 2 && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        supervisor.shutdown();

        // One alert per monitor; the second breach falls inside the cooldown.
        let mut subjects: Vec<String> = notifier.sent().into_iter().map(|(s, _)| s).collect();
        subjects.sort();
        assert_eq!(
            subjects,
            vec!["CPU Usage Alert: 75.00%", "Memory Usage Alert: 75.00%"]
        );
    }

    #[test]
    fn test_wait_returns_once_cancelled() {
        let mut supervisor = Supervisor::new();
        let notifier = Arc::new(RecordingNotifier::new());

        let source = ScriptedSource::values(MetricKind::Cpu, &[10.0])
            .cancel_when_done(supervisor.cancel_token());
        supervisor
            .spawn(Monitor::new(
                spec(MetricKind::Cpu),
                source,
                notifier.clone(),
                ManualClock::new(),
            ))
            .unwrap();

        supervisor.wait();
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn test_shutdown_interrupts_waiting_monitor() {
        let mut supervisor = Supervisor::new();
        let notifier = Arc::new(RecordingNotifier::new());

        let mut slow = spec(MetricKind::Disk);
        slow.interval = Duration::from_secs(3600);
        let source = ScriptedSource::values(MetricKind::Disk, &[99.0]);
        supervisor
            .spawn(Monitor::new(slow, source, notifier.clone(), SystemClock))
            .unwrap();

        let start = std::time::Instant::now();
        supervisor.shutdown();
        assert!(start.elapsed() < Duration::from_secs(5));
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn test_build_source_kinds() {
        let config = Config::default();
        for spec in MonitorSpec::enabled(&config) {
            let source = build_source(&spec, &config, &CancelToken::new()).unwrap();
            assert_eq!(source.kind(), spec.kind);
        }
    }
}
