//! Monitor loop
//!
//! A [`Monitor`] owns one metric source, one cooldown gate and a handle to the
//! shared notifier. Each cycle samples, compares against the threshold, asks
//! the gate, and notifies at most once.

use crate::alerts::{is_breach, AlertEvent, CooldownGate, MetricKind, MonitorState, Notifier};
use crate::clock::{CancelToken, Clock};
use crate::config::{format_duration, Config};
use crate::error::SampleError;
use crate::metrics::MetricSource;

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Wait between host samples (CPU, memory, disk)
pub const HOST_INTERVAL: Duration = Duration::from_secs(1);

/// Effective settings of one monitor
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorSpec {
    pub kind: MetricKind,
    /// Mount point or URL, if any
    pub target: Option<String>,
    pub threshold: f64,
    pub cooldown: Duration,
    pub interval: Duration,
    /// Configured but not enforced
    pub duration: Option<Duration>,
}

impl MonitorSpec {
    /// Monitors enabled by `config`, in a fixed order
    pub fn enabled(config: &Config) -> Vec<MonitorSpec> {
        let t = &config.thresholds;
        let mut specs = vec![
            MonitorSpec {
                kind: MetricKind::Cpu,
                target: None,
                threshold: t.cpu.threshold,
                cooldown: t.cpu.cooldown(),
                interval: HOST_INTERVAL,
                duration: t.cpu.duration(),
            },
            MonitorSpec {
                kind: MetricKind::Memory,
                target: None,
                threshold: t.memory.threshold,
                cooldown: t.memory.cooldown(),
                interval: HOST_INTERVAL,
                duration: t.memory.duration(),
            },
        ];

        if t.disk.enabled {
            specs.push(MonitorSpec {
                kind: MetricKind::Disk,
                target: Some(t.disk.mount_point.clone()),
                threshold: t.disk.limits.threshold,
                cooldown: t.disk.limits.cooldown(),
                interval: HOST_INTERVAL,
                duration: t.disk.limits.duration(),
            });
        }

        if t.http.enabled {
            specs.push(MonitorSpec {
                kind: MetricKind::Http,
                target: Some(t.http.url.clone()),
                threshold: t.http.failure_threshold,
                cooldown: t.http.cooldown(),
                interval: t.http.check_interval(),
                duration: None,
            });
        }

        specs
    }
}

/// What one cycle did
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CycleOutcome {
    /// No reading this cycle; gate untouched
    SampleFailed,
    /// Reading at or below the threshold
    Clear { value: f64 },
    /// Breach swallowed by the cooldown
    Suppressed { value: f64 },
    /// Breach let through; `delivered` reports the notifier result
    Alerted { value: f64, delivered: bool },
}

/// Sample, evaluate, gate, notify
pub struct Monitor<S, C> {
    spec: MonitorSpec,
    source: S,
    gate: CooldownGate,
    notifier: Arc<dyn Notifier>,
    clock: C,
}

impl<S: MetricSource, C: Clock> Monitor<S, C> {
    /// Create a monitor with an Armed gate
    pub fn new(spec: MonitorSpec, source: S, notifier: Arc<dyn Notifier>, clock: C) -> Self {
        debug_assert_eq!(spec.kind, source.kind());
        let gate = CooldownGate::new(spec.cooldown);
        Self {
            spec,
            source,
            gate,
            notifier,
            clock,
        }
    }

    /// Get the monitor settings
    pub fn spec(&self) -> &MonitorSpec {
        &self.spec
    }

    /// Snapshot of the alert bookkeeping
    pub fn state(&self) -> MonitorState {
        self.gate.monitor_state()
    }

    /// Run one sample/evaluate/gate/notify pass
    pub fn cycle(&mut self) -> CycleOutcome {
        let kind = self.spec.kind;

        let value = match self.source.measure() {
            Ok(value) => value,
            Err(SampleError::Interrupted) => {
                log::debug!("{} sample interrupted by shutdown", kind.measure_name());
                return CycleOutcome::SampleFailed;
            }
            Err(e) => {
                log::warn!("Failed to sample {}: {}", kind.measure_name(), e);
                return CycleOutcome::SampleFailed;
            }
        };

        log::debug!(
            "{} {:.2}% (threshold {:.2}%)",
            kind.measure_name(),
            value,
            self.spec.threshold
        );

        if !is_breach(value, self.spec.threshold) {
            return CycleOutcome::Clear { value };
        }

        if !self.gate.try_fire(self.clock.now()) {
            log::debug!(
                "{} breach at {:.2}% suppressed by cooldown",
                kind.measure_name(),
                value
            );
            return CycleOutcome::Suppressed { value };
        }

        let event = AlertEvent::breach(
            kind,
            self.source.target(),
            value,
            self.spec.threshold,
        );

        let delivered = match self.notifier.send(&event.subject, &event.body) {
            Ok(()) => {
                log::info!("Alert sent via {}: {}", self.notifier.name(), event.subject);
                true
            }
            Err(e) => {
                log::error!("Failed to send {} alert: {}", kind, e);
                false
            }
        };

        CycleOutcome::Alerted { value, delivered }
    }

    /// Loop until `cancel` fires.
    ///
    /// Every iteration waits the interval first, then runs one cycle. The
    /// token is checked at loop top and during the wait; an HTTP source built
    /// with the same token also checks it between probes. A CPU reading
    /// always completes its measurement window.
    pub fn run(&mut self, cancel: &CancelToken) {
        let kind = self.spec.kind;
        let target = match &self.spec.target {
            Some(t) if kind == MetricKind::Http => format!(" for {}", t),
            Some(t) => format!(" on {}", t),
            None => String::new(),
        };

        log::info!(
            "Monitoring {}{} with threshold {:.2}% and cooldown {}",
            kind.measure_name(),
            target,
            self.spec.threshold,
            format_duration(self.spec.cooldown)
        );

        while !cancel.is_cancelled() {
            if !self.clock.sleep(self.spec.interval, cancel) {
                break;
            }
            self.cycle();
        }

        log::info!("Stopped {} monitor", kind);
    }
}
