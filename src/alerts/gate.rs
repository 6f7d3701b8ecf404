//! Cooldown gate
//!
//! Decides whether a breach may produce a new alert. The gate is Armed until
//! it lets an alert through, then Suppressed until `now >= deadline`. The
//! deadline is fixed when the alert fires: breaches seen while Suppressed
//! neither notify nor move it.

use std::time::{Duration, Instant};

/// Per-monitor alert bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorState {
    /// When the last alert was let through
    pub last_alert_at: Option<Instant>,
    /// End of the current suppression window
    pub cooldown_active_until: Option<Instant>,
}

/// Gate state at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// The next breach alerts
    Armed,
    /// Breaches are ignored until the deadline
    Suppressed { until: Instant },
}

/// Non-refreshing cooldown state machine
#[derive(Debug, Clone)]
pub struct CooldownGate {
    cooldown: Duration,
    state: MonitorState,
}

impl CooldownGate {
    /// Create an Armed gate
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            state: MonitorState::default(),
        }
    }

    /// Configured suppression window
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Snapshot of the bookkeeping
    pub fn monitor_state(&self) -> MonitorState {
        self.state
    }

    /// Gate state as seen at `now`
    pub fn state_at(&self, now: Instant) -> GateState {
        match self.state.cooldown_active_until {
            Some(until) if now < until => GateState::Suppressed { until },
            _ => GateState::Armed,
        }
    }

    /// Report a breach at `now`.
    ///
    /// Returns `true` when the gate was Armed; the gate is then Suppressed
    /// until `now + cooldown` and the caller must notify. Returns `false`
    /// without touching any state while Suppressed.
    pub fn try_fire(&mut self, now: Instant) -> bool {
        if let GateState::Suppressed { .. } = self.state_at(now) {
            return false;
        }

        self.state.last_alert_at = Some(now);
        self.state.cooldown_active_until = Some(saturating_deadline(now, self.cooldown));
        true
    }
}

/// `now + cooldown`, or the latest representable instant before it
fn saturating_deadline(now: Instant, cooldown: Duration) -> Instant {
    let mut step = cooldown;
    let mut deadline = now;
    while !step.is_zero() {
        match deadline.checked_add(step) {
            Some(later) => deadline = later,
            None => step /= 2,
        }
        if deadline.checked_duration_since(now) == Some(cooldown) {
            break;
        }
    }
    deadline
}
