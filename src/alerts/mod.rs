//! Alert system
//!
//! Breach rule, cooldown gating, and notification channels.

mod email;
mod gate;
mod notifier;
mod types;

pub use email::{EmailNotifier, SUBJECT_PREFIX};
pub use gate::{CooldownGate, GateState, MonitorState};
pub use notifier::{Notifier, TerminalNotifier};
pub use types::{is_breach, AlertEvent, MetricKind};
