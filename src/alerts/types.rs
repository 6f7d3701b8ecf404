//! Alert system domain types
//!
//! Defines the metric kinds, the breach rule, and the alert payload handed to
//! notifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Metric watched by a monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Mean utilization across all CPU cores
    Cpu,
    /// Used share of physical memory
    Memory,
    /// Used share of one mounted volume
    Disk,
    /// Share of failed probes against an HTTP endpoint
    Http,
}

impl MetricKind {
    /// All kinds in start-up order
    pub const ALL: [MetricKind; 4] = [Self::Cpu, Self::Memory, Self::Disk, Self::Http];

    /// Title used in alert subjects
    pub fn title(&self) -> &'static str {
        match self {
            Self::Cpu => "CPU Usage",
            Self::Memory => "Memory Usage",
            Self::Disk => "Disk Usage",
            Self::Http => "HTTP Failure",
        }
    }

    /// Noun phrase used in alert bodies and log lines
    pub fn measure_name(&self) -> &'static str {
        match self {
            Self::Cpu => "CPU usage",
            Self::Memory => "memory usage",
            Self::Disk => "disk usage",
            Self::Http => "HTTP failure rate",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Memory => write!(f, "memory"),
            Self::Disk => write!(f, "disk"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// A decision value breaches only when strictly above its threshold
pub fn is_breach(value: f64, threshold: f64) -> bool {
    value > threshold
}

/// Alert payload handed to a notifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertEvent {
    pub subject: String,
    pub body: String,
}

impl AlertEvent {
    /// Build the alert for a breached metric.
    ///
    /// `target` names what was measured when the kind alone is ambiguous
    /// (a mount point or a URL).
    pub fn breach(kind: MetricKind, target: Option<&str>, value: f64, threshold: f64) -> Self {
        let subject = format!("{} Alert: {:.2}%", kind.title(), value);

        let mut measure = capitalize(kind.measure_name());
        if let Some(target) = target {
            let preposition = if kind == MetricKind::Http { "for" } else { "on" };
            measure = format!("{} {} {}", measure, preposition, target);
        }

        let body = format!(
            "{} of {:.2}% has exceeded the threshold of {:.2}%",
            measure, value, threshold
        );

        Self { subject, body }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breach_is_strict() {
        assert!(is_breach(90.01, 90.0));
        assert!(!is_breach(90.0, 90.0));
        assert!(!is_breach(79.0, 80.0));
    }

    #[test]
    fn test_cpu_alert_text() {
        let event = AlertEvent::breach(MetricKind::Cpu, None, 95.0, 90.0);
        assert_eq!(event.subject, "CPU Usage Alert: 95.00%");
        assert_eq!(
            event.body,
            "CPU usage of 95.00% has exceeded the threshold of 90.00%"
        );
    }

    #[test]
    fn test_disk_alert_names_mount_point() {
        let event = AlertEvent::breach(MetricKind::Disk, Some("/var"), 93.456, 90.0);
        assert_eq!(event.subject, "Disk Usage Alert: 93.46%");
        assert_eq!(
            event.body,
            "Disk usage on /var of 93.46% has exceeded the threshold of 90.00%"
        );
    }

    #[test]
    fn test_http_alert_names_url() {
        let event = AlertEvent::breach(
            MetricKind::Http,
            Some("http://localhost:8080/health"),
            30.0,
            20.0,
        );
        assert_eq!(event.subject, "HTTP Failure Alert: 30.00%");
        assert!(event.body.starts_with("HTTP failure rate for http://localhost:8080/health"));
    }

    #[test]
    fn test_kind_display() {
        let names: Vec<String> = MetricKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(names, ["cpu", "memory", "disk", "http"]);
    }
}
