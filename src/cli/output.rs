//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::alerts::MetricKind;
use crate::cli::args::OutputFormat;
use crate::config::format_duration;
use crate::services::MonitorSpec;
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// One effective monitor, as shown by `check`
#[derive(Debug, Clone, Serialize)]
pub struct MonitorSummary {
    pub metric: MetricKind,
    pub target: Option<String>,
    pub threshold: f64,
    pub interval_secs: u64,
    pub cooldown_secs: u64,
    /// Set in the config file but not enforced
    pub duration_secs: Option<u64>,
}

impl From<&MonitorSpec> for MonitorSummary {
    fn from(spec: &MonitorSpec) -> Self {
        Self {
            metric: spec.kind,
            target: spec.target.clone(),
            threshold: spec.threshold,
            interval_secs: spec.interval.as_secs(),
            cooldown_secs: spec.cooldown.as_secs(),
            duration_secs: spec.duration.map(|d| d.as_secs()),
        }
    }
}

impl TableDisplay for MonitorSummary {
    fn to_table(&self) -> String {
        let mut line = format!("{:<7}", self.metric.to_string());
        if let Some(target) = &self.target {
            line.push_str(&format!(" {}", target));
        }
        line.push_str(&format!(
            "\n  threshold > {:.2}%, every {}, cooldown {}",
            self.threshold,
            format_duration(std::time::Duration::from_secs(self.interval_secs)),
            format_duration(std::time::Duration::from_secs(self.cooldown_secs)),
        ));
        if let Some(secs) = self.duration_secs {
            line.push_str(&format!(
                "\n  duration {} (not enforced)",
                format_duration(std::time::Duration::from_secs(secs))
            ));
        }
        line
    }

    fn to_compact(&self) -> String {
        format!("{}>{:.2}", self.metric, self.threshold)
    }
}

/// Result of `check`
#[derive(Debug, Clone, Serialize)]
pub struct ConfigReport {
    pub path: String,
    pub notifier: String,
    pub monitors: Vec<MonitorSummary>,
}

impl TableDisplay for ConfigReport {
    fn to_table(&self) -> String {
        let mut output = format!("Config: {}\n", self.path);
        output.push_str(&format!("Notifier: {}\n", self.notifier));
        output.push_str(&format!("Monitors: {}\n\n", self.monitors.len()));

        for monitor in &self.monitors {
            output.push_str(&monitor.to_table());
            output.push('\n');
        }

        output
    }

    fn to_compact(&self) -> String {
        let monitors = self
            .monitors
            .iter()
            .map(|m| m.to_compact())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} [{}] {}", self.path, self.notifier, monitors)
    }
}

/// One reading taken by `sample`
#[derive(Debug, Clone, Serialize)]
pub struct SampleEntry {
    pub metric: MetricKind,
    pub target: Option<String>,
    pub value: Option<f64>,
    pub threshold: f64,
    pub breached: bool,
    pub error: Option<String>,
}

impl TableDisplay for SampleEntry {
    fn to_table(&self) -> String {
        let name = match &self.target {
            Some(target) => format!("{} ({})", self.metric, target),
            None => self.metric.to_string(),
        };

        match (self.value, &self.error) {
            (Some(value), _) => format!(
                "{:<7} {:>7.2}%  threshold {:.2}%  {}",
                name,
                value,
                self.threshold,
                if self.breached { "BREACH" } else { "ok" }
            ),
            (None, Some(err)) => format!("{:<7} error: {}", name, err),
            (None, None) => format!("{:<7} no reading", name),
        }
    }

    fn to_compact(&self) -> String {
        match self.value {
            Some(value) => format!("{}:{:.2}", self.metric, value),
            None => format!("{}:err", self.metric),
        }
    }
}

/// Result of `sample`
#[derive(Debug, Clone, Serialize)]
pub struct SampleReport {
    pub samples: Vec<SampleEntry>,
}

impl TableDisplay for SampleReport {
    fn to_table(&self) -> String {
        self.samples
            .iter()
            .map(|s| s.to_table())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_compact(&self) -> String {
        self.samples
            .iter()
            .map(|s| s.to_compact())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Simple message output
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
    pub success: bool,
}

impl TableDisplay for Message {
    fn to_table(&self) -> String {
        if self.success {
            format!("✓ {}", self.message)
        } else {
            format!("✗ {}", self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_monitor_summary_marks_unenforced_duration() {
        let spec = MonitorSpec {
            kind: MetricKind::Cpu,
            target: None,
            threshold: 90.0,
            cooldown: Duration::from_secs(1800),
            interval: Duration::from_secs(1),
            duration: Some(Duration::from_secs(300)),
        };

        let output = MonitorSummary::from(&spec).to_table();
        assert!(output.contains("threshold > 90.00%"));
        assert!(output.contains("cooldown 30m"));
        assert!(output.contains("duration 5m (not enforced)"));
    }

    #[test]
    fn test_sample_entry_display() {
        let entry = SampleEntry {
            metric: MetricKind::Memory,
            target: None,
            value: Some(85.5),
            threshold: 80.0,
            breached: true,
            error: None,
        };
        assert!(entry.to_table().contains("BREACH"));
        assert_eq!(entry.to_compact(), "memory:85.50");

        let failed = SampleEntry {
            metric: MetricKind::Disk,
            target: Some("/data".to_string()),
            value: None,
            threshold: 90.0,
            breached: false,
            error: Some("Mount point not found: /data".to_string()),
        };
        assert!(failed.to_table().contains("error: Mount point not found"));
        assert_eq!(failed.to_compact(), "disk:err");
    }

    #[test]
    fn test_sample_entry_json() {
        let entry = SampleEntry {
            metric: MetricKind::Http,
            target: Some("http://localhost:8080/health".to_string()),
            value: Some(30.0),
            threshold: 20.0,
            breached: true,
            error: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["metric"], "http");
        assert_eq!(json["breached"], true);
    }

    #[test]
    fn test_message_display() {
        let msg = Message {
            message: "Operation completed".to_string(),
            success: true,
        };

        assert!(msg.to_table().starts_with('✓'));
    }
}
