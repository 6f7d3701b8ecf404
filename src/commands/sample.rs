//! Sample command implementation
//!
//! Takes one reading of every enabled metric without touching any cooldown.

use super::load_config;
use crate::alerts::is_breach;
use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, SampleEntry, SampleReport};
use crate::clock::CancelToken;
use crate::error::Result;
use crate::metrics::MetricSource;
use crate::services::{build_source, MonitorSpec};

/// Execute the sample command
pub fn run_sample(config_path: Option<&str>, format: OutputFormat) -> Result<()> {
    let (_, config) = load_config(config_path)?;

    let cancel = CancelToken::new();
    let mut samples = Vec::new();
    for spec in MonitorSpec::enabled(&config) {
        let mut source = build_source(&spec, &config, &cancel)?;
        samples.push(sample_one(&spec, &mut source));
    }

    print_output(&SampleReport { samples }, format)?;
    Ok(())
}

fn sample_one<S: MetricSource + ?Sized>(spec: &MonitorSpec, source: &mut S) -> SampleEntry {
    let (value, error) = match source.measure() {
        Ok(value) => (Some(value), None),
        Err(e) => (None, Some(e.to_string())),
    };

    SampleEntry {
        metric: spec.kind,
        target: spec.target.clone(),
        value,
        threshold: spec.threshold,
        breached: value.is_some_and(|v| is_breach(v, spec.threshold)),
        error,
    }
}
