//! sysinfo-backed host readings

use super::traits::HostMetrics;
use crate::error::SampleError;

use std::path::Path;
use std::time::Duration;
use sysinfo::{CpuRefreshKind, Disks, MemoryRefreshKind, RefreshKind, System};

/// Length of the CPU measurement window
pub const CPU_WINDOW: Duration = Duration::from_secs(1);

/// Host readings through the `sysinfo` crate
///
/// Each monitor owns its own instance; nothing is shared between threads.
pub struct SysinfoHost {
    system: System,
    /// Loaded on first disk query
    disks: Option<Disks>,
}

impl Default for SysinfoHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoHost {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
            .with_memory(MemoryRefreshKind::nothing().with_ram());

        Self {
            system: System::new_with_specifics(refresh_kind),
            disks: None,
        }
    }
}

impl HostMetrics for SysinfoHost {
    fn cpu_per_core(&mut self) -> Result<Vec<f64>, SampleError> {
        // Usage is computed from the delta between two refreshes.
        self.system.refresh_cpu_usage();
        std::thread::sleep(CPU_WINDOW.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
        self.system.refresh_cpu_usage();

        let cores: Vec<f64> = self
            .system
            .cpus()
            .iter()
            .map(|cpu| f64::from(cpu.cpu_usage()))
            .collect();

        if cores.is_empty() {
            return Err(SampleError::NoCpus);
        }
        Ok(cores)
    }

    fn memory_used_percent(&mut self) -> Result<f64, SampleError> {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        if total == 0 {
            return Err(SampleError::NoMemory);
        }

        let used = self.system.used_memory();
        Ok(used as f64 / total as f64 * 100.0)
    }

    fn disk_used_percent(&mut self, mount_point: &str) -> Result<f64, SampleError> {
        let disks = self.disks.get_or_insert_with(Disks::new_with_refreshed_list);
        disks.refresh(true);

        let disk = disks
            .list()
            .iter()
            .find(|d| d.mount_point() == Path::new(mount_point))
            .ok_or_else(|| SampleError::MountNotFound(mount_point.to_string()))?;

        let total = disk.total_space();
        if total == 0 {
            return Err(SampleError::EmptyVolume(mount_point.to_string()));
        }

        let used = total.saturating_sub(disk.available_space());
        Ok((used as f64 / total as f64 * 100.0).clamp(0.0, 100.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_reading_is_a_percentage() {
        let mut host = SysinfoHost::new();
        if let Ok(percent) = host.memory_used_percent() {
            assert!((0.0..=100.0).contains(&percent));
        }
    }

    #[test]
    fn test_unknown_mount_point() {
        let mut host = SysinfoHost::new();
        let result = host.disk_used_percent("/definitely/not/a/mount/point");
        assert_eq!(
            result,
            Err(SampleError::MountNotFound(
                "/definitely/not/a/mount/point".to_string()
            ))
        );
    }
}
