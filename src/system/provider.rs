use std::time::Duration;

use sysinfo::{Networks, ProcessRefreshKind, ProcessesToUpdate, System};

use super::platform;
use crate::error::{MetricError, MetricResult};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemoryStats {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub used_percent: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    pub device: String,
    pub mountpoint: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UsageStats {
    pub used_percent: f64,
    pub inodes_used_percent: f64,
}

/// One enumerated process. The memory read is fallible per process; a
/// failed read skips that process, it does not fail the enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: u32,
    pub resident_bytes: MetricResult<u64>,
}

/// Cumulative per-interface I/O counters since boot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceCounters {
    pub name: String,
    pub bytes_recv: u64,
    pub bytes_sent: u64,
    pub recv_errors: u64,
    pub send_errors: u64,
}

/// Capability surface the snapshot aggregator samples from.
///
/// The provider is read-only from the host's point of view and safe to call
/// repeatedly; every method is independently fallible.
pub trait MetricsProvider {
    /// Aggregate CPU utilization percentages sampled over `interval`.
    /// Blocks for the full interval.
    fn cpu_percent(&mut self, interval: Duration) -> MetricResult<Vec<f64>>;

    fn physical_core_count(&self) -> MetricResult<usize>;

    fn load_average(&self) -> MetricResult<LoadAverage>;

    fn virtual_memory(&mut self) -> MetricResult<MemoryStats>;

    fn processes(&mut self) -> MetricResult<Vec<ProcessRecord>>;

    /// All mounted partitions, pseudo-filesystems included.
    fn partitions(&self) -> MetricResult<Vec<Partition>>;

    fn usage(&self, mountpoint: &str) -> MetricResult<UsageStats>;

    fn network_counters(&mut self) -> MetricResult<Vec<InterfaceCounters>>;
}

/// Production provider backed by `sysinfo`, with `/proc` + `statvfs`
/// plumbing for the disk capabilities on Linux.
pub struct SysinfoProvider {
    sys: System,
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoProvider {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();
        SysinfoProvider { sys }
    }
}

impl MetricsProvider for SysinfoProvider {
    fn cpu_percent(&mut self, interval: Duration) -> MetricResult<Vec<f64>> {
        // Utilization is the delta between two refreshes spaced by the
        // sampling window.
        self.sys.refresh_cpu_all();
        std::thread::sleep(interval.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
        self.sys.refresh_cpu_all();
        Ok(vec![f64::from(self.sys.global_cpu_usage())])
    }

    fn physical_core_count(&self) -> MetricResult<usize> {
        System::physical_core_count()
            .ok_or_else(|| MetricError::unavailable("physical core count"))
    }

    fn load_average(&self) -> MetricResult<LoadAverage> {
        let avg = System::load_average();
        Ok(LoadAverage {
            one: avg.one,
            five: avg.five,
            fifteen: avg.fifteen,
        })
    }

    fn virtual_memory(&mut self) -> MetricResult<MemoryStats> {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(MetricError::unavailable("virtual memory totals"));
        }
        let used = self.sys.used_memory();
        Ok(MemoryStats {
            total_bytes: total,
            used_bytes: used,
            used_percent: used as f64 / total as f64 * 100.0,
        })
    }

    fn processes(&mut self) -> MetricResult<Vec<ProcessRecord>> {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        let records = self
            .sys
            .processes()
            .iter()
            .map(|(pid, process)| ProcessRecord {
                pid: pid.as_u32(),
                resident_bytes: Ok(process.memory()),
            })
            .collect();
        Ok(records)
    }

    fn partitions(&self) -> MetricResult<Vec<Partition>> {
        platform::partitions()
    }

    fn usage(&self, mountpoint: &str) -> MetricResult<UsageStats> {
        platform::usage(mountpoint)
    }

    fn network_counters(&mut self) -> MetricResult<Vec<InterfaceCounters>> {
        let networks = Networks::new_with_refreshed_list();
        let counters = networks
            .iter()
            .map(|(name, data)| InterfaceCounters {
                name: name.clone(),
                bytes_recv: data.total_received(),
                bytes_sent: data.total_transmitted(),
                recv_errors: data.total_errors_on_received(),
                send_errors: data.total_errors_on_transmitted(),
            })
            .collect();
        Ok(counters)
    }
}
