use std::time::Duration;

use tracing::warn;

use super::disk::{self, UsageVariant};
use super::platform::HostPolicy;
use super::process::{self, RankedProcesses};
use super::provider::{InterfaceCounters, MetricsProvider};
use super::snapshot::Snapshot;
use crate::error::{MetricError, MetricResult};

/// Resource snapshot aggregator.
///
/// Runs every sampler sequentially against the injected provider and
/// policy. A failing sampler degrades its own section only; the snapshot
/// always completes.
pub struct Collector<P> {
    provider: P,
    policy: &'static dyn HostPolicy,
    sample_interval: Duration,
}

impl<P: MetricsProvider> Collector<P> {
    pub fn new(provider: P, policy: &'static dyn HostPolicy, sample_interval: Duration) -> Self {
        Collector {
            provider,
            policy,
            sample_interval,
        }
    }

    /// One full snapshot. Blocks for the CPU sampling window.
    pub fn collect(&mut self) -> Snapshot {
        let cpu_percent = self.cpu_percent();
        let cpu_load = self.cpu_load();
        let memory_percent = self.memory_percent();
        let disk_space = disk::collect_usage_map(&self.provider, self.policy, UsageVariant::Space);
        let disk_inodes =
            disk::collect_usage_map(&self.provider, self.policy, UsageVariant::Inodes);
        let processes = self.ranked_processes();
        let network = self.network_counters();

        Snapshot {
            cpu_percent,
            cpu_load,
            memory_percent,
            disk_space,
            disk_inodes,
            processes,
            network,
        }
    }

    fn cpu_percent(&mut self) -> MetricResult<f64> {
        let samples = self.provider.cpu_percent(self.sample_interval)?;
        samples
            .first()
            .copied()
            .ok_or_else(|| MetricError::unavailable("cpu sampler returned no samples"))
    }

    /// Load average per physical core; only meaningful where the policy
    /// says the kernel exposes a load average.
    fn cpu_load(&mut self) -> Option<MetricResult<f64>> {
        if !self.policy.reports_load() {
            return None;
        }
        Some(self.load_per_core())
    }

    fn load_per_core(&mut self) -> MetricResult<f64> {
        let cores = self.provider.physical_core_count()?;
        let load = self.provider.load_average()?;
        if cores == 0 {
            return Err(MetricError::unavailable("zero physical cores reported"));
        }
        Ok(load.five / cores as f64)
    }

    fn memory_percent(&mut self) -> MetricResult<f64> {
        Ok(self.provider.virtual_memory()?.used_percent)
    }

    fn ranked_processes(&mut self) -> RankedProcesses {
        match self.provider.processes() {
            Ok(records) => process::rank_by_memory(records),
            Err(err) => {
                warn!(%err, "process enumeration failed; reporting no processes");
                RankedProcesses::default()
            }
        }
    }

    /// The one sampler that reports failure out-of-band: a missing network
    /// section is an acceptable degraded outcome.
    fn network_counters(&mut self) -> Option<Vec<InterfaceCounters>> {
        match self.provider.network_counters() {
            Ok(counters) => Some(counters),
            Err(err) => {
                warn!(%err, "无法获取网络IO信息");
                None
            }
        }
    }
}
