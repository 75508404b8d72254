use super::disk::DiskUsageMap;
use super::process::RankedProcesses;
use super::provider::InterfaceCounters;
use crate::error::MetricResult;

/// One complete point-in-time set of sampled host metrics.
///
/// Fallible sections carry a typed error so the renderer can substitute the
/// right placeholder. Sections that simply do not exist on this platform
/// (`cpu_load` off Linux, network counters after a failed read) are `None`
/// and render as absent rather than as an error.
pub struct Snapshot {
    pub cpu_percent: MetricResult<f64>,
    pub cpu_load: Option<MetricResult<f64>>,
    pub memory_percent: MetricResult<f64>,
    pub disk_space: MetricResult<DiskUsageMap>,
    pub disk_inodes: MetricResult<DiskUsageMap>,
    pub processes: RankedProcesses,
    pub network: Option<Vec<InterfaceCounters>>,
}
