use sysinfo::Disks;

use crate::error::{MetricError, MetricResult};
use crate::system::provider::{Partition, UsageStats};

pub fn partitions() -> MetricResult<Vec<Partition>> {
    let disks = Disks::new_with_refreshed_list();
    Ok(disks
        .list()
        .iter()
        .map(|disk| Partition {
            device: disk.name().to_string_lossy().to_string(),
            mountpoint: disk.mount_point().to_string_lossy().to_string(),
        })
        .collect())
}

pub fn usage(mountpoint: &str) -> MetricResult<UsageStats> {
    let disks = Disks::new_with_refreshed_list();
    for disk in disks.list() {
        if disk.mount_point().to_string_lossy() == mountpoint {
            let total = disk.total_space();
            let used = total.saturating_sub(disk.available_space());
            let used_percent = if total > 0 {
                used as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            // No portable inode accounting here; the generic policy never
            // asks for it.
            return Ok(UsageStats {
                used_percent,
                inodes_used_percent: 0.0,
            });
        }
    }
    Err(MetricError::unavailable(format!(
        "no mounted filesystem at {mountpoint}"
    )))
}
