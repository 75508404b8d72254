use super::provider::{Partition, UsageStats};
use crate::error::MetricResult;

/// Host-dependent snapshot policy, chosen once at startup and injected into
/// the samplers. Both policies are plain value types so either can be
/// exercised in tests regardless of the build target.
pub trait HostPolicy {
    /// Whether a partition's device string names a filesystem worth
    /// reporting. Pure function of the device string.
    fn includes_partition(&self, device: &str) -> bool;

    /// Map key for a partition's usage entry. Device-mapper volumes key by
    /// mountpoint because the `dm-N` device name is not meaningful to
    /// operators.
    fn disk_key(&self, device: &str, mountpoint: &str) -> String;

    /// Inode accounting exists only where statvfs-style data does.
    fn reports_inodes(&self) -> bool;

    /// Load average is only exposed by Linux-like kernels.
    fn reports_load(&self) -> bool;
}

pub struct LinuxPolicy;

impl HostPolicy for LinuxPolicy {
    fn includes_partition(&self, device: &str) -> bool {
        device.contains("/dev/")
            && !device.contains("loop")
            && !device.contains("/boot/efi")
            && !device.contains("/dev/sda1 -")
    }

    fn disk_key(&self, device: &str, mountpoint: &str) -> String {
        if device.contains("dm-") {
            mountpoint.to_string()
        } else {
            device.to_string()
        }
    }

    fn reports_inodes(&self) -> bool {
        true
    }

    fn reports_load(&self) -> bool {
        true
    }
}

pub struct GenericPolicy;

impl HostPolicy for GenericPolicy {
    fn includes_partition(&self, _device: &str) -> bool {
        true
    }

    fn disk_key(&self, device: &str, mountpoint: &str) -> String {
        // Windows volume labels carry a trailing colon ("C:").
        let device = device.trim_end_matches(':');
        if device.contains("dm-") {
            mountpoint.to_string()
        } else {
            device.to_string()
        }
    }

    fn reports_inodes(&self) -> bool {
        false
    }

    fn reports_load(&self) -> bool {
        false
    }
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod generic;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(not(target_os = "linux"))]
use generic as platform_impl;

/// The policy for the build target. Both policies always compile; only the
/// selection is platform-dependent.
pub fn current() -> &'static dyn HostPolicy {
    if cfg!(target_os = "linux") {
        &LinuxPolicy
    } else {
        &GenericPolicy
    }
}

pub fn partitions() -> MetricResult<Vec<Partition>> {
    platform_impl::partitions()
}

pub fn usage(mountpoint: &str) -> MetricResult<UsageStats> {
    platform_impl::usage(mountpoint)
}
