use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use super::platform::HostPolicy;
use super::provider::{MetricsProvider, UsageStats};
use crate::error::MetricResult;
use crate::format;

/// Which usage percentage a mapper pass reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UsageVariant {
    Space,
    Inodes,
}

impl UsageVariant {
    fn percent(self, usage: &UsageStats) -> f64 {
        match self {
            UsageVariant::Space => usage.used_percent,
            UsageVariant::Inodes => usage.inodes_used_percent,
        }
    }
}

/// Rounded-up usage percentages keyed by device or mountpoint, kept in
/// enumeration order. Duplicate keys are not inserted twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiskUsageMap {
    entries: Vec<(String, String)>,
    /// Partitions whose usage could not be read and were dropped.
    pub skipped: usize,
}

impl DiskUsageMap {
    pub fn insert(&mut self, key: String, value: String) {
        if !self.contains_key(&key) {
            self.entries.push((key, value));
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compact JSON object, keys in enumeration order.
    pub fn to_json(&self) -> String {
        // Serialization of a map cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Serialize for DiskUsageMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Enumerate partitions and map each included one to its rounded-up usage
/// percent. Per-partition usage failures skip that partition; only a failed
/// enumeration is an error. The inode variant is empty off Linux by policy,
/// never an error.
pub fn collect_usage_map<P: MetricsProvider + ?Sized>(
    provider: &P,
    policy: &dyn HostPolicy,
    variant: UsageVariant,
) -> MetricResult<DiskUsageMap> {
    let mut map = DiskUsageMap::default();
    if variant == UsageVariant::Inodes && !policy.reports_inodes() {
        return Ok(map);
    }

    for partition in provider.partitions()? {
        if !policy.includes_partition(&partition.device) {
            continue;
        }
        let usage = match provider.usage(&partition.mountpoint) {
            Ok(usage) => usage,
            Err(err) => {
                debug!(%err, mountpoint = %partition.mountpoint, "partition usage unreadable");
                map.skipped += 1;
                continue;
            }
        };
        map.insert(
            policy.disk_key(&partition.device, &partition.mountpoint),
            format::ceil_percent(variant.percent(&usage)),
        );
    }
    Ok(map)
}
