use std::ffi::CString;
use std::mem::MaybeUninit;

use crate::error::{MetricError, MetricResult};
use crate::system::provider::{Partition, UsageStats};

pub fn partitions() -> MetricResult<Vec<Partition>> {
    let contents = std::fs::read_to_string("/proc/mounts")
        .map_err(|e| MetricError::unavailable(format!("/proc/mounts: {e}")))?;
    Ok(parse_mounts(&contents))
}

fn parse_mounts(contents: &str) -> Vec<Partition> {
    contents
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let device = fields.next()?;
            let mountpoint = fields.next()?;
            Some(Partition {
                device: device.to_string(),
                mountpoint: unescape_mount(mountpoint),
            })
        })
        .collect()
}

/// /proc/mounts escapes space, tab, newline and backslash as three-digit
/// octal (`\040` and friends). Unescaping works on raw bytes so multi-byte
/// UTF-8 mountpoints pass through intact.
fn unescape_mount(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() {
            let octal = std::str::from_utf8(&bytes[i + 1..i + 4]).ok();
            if let Some(code) = octal.and_then(|s| u8::from_str_radix(s, 8).ok()) {
                out.push(code);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

pub fn usage(mountpoint: &str) -> MetricResult<UsageStats> {
    let path = CString::new(mountpoint)
        .map_err(|_| MetricError::unavailable("mountpoint contains NUL"))?;
    let mut stats = MaybeUninit::<libc::statvfs>::uninit();
    // SAFETY: path is a valid NUL-terminated string and stats is a
    // properly-sized buffer for statvfs to fill.
    let rc = unsafe { libc::statvfs(path.as_ptr(), stats.as_mut_ptr()) };
    if rc != 0 {
        return Err(MetricError::unavailable(format!(
            "statvfs({mountpoint}): {}",
            std::io::Error::last_os_error()
        )));
    }
    // SAFETY: statvfs returned 0, so the buffer is initialized.
    let stats = unsafe { stats.assume_init() };

    // Used percent is relative to the space an unprivileged user can reach;
    // root-reserved blocks do not count toward the total.
    let used_blocks = stats.f_blocks.saturating_sub(stats.f_bfree);
    let reachable_blocks = used_blocks + stats.f_bavail;
    let used_percent = if reachable_blocks > 0 {
        used_blocks as f64 / reachable_blocks as f64 * 100.0
    } else {
        0.0
    };

    let used_inodes = stats.f_files.saturating_sub(stats.f_ffree);
    let inodes_used_percent = if stats.f_files > 0 {
        used_inodes as f64 / stats.f_files as f64 * 100.0
    } else {
        0.0
    };

    Ok(UsageStats {
        used_percent,
        inodes_used_percent,
    })
}
