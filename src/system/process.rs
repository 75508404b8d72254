use tracing::debug;

use super::provider::ProcessRecord;

/// One process's resident memory at snapshot time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcessMemorySample {
    pub pid: u32,
    pub resident_bytes: u64,
}

/// Processes ranked by resident memory, largest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RankedProcesses {
    pub samples: Vec<ProcessMemorySample>,
    /// Processes whose memory could not be read (permissions, races with
    /// exit). Skipped, not fatal.
    pub skipped: usize,
}

impl RankedProcesses {
    /// Largest-first prefix of at most `n` samples. Short lists yield short
    /// prefixes; an empty list yields an empty slice.
    pub fn top(&self, n: usize) -> &[ProcessMemorySample] {
        &self.samples[..self.samples.len().min(n)]
    }
}

/// Collect-or-skip fold over the enumeration: readable processes are kept,
/// unreadable ones are counted and dropped, then everything is sorted by
/// resident memory descending.
pub fn rank_by_memory(records: Vec<ProcessRecord>) -> RankedProcesses {
    let mut samples = Vec::with_capacity(records.len());
    let mut skipped = 0usize;

    for record in records {
        match record.resident_bytes {
            Ok(resident_bytes) => samples.push(ProcessMemorySample {
                pid: record.pid,
                resident_bytes,
            }),
            Err(_) => skipped += 1,
        }
    }

    samples.sort_by(|a, b| b.resident_bytes.cmp(&a.resident_bytes));

    if skipped > 0 {
        debug!(skipped, "processes dropped from memory ranking");
    }

    RankedProcesses { samples, skipped }
}
