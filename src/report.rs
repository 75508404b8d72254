use std::fmt::Write;

use crate::error::MetricResult;
use crate::format;
use crate::system::disk::DiskUsageMap;
use crate::system::provider::InterfaceCounters;
use crate::system::snapshot::Snapshot;

pub const BANNER: &str = "hostsnap - point-in-time host resource report";

// Fixed placeholders for degraded sections. Kept verbatim for operators
// who grep the report output.
const CPU_UNAVAILABLE: &str = "Check Cpu Error";
const MEMORY_UNAVAILABLE: &str = "无法获取内存信息";
const DISK_UNAVAILABLE: &str = "Check Disk Error  Not Found disk";

const RULE: &str = "++++++++++++++++++++++++++++++";

/// Render a snapshot as sectioned plain text. Every section header is
/// always present; failed metrics substitute their placeholder line.
pub fn render(snapshot: &Snapshot, top_n: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{BANNER}");
    let _ = writeln!(out);

    let _ = writeln!(out, "{RULE}CPU/CPU负载/内存信息{RULE}");
    let _ = writeln!(out, "{}", cpu_line(&snapshot.cpu_percent));
    let _ = writeln!(out, "{}", cpu_load_line(&snapshot.cpu_load));
    let _ = writeln!(out, "{}", memory_line(&snapshot.memory_percent));
    let _ = writeln!(out);

    let _ = writeln!(out, "{RULE}磁盘空间使用率/磁盘Inode使用率{RULE}");
    let _ = writeln!(out, "磁盘空间使用率:  {}", disk_field(&snapshot.disk_space));
    let _ = writeln!(out, "磁盘Inode使用率:  {}", disk_field(&snapshot.disk_inodes));
    let _ = writeln!(out);

    let _ = writeln!(out, "{RULE}占用内存前{top_n}的进程信息如下:{RULE}");
    for (rank, sample) in snapshot.processes.top(top_n).iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. PID: {}, Memory Usage: {} MB",
            rank + 1,
            sample.pid,
            format::whole_mebibytes(sample.resident_bytes)
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{RULE}服务器的网络信息如下:{RULE}");
    if let Some(interfaces) = &snapshot.network {
        for counters in interfaces {
            write_interface(&mut out, counters);
        }
    }

    out
}

fn cpu_line(cpu_percent: &MetricResult<f64>) -> String {
    match cpu_percent {
        Ok(value) => format!("CPU使用率:  {}%", format::two_decimals(*value)),
        Err(_) => CPU_UNAVAILABLE.to_string(),
    }
}

fn cpu_load_line(cpu_load: &Option<MetricResult<f64>>) -> String {
    match cpu_load {
        Some(Ok(value)) => format!("CPU负载: {}", format::two_decimals(*value)),
        Some(Err(_)) => CPU_UNAVAILABLE.to_string(),
        // Absent on this platform; the line stays empty, not an error.
        None => String::new(),
    }
}

fn memory_line(memory_percent: &MetricResult<f64>) -> String {
    match memory_percent {
        Ok(value) => format!("内存使用率:  {}%", format::two_decimals(*value)),
        Err(_) => MEMORY_UNAVAILABLE.to_string(),
    }
}

fn disk_field(map: &MetricResult<DiskUsageMap>) -> String {
    match map {
        Ok(map) => map.to_json(),
        Err(_) => DISK_UNAVAILABLE.to_string(),
    }
}

fn write_interface(out: &mut String, counters: &InterfaceCounters) {
    let _ = writeln!(out, "网络接口：{}", counters.name);
    let _ = writeln!(
        out,
        "接收兆字节数：{}MB",
        format::whole_mebibytes(counters.bytes_recv)
    );
    let _ = writeln!(
        out,
        "发送兆字节数：{}MB",
        format::whole_mebibytes(counters.bytes_sent)
    );
    let _ = writeln!(out, "接收错误数：{}", counters.recv_errors);
    let _ = writeln!(out, "发送错误数：{}", counters.send_errors);
    let _ = writeln!(out, "-----------------------------");
}
