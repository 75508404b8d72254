//! End-to-end: scripted provider -> collector -> rendered report.

use std::time::Duration;

use hostsnap::error::{MetricError, MetricResult};
use hostsnap::report;
use hostsnap::system::collector::Collector;
use hostsnap::system::platform::{GenericPolicy, LinuxPolicy};
use hostsnap::system::provider::{
    InterfaceCounters, LoadAverage, MemoryStats, MetricsProvider, Partition, ProcessRecord,
    UsageStats,
};

struct MockHost {
    cpu: MetricResult<Vec<f64>>,
    processes: MetricResult<Vec<ProcessRecord>>,
    network: MetricResult<Vec<InterfaceCounters>>,
}

impl MockHost {
    fn new() -> Self {
        MockHost {
            cpu: Ok(vec![23.456]),
            processes: Ok(vec![
                ProcessRecord {
                    pid: 100,
                    resident_bytes: Ok(512 * 1024 * 1024),
                },
                ProcessRecord {
                    pid: 200,
                    resident_bytes: Ok(2 * 1024 * 1024 * 1024),
                },
                ProcessRecord {
                    pid: 300,
                    resident_bytes: Err(MetricError::unavailable("exited")),
                },
            ]),
            network: Ok(vec![InterfaceCounters {
                name: "eth0".to_string(),
                bytes_recv: 3 * 1024 * 1024,
                bytes_sent: 1024 * 1024,
                recv_errors: 0,
                send_errors: 2,
            }]),
        }
    }
}

impl MetricsProvider for MockHost {
    fn cpu_percent(&mut self, _interval: Duration) -> MetricResult<Vec<f64>> {
        self.cpu.clone()
    }

    fn physical_core_count(&self) -> MetricResult<usize> {
        Ok(8)
    }

    fn load_average(&self) -> MetricResult<LoadAverage> {
        Ok(LoadAverage {
            one: 0.4,
            five: 1.2,
            fifteen: 0.9,
        })
    }

    fn virtual_memory(&mut self) -> MetricResult<MemoryStats> {
        Ok(MemoryStats {
            total_bytes: 16 * 1024 * 1024 * 1024,
            used_bytes: 11 * 1024 * 1024 * 1024,
            used_percent: 68.75,
        })
    }

    fn processes(&mut self) -> MetricResult<Vec<ProcessRecord>> {
        self.processes.clone()
    }

    fn partitions(&self) -> MetricResult<Vec<Partition>> {
        Ok(vec![
            Partition {
                device: "/dev/sda1".to_string(),
                mountpoint: "/".to_string(),
            },
            Partition {
                device: "/dev/mapper/dm-1".to_string(),
                mountpoint: "/data".to_string(),
            },
            Partition {
                device: "/dev/loop0".to_string(),
                mountpoint: "/snap/core".to_string(),
            },
            Partition {
                device: "tmpfs".to_string(),
                mountpoint: "/run".to_string(),
            },
        ])
    }

    fn usage(&self, mountpoint: &str) -> MetricResult<UsageStats> {
        match mountpoint {
            "/" => Ok(UsageStats {
                used_percent: 72.0,
                inodes_used_percent: 14.3,
            }),
            "/data" => Ok(UsageStats {
                used_percent: 81.2,
                inodes_used_percent: 3.0,
            }),
            other => Err(MetricError::unavailable(format!("unexpected mount {other}"))),
        }
    }

    fn network_counters(&mut self) -> MetricResult<Vec<InterfaceCounters>> {
        self.network.clone()
    }
}

fn render_linux(host: MockHost, top_n: usize) -> String {
    let mut collector = Collector::new(host, &LinuxPolicy, Duration::ZERO);
    report::render(&collector.collect(), top_n)
}

#[test]
fn full_report_contains_every_section_in_order() {
    let report = render_linux(MockHost::new(), 5);

    let cpu = report.find("CPU使用率:  23.46%").expect("cpu line");
    let load = report.find("CPU负载: 0.15").expect("load line");
    let mem = report.find("内存使用率:  68.75%").expect("memory line");
    let disk = report.find("磁盘空间使用率:").expect("disk line");
    let procs = report.find("的进程信息如下:").expect("process header");
    let net = report.find("服务器的网络信息如下:").expect("network header");

    assert!(cpu < load && load < mem && mem < disk && disk < procs && procs < net);
}

#[test]
fn device_mapper_volume_keys_by_mountpoint_with_ceiling() {
    let report = render_linux(MockHost::new(), 5);
    assert!(report.contains(r#""/data":"82%""#));
    assert!(report.contains(r#""/dev/sda1":"72%""#));
    // Excluded devices never appear.
    assert!(!report.contains("loop0"));
    assert!(!report.contains("tmpfs"));
}

#[test]
fn processes_are_ranked_and_unreadable_ones_skipped() {
    let report = render_linux(MockHost::new(), 5);
    assert!(report.contains("1. PID: 200, Memory Usage: 2048 MB"));
    assert!(report.contains("2. PID: 100, Memory Usage: 512 MB"));
    assert!(!report.contains("PID: 300"));
}

#[test]
fn network_counters_render_in_whole_mebibytes() {
    let report = render_linux(MockHost::new(), 5);
    assert!(report.contains("网络接口：eth0"));
    assert!(report.contains("接收兆字节数：3MB"));
    assert!(report.contains("发送兆字节数：1MB"));
    assert!(report.contains("发送错误数：2"));
}

#[test]
fn zero_processes_is_a_valid_empty_section() {
    let mut host = MockHost::new();
    host.processes = Ok(Vec::new());
    let report = render_linux(host, 5);
    assert!(report.contains("的进程信息如下:"));
    assert!(!report.contains("PID:"));
}

#[test]
fn degraded_host_still_produces_a_complete_report() {
    let mut host = MockHost::new();
    host.cpu = Err(MetricError::unavailable("cpu"));
    host.network = Err(MetricError::unavailable("net"));
    let report = render_linux(host, 5);
    assert!(report.contains("Check Cpu Error"));
    assert!(report.contains("内存使用率:  68.75%"));
    assert!(report.contains("服务器的网络信息如下:"));
    assert!(!report.contains("网络接口"));
}

#[test]
fn non_linux_policy_renders_empty_load_and_inode_sections() {
    let mut collector = Collector::new(MockHost::new(), &GenericPolicy, Duration::ZERO);
    let snapshot = collector.collect();
    assert!(snapshot.cpu_load.is_none());
    let report = report::render(&snapshot, 5);
    assert!(!report.contains("CPU负载:"));
    assert!(report.contains("磁盘Inode使用率:  {}"));
}
