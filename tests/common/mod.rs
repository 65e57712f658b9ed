//! Scripted provider and clock shared by the integration tests.

#![allow(dead_code)]

use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use sysmon_api::metrics::data::*;
use sysmon_api::{Clock, MonitorError, MonitorService, Result, SystemProvider, WebConfig};

/// Provider whose answers are set by the test. `None` makes a query fail.
pub struct FakeProvider {
    pub cpu_percent: Mutex<Option<f64>>,
    pub uptime: Mutex<Option<u64>>,
    pub memory: Mutex<Option<MemoryUsage>>,
    pub sensors: Mutex<Option<Vec<SensorReading>>>,
    pub network: Mutex<Option<NetworkCounters>>,
    pub disks: Mutex<HashMap<PathBuf, DiskUsage>>,
    pub processes: Mutex<Option<Vec<ProcessRecord>>>,
    pub cores: usize,
    pub interfaces: Mutex<Option<Vec<InterfaceRecord>>>,
}

impl FakeProvider {
    /// A four-core host with 8 GB of RAM and a mounted USB disk.
    pub fn healthy() -> Self {
        let disks = HashMap::from([
            (
                PathBuf::from("/"),
                DiskUsage {
                    total_bytes: 100 * GB,
                    used_bytes: 25 * GB,
                },
            ),
            (
                PathBuf::from("/mnt/usb"),
                DiskUsage {
                    total_bytes: 64 * GB,
                    used_bytes: 16 * GB,
                },
            ),
        ]);

        Self {
            cpu_percent: Mutex::new(Some(12.34)),
            uptime: Mutex::new(Some(90_061)),
            memory: Mutex::new(Some(MemoryUsage {
                total_bytes: 8 * GB,
                used_bytes: 2 * GB,
            })),
            sensors: Mutex::new(Some(vec![
                SensorReading {
                    label: "nvme Composite".to_string(),
                    celsius: 38.0,
                },
                SensorReading {
                    label: "cpu_thermal".to_string(),
                    celsius: 51.26,
                },
            ])),
            network: Mutex::new(Some(NetworkCounters {
                bytes_sent: 0,
                bytes_received: 0,
            })),
            disks: Mutex::new(disks),
            processes: Mutex::new(Some(Vec::new())),
            cores: 4,
            interfaces: Mutex::new(Some(Vec::new())),
        }
    }

    pub fn set_network(&self, bytes_sent: u64, bytes_received: u64) {
        *self.network.lock() = Some(NetworkCounters {
            bytes_sent,
            bytes_received,
        });
    }

    pub fn set_processes(&self, records: Vec<ProcessRecord>) {
        *self.processes.lock() = Some(records);
    }

    pub fn unmount(&self, mount_point: &str) {
        self.disks.lock().remove(Path::new(mount_point));
    }
}

pub const GB: u64 = 1024 * 1024 * 1024;

fn unavailable<T>(what: &str) -> Result<T> {
    Err(MonitorError::provider_error(format!("{} unavailable", what)))
}

impl SystemProvider for FakeProvider {
    fn cpu_percent(&self) -> Result<f64> {
        self.cpu_percent.lock().map_or_else(|| unavailable("cpu"), Ok)
    }

    fn uptime_seconds(&self) -> Result<u64> {
        self.uptime.lock().map_or_else(|| unavailable("uptime"), Ok)
    }

    fn virtual_memory(&self) -> Result<MemoryUsage> {
        self.memory.lock().map_or_else(|| unavailable("memory"), Ok)
    }

    fn sensor_temperatures(&self) -> Result<Vec<SensorReading>> {
        self.sensors
            .lock()
            .clone()
            .map_or_else(|| unavailable("sensors"), Ok)
    }

    fn network_counters(&self) -> Result<NetworkCounters> {
        self.network.lock().map_or_else(|| unavailable("network"), Ok)
    }

    fn disk_usage(&self, mount_point: &Path) -> Result<DiskUsage> {
        self.disks
            .lock()
            .get(mount_point)
            .copied()
            .map_or_else(|| unavailable("disk"), Ok)
    }

    fn processes(&self) -> Result<Vec<ProcessRecord>> {
        self.processes
            .lock()
            .clone()
            .map_or_else(|| unavailable("processes"), Ok)
    }

    fn logical_cpu_count(&self) -> usize {
        self.cores
    }

    fn network_interfaces(&self) -> Result<Vec<InterfaceRecord>> {
        self.interfaces
            .lock()
            .clone()
            .map_or_else(|| unavailable("interfaces"), Ok)
    }
}

/// Clock that only moves when told to.
#[derive(Default)]
pub struct ManualClock {
    now: Mutex<f64>,
}

impl ManualClock {
    pub fn advance(&self, seconds: f64) {
        *self.now.lock() += seconds;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        *self.now.lock()
    }
}

pub fn process(pid: i32, cpu_time_secs: f64, resident_bytes: u64) -> ProcessRecord {
    ProcessRecord {
        pid,
        name: Some(format!("proc-{}", pid)),
        cpu_time_secs: Some(cpu_time_secs),
        resident_bytes: Some(resident_bytes),
    }
}

pub fn interface(name: &str, is_up: Option<bool>, addresses: &[&str]) -> InterfaceRecord {
    InterfaceRecord {
        name: name.to_string(),
        is_up,
        mac_address: Some("dc:a6:32:00:00:01".to_string()),
        addresses: addresses.iter().map(|a| a.to_string()).collect(),
    }
}

/// Service wired to a fake provider and a manual clock, with default config.
pub fn service() -> (Arc<FakeProvider>, Arc<ManualClock>, MonitorService) {
    let provider = Arc::new(FakeProvider::healthy());
    let clock = Arc::new(ManualClock::default());
    let service = MonitorService::new(provider.clone(), clock.clone(), &WebConfig::default());
    (provider, clock, service)
}
