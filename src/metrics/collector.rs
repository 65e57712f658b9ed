//! Production [`SystemProvider`] backed by `sysinfo` and `pnet`.

use crate::error::{MonitorError, Result};
use crate::metrics::data::*;
use crate::metrics::traits::SystemProvider;
use parking_lot::Mutex;
use std::path::Path;
use sysinfo::{Components, Disks, Networks, ProcessRefreshKind, ProcessesToUpdate, System};

/// System information provider using sysinfo for counters and pnet for interfaces.
pub struct SysinfoProvider {
    system: Mutex<System>,
    disks: Mutex<Disks>,
    networks: Mutex<Networks>,
    components: Mutex<Components>,
}

impl SysinfoProvider {
    /// Create a new provider and take the initial CPU sample.
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_memory();
        system.refresh_cpu_all();

        Self {
            system: Mutex::new(system),
            disks: Mutex::new(Disks::new_with_refreshed_list()),
            networks: Mutex::new(Networks::new_with_refreshed_list()),
            components: Mutex::new(Components::new_with_refreshed_list()),
        }
    }
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProvider for SysinfoProvider {
    fn cpu_percent(&self) -> Result<f64> {
        let mut system = self.system.lock();
        system.refresh_cpu_usage();

        if system.cpus().is_empty() {
            return Err(MonitorError::provider_error("No CPU information available"));
        }
        Ok(f64::from(system.global_cpu_usage()))
    }

    fn uptime_seconds(&self) -> Result<u64> {
        Ok(System::uptime())
    }

    fn virtual_memory(&self) -> Result<MemoryUsage> {
        let mut system = self.system.lock();
        system.refresh_memory();

        let total_bytes = system.total_memory();
        if total_bytes == 0 {
            return Err(MonitorError::provider_error("No memory information available"));
        }
        Ok(MemoryUsage {
            total_bytes,
            used_bytes: system.used_memory(),
        })
    }

    fn sensor_temperatures(&self) -> Result<Vec<SensorReading>> {
        let mut components = self.components.lock();
        components.refresh(true);

        Ok(components
            .iter()
            .filter_map(|component| {
                component.temperature().map(|celsius| SensorReading {
                    label: component.label().to_string(),
                    celsius: f64::from(celsius),
                })
            })
            .collect())
    }

    fn network_counters(&self) -> Result<NetworkCounters> {
        let mut networks = self.networks.lock();
        networks.refresh(true);

        if networks.iter().next().is_none() {
            return Err(MonitorError::provider_error("No network interfaces found"));
        }
        Ok(networks
            .iter()
            .fold(NetworkCounters::default(), |total, (_name, data)| NetworkCounters {
                bytes_sent: total.bytes_sent + data.total_transmitted(),
                bytes_received: total.bytes_received + data.total_received(),
            }))
    }

    fn disk_usage(&self, mount_point: &Path) -> Result<DiskUsage> {
        let mut disks = self.disks.lock();
        disks.refresh(true);

        let disk = disks
            .iter()
            .find(|disk| disk.mount_point() == mount_point)
            .ok_or_else(|| {
                MonitorError::provider_error(format!(
                    "No filesystem mounted at {}",
                    mount_point.display()
                ))
            })?;

        // sysinfo only exposes space available to unprivileged users, so blocks
        // reserved for root are counted as used.
        let total_bytes = disk.total_space();
        Ok(DiskUsage {
            total_bytes,
            used_bytes: total_bytes.saturating_sub(disk.available_space()),
        })
    }

    fn processes(&self) -> Result<Vec<ProcessRecord>> {
        let mut system = self.system.lock();
        system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );

        let mut records: Vec<ProcessRecord> = system
            .processes()
            .iter()
            .filter_map(|(pid, process)| {
                let pid = i32::try_from(pid.as_u32()).ok()?;
                Some(ProcessRecord {
                    pid,
                    name: Some(process.name().to_string_lossy().to_string()),
                    cpu_time_secs: Some(process.accumulated_cpu_time() as f64 / 1000.0),
                    resident_bytes: Some(process.memory()),
                })
            })
            .collect();

        if records.is_empty() {
            return Err(MonitorError::provider_error("Process list is empty"));
        }
        records.sort_by_key(|record| record.pid);
        Ok(records)
    }

    fn logical_cpu_count(&self) -> usize {
        self.system.lock().cpus().len()
    }

    fn network_interfaces(&self) -> Result<Vec<InterfaceRecord>> {
        Ok(pnet::datalink::interfaces()
            .into_iter()
            .map(|iface| InterfaceRecord {
                is_up: Some(iface.is_up()),
                mac_address: iface.mac.map(|mac| mac.to_string()),
                addresses: iface.ips.iter().map(|ip| ip.to_string()).collect(),
                name: iface.name,
            })
            .collect())
    }
}
