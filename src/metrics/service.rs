//! Per-request assembly of the API responses.

use crate::metrics::data::*;
use crate::metrics::engine::DeltaEngine;
use crate::metrics::format::*;
use crate::metrics::traits::{Clock, SystemProvider};
use crate::web::WebConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

/// Sensor label fragments that identify a CPU temperature, in lower case.
const CPU_SENSOR_KEYWORDS: [&str; 4] = ["cpu", "core", "package", "temp"];

/// Disk figures formatted for `/stats`.
struct DiskFields {
    percent: String,
    total_gb: String,
    used_gb: String,
}

impl From<Option<DiskUsage>> for DiskFields {
    fn from(usage: Option<DiskUsage>) -> Self {
        let usage = usage.unwrap_or_default();
        Self {
            percent: ratio_percent(usage.used_bytes, usage.total_bytes)
                .map(format_whole_percent)
                .unwrap_or_else(|| UNAVAILABLE_PERCENT.to_string()),
            total_gb: format_gb(usage.total_bytes),
            used_gb: format_gb(usage.used_bytes),
        }
    }
}

/// Pulls fresh data from the provider, runs it through the delta engine and
/// renders the display strings.
pub struct MonitorService {
    provider: Arc<dyn SystemProvider>,
    engine: DeltaEngine,
    main_mount_point: PathBuf,
    usb_mount_point: PathBuf,
    excluded_interfaces: Vec<String>,
}

impl MonitorService {
    pub fn new(
        provider: Arc<dyn SystemProvider>,
        clock: Arc<dyn Clock>,
        config: &WebConfig,
    ) -> Self {
        Self {
            engine: DeltaEngine::new(Arc::clone(&provider), clock),
            provider,
            main_mount_point: config.main_mount_point.clone(),
            usb_mount_point: config.usb_mount_point.clone(),
            excluded_interfaces: config.excluded_interfaces.clone(),
        }
    }

    pub fn engine(&self) -> &DeltaEngine {
        &self.engine
    }

    /// Build the `/stats` payload.
    pub fn system_stats(&self) -> SystemStats {
        let cpu_percent = match self.provider.cpu_percent() {
            Ok(percent) => format_percent(percent),
            Err(e) => {
                warn!("Failed to read CPU usage: {}", e);
                UNAVAILABLE_PERCENT.to_string()
            }
        };

        let uptime = self.provider.uptime_seconds().unwrap_or_else(|e| {
            warn!("Failed to read uptime: {}", e);
            0
        });

        let memory = self.provider.virtual_memory().unwrap_or_else(|e| {
            warn!("Failed to read virtual memory: {}", e);
            MemoryUsage::default()
        });

        let network = self.engine.compute_network_rates();

        let main_disk = match self.provider.disk_usage(&self.main_mount_point) {
            Ok(usage) => DiskFields::from(Some(usage)),
            Err(e) => {
                warn!(
                    "Failed to read disk usage for {}: {}",
                    self.main_mount_point.display(),
                    e
                );
                DiskFields::from(None)
            }
        };
        // The secondary disk is often simply not mounted; stay quiet about it.
        let usb_disk = DiskFields::from(self.provider.disk_usage(&self.usb_mount_point).ok());

        SystemStats {
            cpu_percent,
            cpu_uptime: format_uptime(uptime),
            ram_percent: ratio_percent(memory.used_bytes, memory.total_bytes)
                .map(format_percent)
                .unwrap_or_else(|| UNAVAILABLE_PERCENT.to_string()),
            ram_total_gb: format_gb(memory.total_bytes),
            ram_used_gb: format_gb(memory.used_bytes),
            cpu_temp: self.cpu_temperature(),
            net_upload_speed: format_speed(network.upload_bytes_per_sec),
            net_download_speed: format_speed(network.download_bytes_per_sec),
            total_bytes_sent: format_bytes(network.total_bytes_sent),
            total_bytes_recv: format_bytes(network.total_bytes_received),
            main_disk_percent: main_disk.percent,
            main_disk_total_gb: main_disk.total_gb,
            main_disk_used_gb: main_disk.used_gb,
            usb_disk_percent: usb_disk.percent,
            usb_disk_total_gb: usb_disk.total_gb,
            usb_disk_used_gb: usb_disk.used_gb,
        }
    }

    fn cpu_temperature(&self) -> String {
        let sensors = match self.provider.sensor_temperatures() {
            Ok(sensors) => sensors,
            Err(e) => {
                warn!("Failed to read sensor temperatures: {}", e);
                return UNAVAILABLE_TEMPERATURE.to_string();
            }
        };

        sensors
            .iter()
            .find(|sensor| {
                let label = sensor.label.to_lowercase();
                CPU_SENSOR_KEYWORDS.iter().any(|keyword| label.contains(keyword))
            })
            .map(|sensor| format_temperature(sensor.celsius))
            .unwrap_or_else(|| UNAVAILABLE_TEMPERATURE.to_string())
    }

    /// Build the `/processes` payload, in the provider's enumeration order.
    pub fn processes(&self) -> Vec<ProcessInfo> {
        let readings = self.engine.compute_process_cpu();
        if readings.is_empty() {
            return Vec::new();
        }

        let total_memory = match self.provider.virtual_memory() {
            Ok(memory) => memory.total_bytes,
            Err(e) => {
                warn!("Failed to read virtual memory: {}", e);
                0
            }
        };

        readings
            .into_iter()
            .map(|reading| ProcessInfo {
                pid: reading.pid,
                name: reading.name.unwrap_or_else(|| "unknown".to_string()),
                cpu_percent: reading
                    .cpu_percent
                    .map(format_percent)
                    .unwrap_or_else(|| UNAVAILABLE_PERCENT.to_string()),
                memory_percent: reading
                    .resident_bytes
                    .and_then(|resident| ratio_percent(resident, total_memory))
                    .map(format_percent)
                    .unwrap_or_else(|| UNAVAILABLE_PERCENT.to_string()),
            })
            .collect()
    }

    /// Build the `/interfaces` payload, leaving out the excluded interface names.
    pub fn interfaces(&self) -> Vec<NetworkInterfaceInfo> {
        let records = match self.provider.network_interfaces() {
            Ok(records) => records,
            Err(e) => {
                warn!("Failed to enumerate network interfaces: {}", e);
                return Vec::new();
            }
        };

        records
            .into_iter()
            .filter(|record| !self.excluded_interfaces.contains(&record.name))
            .map(|record| NetworkInterfaceInfo {
                status: InterfaceStatus::from(record.is_up),
                mac_address: record.mac_address.unwrap_or_default(),
                ip_addresses: record
                    .addresses
                    .into_iter()
                    .map(|address| IpAddressInfo {
                        family: AddressFamily::classify(&address),
                        address,
                    })
                    .collect(),
                name: record.name,
            })
            .collect()
    }
}
