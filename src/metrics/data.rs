//! Data structures for system metrics.
//!
//! The first half are raw records handed out by a
//! [`SystemProvider`](crate::metrics::traits::SystemProvider); the second half are
//! the pre-formatted records served as JSON.

use serde::{Deserialize, Serialize};

/// Physical memory totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryUsage {
    /// Total system memory in bytes
    pub total_bytes: u64,
    /// Used memory in bytes
    pub used_bytes: u64,
}

/// A single temperature sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Sensor label as reported by the host (e.g. "coretemp Package id 0")
    pub label: String,
    /// Current temperature in Celsius
    pub celsius: f64,
}

/// Cumulative network byte counters across all interfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkCounters {
    pub bytes_sent: u64,
    pub bytes_received: u64,
}

/// Usage of one mounted filesystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskUsage {
    /// Total space in bytes
    pub total_bytes: u64,
    /// Used space in bytes
    pub used_bytes: u64,
}

/// One OS process as enumerated by the provider.
///
/// Fields the provider could not read are `None`; a record without a CPU time is
/// dropped from the process listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: i32,
    pub name: Option<String>,
    /// Cumulative user + system CPU time in seconds
    pub cpu_time_secs: Option<f64>,
    /// Resident set size in bytes
    pub resident_bytes: Option<u64>,
}

/// One network interface as enumerated by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    pub name: String,
    /// `None` when the provider has no flags for the interface
    pub is_up: Option<bool>,
    pub mac_address: Option<String>,
    /// Addresses in CIDR notation (e.g. "192.168.1.10/24")
    pub addresses: Vec<String>,
}

/// Response body of `GET /stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStats {
    pub cpu_percent: String,
    pub cpu_uptime: String,
    pub ram_percent: String,
    pub ram_total_gb: String,
    pub ram_used_gb: String,
    pub cpu_temp: String,
    pub net_upload_speed: String,
    pub net_download_speed: String,
    pub total_bytes_sent: String,
    pub total_bytes_recv: String,
    pub main_disk_percent: String,
    pub main_disk_total_gb: String,
    pub main_disk_used_gb: String,
    pub usb_disk_percent: String,
    pub usb_disk_total_gb: String,
    pub usb_disk_used_gb: String,
}

/// One entry of `GET /processes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: i32,
    pub name: String,
    pub cpu_percent: String,
    pub memory_percent: String,
}

/// Interface link state as served to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceStatus {
    Up,
    Down,
    Unknown,
}

impl From<Option<bool>> for InterfaceStatus {
    fn from(is_up: Option<bool>) -> Self {
        match is_up {
            Some(true) => Self::Up,
            Some(false) => Self::Down,
            None => Self::Unknown,
        }
    }
}

/// Address family tag for an interface address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressFamily {
    IPv4,
    IPv6,
    #[serde(rename = "unknown")]
    Unknown,
}

impl AddressFamily {
    /// Classify an address string: colons mean IPv6, dots mean IPv4.
    pub fn classify(address: &str) -> Self {
        if address.contains(':') {
            Self::IPv6
        } else if address.contains('.') {
            Self::IPv4
        } else {
            Self::Unknown
        }
    }
}

/// An address attached to an interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpAddressInfo {
    pub family: AddressFamily,
    pub address: String,
}

/// One entry of `GET /interfaces`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterfaceInfo {
    pub name: String,
    pub status: InterfaceStatus,
    pub mac_address: String,
    pub ip_addresses: Vec<IpAddressInfo>,
}
