//! Traits for system metrics collection.

use crate::error::Result;
use crate::metrics::data::{
    DiskUsage, InterfaceRecord, MemoryUsage, NetworkCounters, ProcessRecord, SensorReading,
};
use std::path::Path;
use std::time::Instant;

/// Source of raw, instantaneous OS counters.
///
/// Implementations answer each query from the host directly and keep no history of
/// their own; turning cumulative counters into rates is the job of
/// [`DeltaEngine`](crate::metrics::engine::DeltaEngine). Every method may fail
/// independently, e.g. when a metric is unsupported on the host.
pub trait SystemProvider: Send + Sync {
    /// Global CPU busy percentage since the previous call (zero-length window).
    fn cpu_percent(&self) -> Result<f64>;

    /// Seconds since boot.
    fn uptime_seconds(&self) -> Result<u64>;

    /// Total and used physical memory.
    fn virtual_memory(&self) -> Result<MemoryUsage>;

    /// All readable temperature sensors.
    fn sensor_temperatures(&self) -> Result<Vec<SensorReading>>;

    /// Cumulative bytes sent/received, summed over every interface.
    fn network_counters(&self) -> Result<NetworkCounters>;

    /// Usage of the filesystem mounted at `mount_point`.
    fn disk_usage(&self, mount_point: &Path) -> Result<DiskUsage>;

    /// Every OS process, in the provider's enumeration order.
    fn processes(&self) -> Result<Vec<ProcessRecord>>;

    /// Number of logical CPU cores.
    fn logical_cpu_count(&self) -> usize;

    /// Network interfaces with their flags and addresses.
    fn network_interfaces(&self) -> Result<Vec<InterfaceRecord>>;
}

/// Monotonic time source, in fractional seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> f64;
}

/// Clock counting seconds since it was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}
