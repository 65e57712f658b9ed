//! Delta-metrics engine.
//!
//! Converts cumulative OS counters into rates by keeping exactly one generation of
//! "previous" samples. Two independent state groups exist, each behind its own
//! mutex:
//!
//! - the previous [`NetworkSample`], used for upload/download throughput;
//! - the previous per-process CPU times plus their shared timestamp, used for
//!   per-process CPU percentages.
//!
//! Each lock is held across the whole read-provider / compute / replace sequence,
//! so concurrent callers never compute two deltas against the same previous sample.

use crate::metrics::data::NetworkCounters;
use crate::metrics::traits::{Clock, SystemProvider};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// One cumulative read of the system-wide network counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkSample {
    pub bytes_sent: u64,
    pub bytes_received: u64,
    /// Monotonic capture time in seconds
    pub captured_at: f64,
}

impl NetworkSample {
    fn new(counters: NetworkCounters, captured_at: f64) -> Self {
        Self {
            bytes_sent: counters.bytes_sent,
            bytes_received: counters.bytes_received,
            captured_at,
        }
    }

    /// Upload and download rates relative to `previous`.
    ///
    /// Counters that went backwards (reset or wrap) count as zero traffic.
    fn rates_since(&self, previous: &NetworkSample) -> Option<(f64, f64)> {
        if previous.captured_at >= self.captured_at {
            return None;
        }
        let elapsed = self.captured_at - previous.captured_at;
        let sent = self.bytes_sent.saturating_sub(previous.bytes_sent);
        let received = self.bytes_received.saturating_sub(previous.bytes_received);
        Some((sent as f64 / elapsed, received as f64 / elapsed))
    }
}

/// Throughput plus the cumulative totals it was computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetworkRates {
    pub upload_bytes_per_sec: f64,
    pub download_bytes_per_sec: f64,
    pub total_bytes_sent: u64,
    pub total_bytes_received: u64,
}

/// CPU usage of one process for the current poll.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessCpuReading {
    pub pid: i32,
    pub name: Option<String>,
    /// `None` when there is no usable previous sample for this process
    pub cpu_percent: Option<f64>,
    pub resident_bytes: Option<u64>,
}

#[derive(Debug, Default)]
struct ProcessCpuState {
    cpu_times: HashMap<i32, f64>,
    captured_at: Option<f64>,
}

/// Holds the shared poll state and computes rates from successive snapshots.
pub struct DeltaEngine {
    provider: Arc<dyn SystemProvider>,
    clock: Arc<dyn Clock>,
    network: Mutex<Option<NetworkSample>>,
    processes: Mutex<ProcessCpuState>,
}

impl DeltaEngine {
    pub fn new(provider: Arc<dyn SystemProvider>, clock: Arc<dyn Clock>) -> Self {
        Self {
            provider,
            clock,
            network: Mutex::new(None),
            processes: Mutex::new(ProcessCpuState::default()),
        }
    }

    /// Read the network counters and compute throughput since the previous call.
    ///
    /// The first call, or a call whose timestamp is not strictly after the stored
    /// one, reports zero rates. The stored sample is replaced whenever the counters
    /// could be read. A provider failure yields all zeroes and leaves the stored
    /// sample untouched.
    pub fn compute_network_rates(&self) -> NetworkRates {
        let mut previous = self.network.lock();

        let counters = match self.provider.network_counters() {
            Ok(counters) => counters,
            Err(e) => {
                warn!("Failed to read network counters: {}", e);
                return NetworkRates::default();
            }
        };
        let current = NetworkSample::new(counters, self.clock.now());

        let (upload, download) = previous
            .as_ref()
            .and_then(|prev| current.rates_since(prev))
            .unwrap_or((0.0, 0.0));

        *previous = Some(current);

        NetworkRates {
            upload_bytes_per_sec: upload,
            download_bytes_per_sec: download,
            total_bytes_sent: current.bytes_sent,
            total_bytes_received: current.bytes_received,
        }
    }

    /// Enumerate processes and compute each one's CPU percentage since the
    /// previous call.
    ///
    /// Percentages are normalized by the logical core count, so one fully busy
    /// core on a 4-core host reads 25%. Processes whose CPU time cannot be read
    /// are left out. The stored generation is rebuilt from scratch, so exited
    /// processes drop out of the state on the next call.
    pub fn compute_process_cpu(&self) -> Vec<ProcessCpuReading> {
        let mut state = self.processes.lock();

        let records = match self.provider.processes() {
            Ok(records) => records,
            Err(e) => {
                warn!("Failed to enumerate processes: {}", e);
                return Vec::new();
            }
        };
        let now = self.clock.now();
        let cores = self.provider.logical_cpu_count().max(1) as f64;

        let elapsed = state
            .captured_at
            .filter(|&previous| previous < now)
            .map(|previous| now - previous);

        let mut current_times = HashMap::with_capacity(records.len());
        let readings: Vec<ProcessCpuReading> = records
            .into_iter()
            .filter_map(|record| {
                let Some(cpu_time) = record.cpu_time_secs else {
                    debug!("Skipping pid {}: CPU time unavailable", record.pid);
                    return None;
                };
                current_times.insert(record.pid, cpu_time);

                let cpu_percent = elapsed.and_then(|elapsed| {
                    let previous = state.cpu_times.get(&record.pid)?;
                    let used = cpu_time - previous;
                    (used >= 0.0).then(|| used / elapsed * 100.0 / cores)
                });

                Some(ProcessCpuReading {
                    pid: record.pid,
                    name: record.name,
                    cpu_percent,
                    resident_bytes: record.resident_bytes,
                })
            })
            .collect();

        state.cpu_times = current_times;
        state.captured_at = Some(now);

        readings
    }

    /// Number of processes held in the previous CPU-time generation.
    pub fn tracked_process_count(&self) -> usize {
        self.processes.lock().cpu_times.len()
    }
}
