//! # sysmon_api - Host Metrics over JSON
//!
//! A small HTTP API exposing host metrics (CPU, memory, disks, network
//! throughput, temperature, processes and network interfaces) for a dashboard
//! that polls it. Aimed at single-board computers: no authentication, no
//! persistence, every request recomputes a snapshot.
//!
//! ## Features
//!
//! - **Rate metrics**: network throughput and per-process CPU percentage derived
//!   from cumulative counters across successive polls
//! - **Pre-formatted output**: every value is rendered for display on the server
//! - **Graceful degradation**: unreadable metrics become placeholders such as `"--%"`
//! - **Library + Binary**: Use as a crate or standalone application
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sysmon_api::{start_web_server, WebConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Serve /stats, /processes and /interfaces on port 3040
//!     start_web_server(WebConfig::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod metrics;
pub mod web;

// Re-export public API
pub use error::{MonitorError, Result};
pub use metrics::{
    data::{NetworkInterfaceInfo, ProcessInfo, SystemStats},
    Clock, DeltaEngine, MonitorService, MonotonicClock, SysinfoProvider, SystemProvider,
};

pub use web::{create_app, start_web_server, start_web_server_with_provider, WebConfig};

/// The default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// The default web server port
pub const DEFAULT_WEB_PORT: u16 = 3040;

/// Mount point reported as the main disk
pub const MAIN_DISK_MOUNT_POINT: &str = "/";

/// Default mount point reported as the secondary (USB) disk
pub const DEFAULT_USB_MOUNT_POINT: &str = "/mnt/usb";

/// Interfaces never listed by `/interfaces`
pub const EXCLUDED_INTERFACES: [&str; 2] = ["lo", "wlan0"];
