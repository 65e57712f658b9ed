//! System metrics collection and data structures.
//!
//! This module provides the provider seam over the host's raw counters, the
//! delta engine that turns cumulative counters into rates, the display
//! formatters, and the service that assembles each API response.

pub mod collector;
pub mod data;
pub mod engine;
pub mod format;
pub mod service;
pub mod traits;

// Re-export commonly used items
pub use collector::SysinfoProvider;
pub use engine::DeltaEngine;
pub use service::MonitorService;
pub use traits::{Clock, MonotonicClock, SystemProvider};
