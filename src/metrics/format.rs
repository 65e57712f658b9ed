//! Human-readable rendering of raw quantities.
//!
//! All functions here are pure; the placeholders are what the API serves whenever
//! a value could not be measured.

/// Placeholder for a percentage that could not be measured.
pub const UNAVAILABLE_PERCENT: &str = "--%";

/// Placeholder for a missing temperature reading.
pub const UNAVAILABLE_TEMPERATURE: &str = "--°C";

/// Placeholder for an unknown uptime.
pub const UNAVAILABLE_UPTIME: &str = "N/A";

const SIZE_UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];
const SPEED_UNITS: [&str; 9] = [
    "B/s", "KB/s", "MB/s", "GB/s", "TB/s", "PB/s", "EB/s", "ZB/s", "YB/s",
];
const UNIT_STEP: u64 = 1024;
const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Scale a byte count down the base-1024 ladder, truncating at every step.
///
/// Returns the integer magnitude and its unit label.
pub fn scale_bytes(bytes: u64) -> (u64, &'static str) {
    let mut value = bytes;
    let mut unit = 0;
    while value >= UNIT_STEP && unit < SIZE_UNITS.len() - 1 {
        value /= UNIT_STEP;
        unit += 1;
    }
    (value, SIZE_UNITS[unit])
}

/// Format a byte count, e.g. `1536` -> `"1.00 KB"`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let (value, unit) = scale_bytes(bytes);
    format!("{:.2} {}", value as f64, unit)
}

/// Format a byte rate with one decimal, e.g. `1536.0` -> `"1.5 KB/s"`.
pub fn format_speed(bytes_per_second: f64) -> String {
    if bytes_per_second == 0.0 {
        return "0 B/s".to_string();
    }
    let step = UNIT_STEP as f64;
    let mut value = bytes_per_second;
    let mut unit = 0;
    while value >= step && unit < SPEED_UNITS.len() - 1 {
        value /= step;
        unit += 1;
    }
    format!("{:.1} {}", value, SPEED_UNITS[unit])
}

/// Format a byte count as gigabytes with one decimal, without a unit ladder.
pub fn format_gb(bytes: u64) -> String {
    format!("{:.1} GB", bytes as f64 / BYTES_PER_GB)
}

/// Format seconds as `"D days, H hours, M minutes"`.
///
/// The days segment is left out when zero and leftover seconds are dropped.
pub fn format_uptime(total_seconds: u64) -> String {
    if total_seconds == 0 {
        return UNAVAILABLE_UPTIME.to_string();
    }
    let days = total_seconds / SECONDS_PER_DAY;
    let hours = (total_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;

    if days > 0 {
        format!("{} days, {} hours, {} minutes", days, hours, minutes)
    } else {
        format!("{} hours, {} minutes", hours, minutes)
    }
}

/// One-decimal percentage, e.g. `"12.5%"`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Whole-number percentage, e.g. `"42%"`.
pub fn format_whole_percent(value: f64) -> String {
    format!("{:.0}%", value)
}

/// `part / total * 100`, or `None` when `total` is zero.
pub fn ratio_percent(part: u64, total: u64) -> Option<f64> {
    (total > 0).then(|| part as f64 / total as f64 * 100.0)
}

/// One-decimal Celsius reading, e.g. `"48.3°C"`.
pub fn format_temperature(celsius: f64) -> String {
    format!("{:.1}°C", celsius)
}
