mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{interface, process, FakeProvider};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use sysmon_api::metrics::data::*;
use sysmon_api::{
    create_app, DeltaEngine, MonitorService, MonotonicClock, Result, SystemProvider, WebConfig,
};
use tower::ServiceExt;

fn app(provider: Arc<FakeProvider>) -> Router {
    let service = MonitorService::new(
        provider,
        Arc::new(MonotonicClock::new()),
        &WebConfig::default(),
    );
    create_app(Arc::new(service))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, header::HeaderMap, Value) {
    let response = app
        .oneshot(
            Request::get(uri)
                .header(header::ORIGIN, "http://dashboard.local")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_stats_endpoint_shape() {
    let (status, headers, json) = get_json(app(Arc::new(FakeProvider::healthy())), "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let fields = [
        "cpu_percent",
        "cpu_uptime",
        "ram_percent",
        "ram_total_gb",
        "ram_used_gb",
        "cpu_temp",
        "net_upload_speed",
        "net_download_speed",
        "total_bytes_sent",
        "total_bytes_recv",
        "main_disk_percent",
        "main_disk_total_gb",
        "main_disk_used_gb",
        "usb_disk_percent",
        "usb_disk_total_gb",
        "usb_disk_used_gb",
    ];
    let object = json.as_object().expect("stats is an object");
    assert_eq!(object.len(), fields.len());
    for field in fields {
        assert!(object[field].is_string(), "{} should be a string", field);
    }
}

#[tokio::test]
async fn test_stats_endpoint_never_fails() {
    let provider = FakeProvider::healthy();
    *provider.cpu_percent.lock() = None;
    *provider.memory.lock() = None;
    *provider.network.lock() = None;
    *provider.sensors.lock() = None;
    provider.unmount("/");
    provider.unmount("/mnt/usb");

    let (status, _headers, json) = get_json(app(Arc::new(provider)), "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cpu_percent"], "--%");
    assert_eq!(json["cpu_temp"], "--°C");
    assert_eq!(json["usb_disk_total_gb"], "0.0 GB");
}

#[tokio::test]
async fn test_processes_endpoint() {
    let provider = Arc::new(FakeProvider::healthy());
    provider.set_processes(vec![process(1, 4.0, 0), process(300, 0.0, 1024)]);

    let (status, _headers, json) = get_json(app(provider), "/processes").await;
    assert_eq!(status, StatusCode::OK);

    let processes = json.as_array().expect("processes is an array");
    assert_eq!(processes.len(), 2);
    assert_eq!(processes[0]["pid"], 1);
    assert_eq!(processes[0]["name"], "proc-1");
    assert_eq!(processes[0]["cpu_percent"], "--%");
    assert_eq!(processes[0]["memory_percent"], "0.0%");
    assert_eq!(processes[1]["pid"], 300);
}

#[tokio::test]
async fn test_processes_endpoint_degrades_to_empty_list() {
    let provider = FakeProvider::healthy();
    *provider.processes.lock() = None;

    let (status, _headers, json) = get_json(app(Arc::new(provider)), "/processes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, Value::Array(Vec::new()));
}

#[tokio::test]
async fn test_interfaces_endpoint_excludes_loopback_and_wlan0() {
    let provider = FakeProvider::healthy();
    *provider.interfaces.lock() = Some(vec![
        interface("wlan0", Some(true), &["10.0.0.2/24"]),
        interface("eth0", Some(true), &["10.0.0.3/24"]),
        interface("lo", Some(true), &["127.0.0.1/8"]),
        interface("lo0", None, &[]),
    ]);

    let (status, _headers, json) = get_json(app(Arc::new(provider)), "/interfaces").await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|iface| iface["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["eth0", "lo0"]);
    assert_eq!(json[0]["status"], "up");
    assert_eq!(json[0]["ip_addresses"][0]["family"], "IPv4");
    assert_eq!(json[0]["ip_addresses"][0]["address"], "10.0.0.3/24");
    assert_eq!(json[1]["status"], "unknown");
}

/// Network counters that grow on every read, like a busy link.
struct GrowingCounters {
    inner: FakeProvider,
    reads: AtomicU64,
}

impl SystemProvider for GrowingCounters {
    fn cpu_percent(&self) -> Result<f64> {
        self.inner.cpu_percent()
    }
    fn uptime_seconds(&self) -> Result<u64> {
        self.inner.uptime_seconds()
    }
    fn virtual_memory(&self) -> Result<MemoryUsage> {
        self.inner.virtual_memory()
    }
    fn sensor_temperatures(&self) -> Result<Vec<SensorReading>> {
        self.inner.sensor_temperatures()
    }
    fn network_counters(&self) -> Result<NetworkCounters> {
        let read = self.reads.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(NetworkCounters {
            bytes_sent: read * 1500,
            bytes_received: read * 9000,
        })
    }
    fn disk_usage(&self, mount_point: &std::path::Path) -> Result<DiskUsage> {
        self.inner.disk_usage(mount_point)
    }
    fn processes(&self) -> Result<Vec<ProcessRecord>> {
        self.inner.processes()
    }
    fn logical_cpu_count(&self) -> usize {
        self.inner.logical_cpu_count()
    }
    fn network_interfaces(&self) -> Result<Vec<InterfaceRecord>> {
        self.inner.network_interfaces()
    }
}

#[test]
fn test_concurrent_network_rates_are_finite_and_non_negative() {
    let provider = Arc::new(GrowingCounters {
        inner: FakeProvider::healthy(),
        reads: AtomicU64::new(0),
    });
    let engine = Arc::new(DeltaEngine::new(provider.clone(), Arc::new(MonotonicClock::new())));

    let workers: Vec<_> = (0..16)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                (0..200)
                    .map(|_| engine.compute_network_rates())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut zero_rate_polls = 0;
    for worker in workers {
        for rates in worker.join().unwrap() {
            assert!(rates.upload_bytes_per_sec.is_finite());
            assert!(rates.download_bytes_per_sec.is_finite());
            assert!(rates.upload_bytes_per_sec >= 0.0);
            assert!(rates.download_bytes_per_sec >= 0.0);
            if rates.upload_bytes_per_sec == 0.0 {
                zero_rate_polls += 1;
            }
        }
    }

    assert_eq!(provider.reads.load(Ordering::SeqCst), 16 * 200);
    // At least the very first poll had no previous sample
    assert!(zero_rate_polls >= 1);
}

#[test]
fn test_concurrent_process_polls_keep_state_bounded() {
    let provider = Arc::new(FakeProvider::healthy());
    provider.set_processes((1..=50).map(|pid| process(pid, 1.0, 0)).collect());
    let engine = Arc::new(DeltaEngine::new(provider, Arc::new(MonotonicClock::new())));

    let workers: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..50 {
                    let readings = engine.compute_process_cpu();
                    assert_eq!(readings.len(), 50);
                    for reading in readings {
                        if let Some(percent) = reading.cpu_percent {
                            assert!(percent.is_finite());
                            assert_eq!(percent, 0.0);
                        }
                    }
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }
    assert_eq!(engine.tracked_process_count(), 50);
}
