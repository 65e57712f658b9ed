//! Web server configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the web server and the filesystems it reports on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Host to bind the server to
    pub host: String,
    /// Port to bind the server to
    pub port: u16,
    /// Mount point reported as the main disk
    pub main_mount_point: PathBuf,
    /// Mount point reported as the secondary (USB) disk
    pub usb_mount_point: PathBuf,
    /// Interface names left out of `/interfaces`
    pub excluded_interfaces: Vec<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: crate::DEFAULT_HOST.to_string(),
            port: crate::DEFAULT_WEB_PORT,
            main_mount_point: PathBuf::from(crate::MAIN_DISK_MOUNT_POINT),
            usb_mount_point: PathBuf::from(crate::DEFAULT_USB_MOUNT_POINT),
            excluded_interfaces: crate::EXCLUDED_INTERFACES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl WebConfig {
    /// Create a new web configuration with custom host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set the host for the web server.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port for the web server.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the secondary disk mount point.
    pub fn with_usb_mount_point(mut self, path: impl Into<PathBuf>) -> Self {
        self.usb_mount_point = path.into();
        self
    }

    /// Replace the list of excluded interface names.
    pub fn with_excluded_interfaces<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_interfaces = names.into_iter().map(Into::into).collect();
        self
    }

    /// Get the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
