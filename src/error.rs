//! Error handling for the system monitor API.

/// A specialized `Result` type for monitor operations.
pub type Result<T> = std::result::Result<T, MonitorError>;

/// The main error type for monitor operations.
///
/// None of these reach an HTTP client during normal operation: provider failures
/// are turned into placeholder values by the service layer.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// The system information provider could not answer a query
    #[error("Provider error: {0}")]
    Provider(String),

    /// Web server error
    #[error("Web server error: {0}")]
    WebServer(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MonitorError {
    /// Create a new provider error
    pub fn provider_error(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create a new web server error
    pub fn web_server_error(msg: impl Into<String>) -> Self {
        Self::WebServer(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
