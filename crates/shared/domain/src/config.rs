use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level service configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub registry: RegistryConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Upstream employee registry.
///
/// `base_url` is the collection endpoint itself: list is a `GET`, create a `POST`
/// and delete a `DELETE` against this exact URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    /// Extra attempts after a transport failure (connect/timeout). HTTP responses are never retried.
    pub retries: u8,
}

/// Global subscriber settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level: `trace`, `debug`, `info`, `warn`, `error` or `off`.
    pub level: String,
    /// Explicit filter directives; `RUST_LOG` is used when absent.
    pub filter: Option<String>,
    /// Directory for rolling log files; console only when absent.
    pub directory: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
}

/// Upper bound for [`RegistryConfig::retries`], enforced when the registry client is built.
pub const MAX_REGISTRY_RETRIES: u8 = 1;

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 8111, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8112/api/v1/employee".to_owned(),
            timeout_seconds: 10,
            connect_timeout_seconds: 5,
            retries: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, directory: None, json: false, max_files: 10 }
    }
}
