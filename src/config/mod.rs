//! Configuration management
//!
//! Layers, lowest precedence first: built-in defaults, an optional TOML file
//! (`clickdial.toml`, or the path in `CLICKDIAL_CONFIG`), then environment
//! variables such as `CLICKDIAL__SERVER__PORT=9090`.

use crate::application::directory::FetchPolicy;
use config::{ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "clickdial.toml";
pub const CONFIG_PATH_ENV: &str = "CLICKDIAL_CONFIG";
const ENV_PREFIX: &str = "CLICKDIAL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub vendor: VendorConfig,
    pub backend: BackendConfig,
    pub client: ClientConfig,
}

/// Where the pass-through listens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Vendor click-to-call API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorConfig {
    pub endpoint: String,
    /// Unset keeps the HTTP client's default
    pub timeout_secs: Option<u64>,
}

/// Backend REST API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Client-side settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Origin serving `/api/initiate-call`
    pub proxy_base_url: String,
    pub call_timeout_secs: u64,
    pub fetch_policy: FetchPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            vendor: VendorConfig {
                endpoint: "https://cts.myvi.in:8443/Cpaas/api/clicktocall/initiate-call"
                    .to_string(),
                timeout_secs: None,
            },
            backend: BackendConfig {
                base_url: "https://phpstack-1431591-5347985.cloudwaysapps.com".to_string(),
                timeout_secs: 10,
            },
            client: ClientConfig {
                proxy_base_url: "http://localhost:8080".to_string(),
                call_timeout_secs: 60,
                fetch_policy: FetchPolicy::Silent,
            },
        }
    }
}

impl Config {
    /// Load from the default file location and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    /// Load with `path` as the (optional) file layer
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let defaults = config::Config::try_from(&Config::default())?;

        config::Config::builder()
            .add_source(defaults)
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl VendorConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ClientConfig {
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}
