use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::discount::rules::{METAFIELD_KEY, METAFIELD_NAMESPACE};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the host surfaces.
///
/// Nothing in here changes how a cart is evaluated; the rules themselves
/// always arrive inside the function input.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub metafield: MetafieldConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let metafield = MetafieldConfig::new(
            env::var("APP_METAFIELD_NAMESPACE")
                .unwrap_or_else(|_| METAFIELD_NAMESPACE.to_string()),
            env::var("APP_METAFIELD_KEY").unwrap_or_else(|_| METAFIELD_KEY.to_string()),
        )?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            metafield,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location of the shop metafield holding the rules blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetafieldConfig {
    pub namespace: String,
    pub key: String,
}

impl MetafieldConfig {
    pub fn new(namespace: String, key: String) -> Result<Self, ConfigError> {
        let namespace = namespace.trim().to_string();
        let key = key.trim().to_string();

        if namespace.is_empty() {
            return Err(ConfigError::EmptyMetafieldField {
                variable: "APP_METAFIELD_NAMESPACE",
            });
        }
        if key.is_empty() {
            return Err(ConfigError::EmptyMetafieldField {
                variable: "APP_METAFIELD_KEY",
            });
        }

        Ok(Self { namespace, key })
    }

    /// `namespace.key`, the form used in log fields.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.namespace, self.key)
    }
}

impl Default for MetafieldConfig {
    fn default() -> Self {
        Self {
            namespace: METAFIELD_NAMESPACE.to_string(),
            key: METAFIELD_KEY.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    EmptyMetafieldField { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::EmptyMetafieldField { variable } => {
                write!(f, "{variable} must not be empty")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::EmptyMetafieldField { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
