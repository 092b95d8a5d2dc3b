//! Application settings and HTTP server configuration.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

use pantry::outbound::persistence::StoreConfig;

const DEFAULT_PROJECT_NAME: &str = "Pantry backend";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("mongodb_uri is required (set PANTRY_MONGODB_URI or pass --mongodb-uri)")]
    MissingMongoUri,
    #[error("bind_addr {value:?} is not a socket address: {message}")]
    InvalidBindAddr { value: String, message: String },
}

/// Settings loaded from CLI flags, `PANTRY_*` environment variables and an
/// optional configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PANTRY")]
pub struct AppSettings {
    /// MongoDB connection string.
    pub mongodb_uri: Option<String>,
    /// Database holding both collections.
    pub database_name: Option<String>,
    /// Collection storing items.
    pub items_collection: Option<String>,
    /// Collection storing clock-in records.
    pub clock_in_collection: Option<String>,
    /// Display name used in startup logs.
    pub project_name: Option<String>,
    /// Socket address for the HTTP listener.
    pub bind_addr: Option<String>,
    /// Serve Swagger UI even in release builds.
    #[ortho_config(default = false)]
    pub debug: bool,
}

impl AppSettings {
    /// Return the project name, falling back to the default.
    pub fn project_name(&self) -> &str {
        self.project_name.as_deref().unwrap_or(DEFAULT_PROJECT_NAME)
    }

    /// Build the store configuration, applying collection defaults.
    pub fn store_config(&self) -> Result<StoreConfig, SettingsError> {
        let uri = self
            .mongodb_uri
            .as_deref()
            .filter(|uri| !uri.trim().is_empty())
            .ok_or(SettingsError::MissingMongoUri)?;
        let mut config = StoreConfig::new(uri);
        if let Some(name) = &self.database_name {
            config = config.with_database_name(name.as_str());
        }
        if let Some(name) = &self.items_collection {
            config = config.with_items_collection(name.as_str());
        }
        if let Some(name) = &self.clock_in_collection {
            config = config.with_clock_in_collection(name.as_str());
        }
        Ok(config)
    }

    /// Parse the listener address, falling back to `0.0.0.0:8000`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) swagger_ui: bool,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration for `bind_addr`. Swagger UI is served
    /// in debug builds by default.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            swagger_ui: cfg!(debug_assertions),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Force Swagger UI on, regardless of build profile.
    #[must_use]
    pub fn with_swagger_ui(mut self, enabled: bool) -> Self {
        self.swagger_ui = self.swagger_ui || enabled;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
