//! Configuration types, read from the environment.

use std::time::Duration;

use crate::error::ConfigError;

/// Endpoints and limits for the integration gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// URL of the form-ingest script that receives record rows.
    pub record_endpoint: String,
    /// URL of the script that stores uploaded images.
    pub image_endpoint: String,
    /// Per-request timeout for both endpoints.
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Build a config with the default timeout. Used directly by tests;
    /// production wiring goes through [`from_env`](Self::from_env).
    pub fn new(record_endpoint: impl Into<String>, image_endpoint: impl Into<String>) -> Self {
        Self {
            record_endpoint: record_endpoint.into(),
            image_endpoint: image_endpoint.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Read the gateway configuration from the environment.
    ///
    /// `TAGMAX_RECORD_ENDPOINT` and `TAGMAX_IMAGE_ENDPOINT` are required;
    /// `TAGMAX_HTTP_TIMEOUT_SECS` defaults to 30.
    pub fn from_env() -> Result<Self, ConfigError> {
        let record_endpoint = std::env::var("TAGMAX_RECORD_ENDPOINT").map_err(|_| {
            ConfigError::MissingRequired {
                key: "TAGMAX_RECORD_ENDPOINT".into(),
                hint: "Set it to the form-ingest script URL that receives record rows.".into(),
            }
        })?;

        let image_endpoint = std::env::var("TAGMAX_IMAGE_ENDPOINT").map_err(|_| {
            ConfigError::MissingRequired {
                key: "TAGMAX_IMAGE_ENDPOINT".into(),
                hint: "Set it to the script URL that stores installation photos.".into(),
            }
        })?;

        let timeout_secs: u64 = std::env::var("TAGMAX_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            record_endpoint,
            image_endpoint,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the onboarding API listens on.
    pub port: u16,
}

impl ServerConfig {
    /// Read the server configuration from the environment.
    /// `TAGMAX_PORT` defaults to 8080.
    pub fn from_env() -> Self {
        let port: u16 = std::env::var("TAGMAX_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);
        Self { port }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}
