//! Runtime configuration loaded via OrthoConfig.
//!
//! Values come from configuration files and `DB_*` / `SERVER_*` environment
//! variables. Unset values fall back to the defaults exposed by the accessors.

use std::ffi::OsString;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::store_init::{
    ConnectionRetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY, StoreTarget,
};

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_USER: &str = "appuser";
const DEFAULT_DB_NAME: &str = "assim_saude";
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_SERVER_PORT: u16 = 5000;

/// Configuration sources could not be merged into a settings struct.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load {section} settings: {message}")]
pub struct SettingsError {
    section: &'static str,
    message: String,
}

/// Program name handed to the generated CLI parser. Both settings structs
/// share the process, so neither consumes real command-line flags.
fn program_args() -> [OsString; 1] {
    [OsString::from(env!("CARGO_PKG_NAME"))]
}

/// Database connection settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DB")]
pub struct DatabaseSettings {
    /// Database host name or address.
    pub host: Option<String>,
    /// Database TCP port.
    pub port: Option<u16>,
    /// Login role.
    pub user: Option<String>,
    /// Login password.
    pub password: Option<String>,
    /// Database name.
    pub name: Option<String>,
    /// Startup connection attempts before giving up.
    pub connect_attempts: Option<u32>,
    /// Seconds to wait between startup connection attempts.
    pub connect_delay_secs: Option<u64>,
    /// Maximum pooled connections.
    pub pool_size: Option<u32>,
}

impl DatabaseSettings {
    /// Load from configuration files and the environment.
    ///
    /// # Errors
    /// Returns [`SettingsError`] when a source cannot be parsed.
    pub fn load_from_env() -> Result<Self, SettingsError> {
        Self::load_from_iter(program_args()).map_err(|err| SettingsError {
            section: "database",
            message: err.to_string(),
        })
    }

    /// Where and as whom to connect.
    pub fn to_store_target(&self) -> StoreTarget {
        StoreTarget {
            host: self
                .host
                .clone()
                .unwrap_or_else(|| DEFAULT_DB_HOST.to_owned()),
            port: self.port.unwrap_or(DEFAULT_DB_PORT),
            user: self
                .user
                .clone()
                .unwrap_or_else(|| DEFAULT_DB_USER.to_owned()),
            password: self.password.clone().unwrap_or_default(),
            database: self
                .name
                .clone()
                .unwrap_or_else(|| DEFAULT_DB_NAME.to_owned()),
        }
    }

    /// Startup retry policy.
    pub fn retry_policy(&self) -> ConnectionRetryPolicy {
        ConnectionRetryPolicy::new(
            self.connect_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
            self.connect_delay_secs
                .map_or(DEFAULT_RETRY_DELAY, Duration::from_secs),
        )
    }

    /// Maximum pooled connections.
    pub fn pool_size(&self) -> u32 {
        self.pool_size.unwrap_or(DEFAULT_POOL_SIZE)
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SERVER")]
pub struct ServerSettings {
    /// Listen address.
    pub host: Option<IpAddr>,
    /// Listen port.
    pub port: Option<u16>,
    /// Comma-separated browser origins allowed by CORS; unset or empty
    /// allows any origin.
    pub cors_origins: Option<String>,
}

impl ServerSettings {
    /// Load from configuration files and the environment.
    ///
    /// # Errors
    /// Returns [`SettingsError`] when a source cannot be parsed.
    pub fn load_from_env() -> Result<Self, SettingsError> {
        Self::load_from_iter(program_args()).map_err(|err| SettingsError {
            section: "server",
            message: err.to_string(),
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port.unwrap_or(DEFAULT_SERVER_PORT),
        )
    }

    /// Allowed origins, trimmed, with blank entries dropped.
    ///
    /// # Examples
    /// ```
    /// use assim_backend::settings::ServerSettings;
    ///
    /// let settings = ServerSettings {
    ///     host: None,
    ///     port: None,
    ///     cors_origins: Some(" http://a.test, ,http://b.test ".to_owned()),
    /// };
    /// assert_eq!(settings.cors_origins(), vec!["http://a.test", "http://b.test"]);
    /// ```
    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect()
    }
}
