//! Async connection pool for Diesel PostgreSQL connections.
//!
//! The pool is the store handle: it is built once at startup by
//! [`DieselStoreConnector`](super::DieselStoreConnector), shared by every
//! repository, and dropped at shutdown. Statements run in auto-commit mode.

use std::fmt;
use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

use crate::domain::store_init::StoreTarget;

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Quote a value for a libpq `key=value` connection string.
fn quote_conninfo_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        if matches!(ch, '\\' | '\'') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}

/// Render `target` as a `key=value` connection string understood by both
/// libpq and `tokio-postgres`.
///
/// # Examples
/// ```
/// use assim_backend::domain::store_init::StoreTarget;
/// use assim_backend::outbound::persistence::connection_string;
///
/// let target = StoreTarget {
///     host: "db".into(),
///     port: 5432,
///     user: "appuser".into(),
///     password: "it's".into(),
///     database: "assim_saude".into(),
/// };
/// assert_eq!(
///     connection_string(&target),
///     r"host='db' port=5432 user='appuser' password='it\'s' dbname='assim_saude'"
/// );
/// ```
pub fn connection_string(target: &StoreTarget) -> String {
    format!(
        "host={} port={} user={} password={} dbname={}",
        quote_conninfo_value(&target.host),
        target.port,
        quote_conninfo_value(&target.user),
        quote_conninfo_value(&target.password),
        quote_conninfo_value(&target.database),
    )
}

/// Configuration for the database connection pool.
#[derive(Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl fmt::Debug for PoolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolConfig")
            .field("database_url", &"<redacted>")
            .field("max_size", &self.max_size)
            .field("min_idle", &self.min_idle)
            .field("connection_timeout", &self.connection_timeout)
            .finish()
    }
}

impl PoolConfig {
    /// Create a new configuration with the given connection string.
    ///
    /// Defaults: 10 connections, no idle floor, 30 second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            min_idle: None,
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Configuration pointing at `target`.
    pub fn for_target(target: &StoreTarget) -> Self {
        Self::new(connection_string(target))
    }

    /// Set the maximum number of connections in the pool.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    /// Set the minimum number of idle connections to maintain.
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Set the connection checkout timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Connection string handed to the driver.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Async connection pool for PostgreSQL via Diesel.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Create a new connection pool with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` if the pool cannot be constructed.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Get a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Checkout` if a connection cannot be obtained within
    /// the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn target(password: &str) -> StoreTarget {
        StoreTarget {
            host: "localhost".into(),
            port: 5432,
            user: "appuser".into(),
            password: password.into(),
            database: "assim_saude".into(),
        }
    }

    #[rstest]
    fn pool_config_default_values() {
        let config = PoolConfig::new("host=localhost");

        assert_eq!(config.database_url(), "host=localhost");
        assert_eq!(config.max_size, 10);
        assert_eq!(config.min_idle, None);
        assert_eq!(config.connection_timeout, Duration::from_secs(30));
    }

    #[rstest]
    fn zero_max_size_is_raised_to_one() {
        assert_eq!(PoolConfig::new("host=localhost").with_max_size(0).max_size, 1);
    }

    #[rstest]
    #[case("secret", "password='secret'")]
    #[case(r"back\slash", r"password='back\\slash'")]
    #[case("with space", "password='with space'")]
    #[case("", "password=''")]
    fn connection_string_quotes_values(#[case] password: &str, #[case] expected: &str) {
        let rendered = connection_string(&target(password));
        assert!(rendered.contains(expected), "{rendered}");
        assert!(rendered.starts_with("host='localhost' port=5432 user='appuser' "));
        assert!(rendered.ends_with(" dbname='assim_saude'"));
    }

    #[rstest]
    fn debug_output_hides_the_connection_string() {
        let config = PoolConfig::for_target(&target("hunter2"));
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[rstest]
    fn pool_error_display() {
        assert!(
            PoolError::checkout("connection refused")
                .to_string()
                .contains("connection refused")
        );
        assert!(PoolError::build("bad host").to_string().contains("bad host"));
    }
}
