//! Startup connection to the backing store with bounded retries.
//!
//! The database container usually starts alongside the service, so the first
//! few connection attempts may be refused. [`open_store`] keeps trying with a
//! fixed delay until a connection is established or the attempt ceiling is
//! reached, at which point startup must abort.
//!
//! The loop is a small state machine:
//!
//! ```text
//! Attempting(1) --ok--> Established(1)
//!      |
//!     err (n < max) --sleep--> Attempting(n + 1)
//!      |
//!     err (n == max) --> Failed(n)
//! ```
//!
//! Connecting and sleeping are injected through [`StoreConnector`] and
//! [`RetrySleeper`] so the policy runs without a database or wall-clock
//! delay in tests.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, warn};

use super::ports::define_port_error;

/// Default number of connection attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
/// Default pause between connection attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Where and as whom to connect.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreTarget {
    /// Database host name or address.
    pub host: String,
    /// Database TCP port.
    pub port: u16,
    /// Login role.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Database name.
    pub database: String,
}

impl fmt::Debug for StoreTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreTarget")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Attempt ceiling and inter-attempt delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionRetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl ConnectionRetryPolicy {
    /// Build a policy; an attempt ceiling of zero is raised to one.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use assim_backend::domain::store_init::ConnectionRetryPolicy;
    ///
    /// let policy = ConnectionRetryPolicy::new(0, Duration::from_secs(1));
    /// assert_eq!(policy.max_attempts(), 1);
    /// ```
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Maximum number of consecutive attempts.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Pause between a failed attempt and the next one.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for ConnectionRetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY)
    }
}

/// Progress of the connection loop. Each variant carries the attempt number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Attempt `n` is about to run or running.
    Attempting(u32),
    /// Attempt `n` produced a live handle.
    Established(u32),
    /// Attempt `n` failed and was the last one allowed.
    Failed(u32),
}

impl ConnectionState {
    /// Transition after a successful attempt.
    pub fn on_success(self) -> Self {
        match self {
            Self::Attempting(attempt) => Self::Established(attempt),
            terminal => terminal,
        }
    }

    /// Transition after a failed attempt under `max_attempts`.
    ///
    /// # Examples
    /// ```
    /// use assim_backend::domain::store_init::ConnectionState;
    ///
    /// assert_eq!(ConnectionState::Attempting(1).on_failure(3), ConnectionState::Attempting(2));
    /// assert_eq!(ConnectionState::Attempting(3).on_failure(3), ConnectionState::Failed(3));
    /// ```
    pub fn on_failure(self, max_attempts: u32) -> Self {
        match self {
            Self::Attempting(attempt) if attempt >= max_attempts => Self::Failed(attempt),
            Self::Attempting(attempt) => Self::Attempting(attempt.saturating_add(1)),
            terminal => terminal,
        }
    }
}

define_port_error! {
    /// Failure of a single connection attempt.
    pub enum StoreConnectError {
        /// The store could not be reached or refused the login.
        Connect { message: String } => "store connection failed: {message}",
        /// Connection parameters were rejected before contacting the store.
        Configuration { message: String } => "store configuration rejected: {message}",
    }
}

/// Terminal startup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreInitError {
    /// Every allowed attempt failed; carries the last attempt's error.
    #[error("store connection exhausted after {attempts} attempts: {source}")]
    ConnectionExhausted {
        /// Attempts made, equal to the configured ceiling.
        attempts: u32,
        /// Error returned by the final attempt.
        #[source]
        source: StoreConnectError,
    },
}

/// Opens one connection (or connection-backed handle) to the store.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    /// Live handle produced by a successful attempt.
    type Handle: Send;

    /// Make a single attempt to open and authenticate a connection.
    async fn connect(&self) -> Result<Self::Handle, StoreConnectError>;
}

/// Suspends the connection loop between attempts.
#[async_trait]
pub trait RetrySleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioRetrySleeper;

#[async_trait]
impl RetrySleeper for TokioRetrySleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Connect to the store, retrying failed attempts under `policy`.
///
/// Attempts run strictly one after another. After a failed attempt that is
/// not the last, a warning names the attempt number, the ceiling, and the
/// error, then `sleeper` pauses for [`ConnectionRetryPolicy::delay`]. No
/// sleep follows the final attempt.
///
/// # Errors
/// Returns [`StoreInitError::ConnectionExhausted`] once
/// [`ConnectionRetryPolicy::max_attempts`] consecutive attempts have failed.
pub async fn open_store<C>(
    connector: &C,
    sleeper: &dyn RetrySleeper,
    policy: ConnectionRetryPolicy,
) -> Result<C::Handle, StoreInitError>
where
    C: StoreConnector + ?Sized,
{
    let max_attempts = policy.max_attempts();
    let delay_ms = u64::try_from(policy.delay().as_millis()).unwrap_or(u64::MAX);
    let mut state = ConnectionState::Attempting(1);

    while let ConnectionState::Attempting(attempt) = state {
        match connector.connect().await {
            Ok(handle) => {
                state = state.on_success();
                info!(attempt, max_attempts, ?state, "store connection established");
                return Ok(handle);
            }
            Err(source) => {
                state = state.on_failure(max_attempts);
                if let ConnectionState::Failed(attempts) = state {
                    error!(
                        attempts,
                        max_attempts,
                        error = %source,
                        "store connection attempts exhausted"
                    );
                    return Err(StoreInitError::ConnectionExhausted { attempts, source });
                }
                warn!(
                    attempt,
                    max_attempts,
                    delay_ms,
                    error = %source,
                    "store connection failed; retrying"
                );
                sleeper.sleep(policy.delay()).await;
            }
        }
    }

    // `state` only leaves `Attempting` through the returns above.
    Err(StoreInitError::ConnectionExhausted {
        attempts: max_attempts,
        source: StoreConnectError::connect("connection loop ended without a result"),
    })
}
