//! Diesel-backed [`StoreConnector`].
//!
//! One attempt opens a single dedicated connection and reports the driver's
//! own error (refused, bad password, unknown database) to the retry loop. The
//! pool is only built once that connection has succeeded.

use async_trait::async_trait;
use diesel::ConnectionError;
use diesel_async::{AsyncConnection, AsyncPgConnection};
use tracing::debug;

use crate::domain::store_init::{StoreConnectError, StoreConnector};

use super::pool::{DbPool, PoolConfig, PoolError};

/// Opens the PostgreSQL pool used as the store handle.
#[derive(Debug, Clone)]
pub struct DieselStoreConnector {
    config: PoolConfig,
}

impl DieselStoreConnector {
    /// Connector that builds pools from `config`.
    pub fn new(config: PoolConfig) -> Self {
        Self { config }
    }
}

fn map_connection_error(error: &ConnectionError) -> StoreConnectError {
    match error {
        ConnectionError::InvalidConnectionUrl(message) => {
            StoreConnectError::configuration(message.clone())
        }
        other => StoreConnectError::connect(other.to_string()),
    }
}

fn map_pool_error(error: PoolError) -> StoreConnectError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StoreConnectError::connect(message)
        }
    }
}

#[async_trait]
impl StoreConnector for DieselStoreConnector {
    type Handle = DbPool;

    async fn connect(&self) -> Result<DbPool, StoreConnectError> {
        let conn = AsyncPgConnection::establish(self.config.database_url())
            .await
            .map_err(|err| map_connection_error(&err))?;
        drop(conn);
        debug!("store accepted a direct connection; building pool");

        DbPool::new(self.config.clone())
            .await
            .map_err(map_pool_error)
    }
}
