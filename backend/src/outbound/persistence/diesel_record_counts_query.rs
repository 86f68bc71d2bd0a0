//! PostgreSQL-backed `RecordCountsQuery`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Bool};
use diesel_async::RunQueryDsl;

use crate::domain::RecordCounts;
use crate::domain::ports::{RecordCountsQuery, RecordCountsQueryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::{DbPool, PoolError};
use super::schema::{cargos, funcionarios};

const REPORTS_TABLE_EXISTS: &str = "SELECT EXISTS (\
     SELECT 1 FROM information_schema.tables \
     WHERE table_schema = current_schema() AND table_name = 'relatorios'\
     ) AS present";

const COUNT_REPORTS: &str = "SELECT COUNT(*) AS total FROM relatorios";

#[derive(QueryableByName)]
struct TableExists {
    #[diesel(sql_type = Bool)]
    present: bool,
}

#[derive(QueryableByName)]
struct RowCount {
    #[diesel(sql_type = BigInt)]
    total: i64,
}

/// Diesel-backed implementation of the `RecordCountsQuery` port.
#[derive(Clone)]
pub struct DieselRecordCountsQuery {
    pool: DbPool,
}

impl DieselRecordCountsQuery {
    /// Create a new query adapter with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> RecordCountsQueryError {
    map_pool_error(error, RecordCountsQueryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> RecordCountsQueryError {
    map_diesel_error(
        error,
        RecordCountsQueryError::query,
        RecordCountsQueryError::connection,
    )
}

#[async_trait]
impl RecordCountsQuery for DieselRecordCountsQuery {
    async fn counts(&self) -> Result<RecordCounts, RecordCountsQueryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let positions: i64 = cargos::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        let employees: i64 = funcionarios::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        let reports_table = diesel::sql_query(REPORTS_TABLE_EXISTS)
            .get_result::<TableExists>(&mut conn)
            .await
            .map_err(diesel_error)?;
        let reports = if reports_table.present {
            let row = diesel::sql_query(COUNT_REPORTS)
                .get_result::<RowCount>(&mut conn)
                .await
                .map_err(diesel_error)?;
            Some(row.total)
        } else {
            None
        };

        Ok(RecordCounts {
            positions,
            employees,
            reports,
        })
    }
}
