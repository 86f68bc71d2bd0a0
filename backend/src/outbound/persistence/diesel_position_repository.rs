//! PostgreSQL-backed `PositionRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PositionRepository, PositionRepositoryError};
use crate::domain::{Position, PositionDraft, PositionId};

use super::diesel_error_mapping::{
    ConstraintViolation, constraint_violation, contains_pattern, map_diesel_error, map_pool_error,
};
use super::models::{PositionRow, PositionWrite};
use super::pool::{DbPool, PoolError};
use super::schema::cargos;

/// Diesel-backed implementation of the `PositionRepository` port.
#[derive(Clone)]
pub struct DieselPositionRepository {
    pool: DbPool,
}

impl DieselPositionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> PositionRepositoryError {
    map_pool_error(error, PositionRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> PositionRepositoryError {
    map_diesel_error(
        error,
        PositionRepositoryError::query,
        PositionRepositoryError::connection,
    )
}

#[async_trait]
impl PositionRepository for DieselPositionRepository {
    async fn list(&self, name_fragment: &str) -> Result<Vec<Position>, PositionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<PositionRow> = cargos::table
            .filter(cargos::nome.ilike(contains_pattern(name_fragment)))
            .order(cargos::id.desc())
            .select(PositionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows.into_iter().map(Position::from).collect())
    }

    async fn create(&self, draft: &PositionDraft) -> Result<PositionId, PositionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let write = PositionWrite::from(draft);

        let id: i64 = diesel::insert_into(cargos::table)
            .values(&write)
            .returning(cargos::id)
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(PositionId::new(id))
    }

    async fn update(
        &self,
        id: PositionId,
        draft: &PositionDraft,
    ) -> Result<bool, PositionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let write = PositionWrite::from(draft);

        let updated = diesel::update(cargos::table.find(id.get()))
            .set(&write)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(updated > 0)
    }

    async fn delete(&self, id: PositionId) -> Result<bool, PositionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let deleted = diesel::delete(cargos::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|error| match constraint_violation(&error) {
                Some(ConstraintViolation::ForeignKey) => PositionRepositoryError::in_use(id.get()),
                _ => diesel_error(error),
            })?;

        Ok(deleted > 0)
    }
}
