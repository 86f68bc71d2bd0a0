//! PostgreSQL-backed `EmployeeRepository`.
//!
//! The CPF digits unique index and the `cargo_id` foreign key are enforced by the
//! database; violations come back as typed port errors.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EmployeeRepository, EmployeeRepositoryError};
use crate::domain::{Employee, EmployeeDraft, EmployeeFilter, EmployeeId};

use super::diesel_error_mapping::{
    ConstraintViolation, constraint_violation, contains_pattern, map_diesel_error, map_pool_error,
};
use super::models::{EmployeeRow, EmployeeWrite};
use super::pool::{DbPool, PoolError};
use super::schema::{cargos, funcionarios};

/// Diesel-backed implementation of the `EmployeeRepository` port.
#[derive(Clone)]
pub struct DieselEmployeeRepository {
    pool: DbPool,
}

impl DieselEmployeeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> EmployeeRepositoryError {
    map_pool_error(error, EmployeeRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> EmployeeRepositoryError {
    map_diesel_error(
        error,
        EmployeeRepositoryError::query,
        EmployeeRepositoryError::connection,
    )
}

/// Map a failed insert or update of `draft`.
fn write_error(error: diesel::result::Error, draft: &EmployeeDraft) -> EmployeeRepositoryError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::Unique) => {
            EmployeeRepositoryError::duplicate_cpf(draft.cpf().as_str())
        }
        Some(ConstraintViolation::ForeignKey) => {
            EmployeeRepositoryError::unknown_position(draft.position_id().get())
        }
        None => diesel_error(error),
    }
}

#[async_trait]
impl EmployeeRepository for DieselEmployeeRepository {
    async fn list(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<(EmployeeRow, String, BigDecimal)> = funcionarios::table
            .inner_join(cargos::table)
            .filter(funcionarios::nome.ilike(contains_pattern(&filter.name)))
            .filter(funcionarios::cpf.ilike(contains_pattern(&filter.cpf)))
            .order(funcionarios::id.desc())
            .select((EmployeeRow::as_select(), cargos::nome, cargos::salario))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(row, position_name, position_salary)| {
                row.into_employee(position_name, position_salary)
            })
            .collect())
    }

    async fn create(&self, draft: &EmployeeDraft) -> Result<EmployeeId, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let write = EmployeeWrite::from(draft);

        let id: i64 = diesel::insert_into(funcionarios::table)
            .values(&write)
            .returning(funcionarios::id)
            .get_result(&mut conn)
            .await
            .map_err(|error| write_error(error, draft))?;

        Ok(EmployeeId::new(id))
    }

    async fn update(
        &self,
        id: EmployeeId,
        draft: &EmployeeDraft,
    ) -> Result<bool, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let write = EmployeeWrite::from(draft);

        let updated = diesel::update(funcionarios::table.find(id.get()))
            .set(&write)
            .execute(&mut conn)
            .await
            .map_err(|error| write_error(error, draft))?;

        Ok(updated > 0)
    }

    async fn delete(&self, id: EmployeeId) -> Result<bool, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let deleted = diesel::delete(funcionarios::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(deleted > 0)
    }
}
