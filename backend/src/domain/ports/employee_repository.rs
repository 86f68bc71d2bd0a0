//! Port for employee ("funcionário") persistence.

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeDraft, EmployeeFilter, EmployeeId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by employee repository adapters.
    pub enum EmployeeRepositoryError {
        /// Repository connection could not be obtained.
        Connection { message: String } =>
            "employee repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "employee repository query failed: {message}",
        /// Another employee already holds this CPF.
        DuplicateCpf { cpf: String } =>
            "CPF {cpf} is already registered",
        /// The referenced position does not exist.
        UnknownPosition { position_id: i64 } =>
            "position {position_id} does not exist",
    }
}

/// Storage for employees.
///
/// Listings join the referenced position so callers get its name and salary
/// without a second lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Employees matching `filter`, newest first.
    async fn list(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, EmployeeRepositoryError>;

    /// Insert an employee and return its identifier.
    async fn create(&self, draft: &EmployeeDraft) -> Result<EmployeeId, EmployeeRepositoryError>;

    /// Replace every field of an existing employee; `false` when no row
    /// matched `id`.
    async fn update(
        &self,
        id: EmployeeId,
        draft: &EmployeeDraft,
    ) -> Result<bool, EmployeeRepositoryError>;

    /// Remove an employee; `false` when no row matched `id`.
    async fn delete(&self, id: EmployeeId) -> Result<bool, EmployeeRepositoryError>;
}

/// Fixture repository: empty listings, every write succeeds with id `1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEmployeeRepository;

#[async_trait]
impl EmployeeRepository for FixtureEmployeeRepository {
    async fn list(
        &self,
        _filter: &EmployeeFilter,
    ) -> Result<Vec<Employee>, EmployeeRepositoryError> {
        Ok(Vec::new())
    }

    async fn create(&self, _draft: &EmployeeDraft) -> Result<EmployeeId, EmployeeRepositoryError> {
        Ok(EmployeeId::new(1))
    }

    async fn update(
        &self,
        _id: EmployeeId,
        _draft: &EmployeeDraft,
    ) -> Result<bool, EmployeeRepositoryError> {
        Ok(true)
    }

    async fn delete(&self, _id: EmployeeId) -> Result<bool, EmployeeRepositoryError> {
        Ok(true)
    }
}
