//! Port for job position ("cargo") persistence.

use async_trait::async_trait;

use crate::domain::{Position, PositionDraft, PositionId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by position repository adapters.
    pub enum PositionRepositoryError {
        /// Repository connection could not be obtained.
        Connection { message: String } =>
            "position repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "position repository query failed: {message}",
        /// Employees still reference the position, so it cannot be removed.
        InUse { id: i64 } =>
            "position {id} is referenced by employees",
    }
}

/// Storage for job positions.
///
/// `update` and `delete` report whether a row matched; a `false` return is
/// the caller's "not found".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PositionRepository: Send + Sync {
    /// Positions whose name contains `name_fragment` (case-insensitive),
    /// newest first. An empty fragment matches every row.
    async fn list(&self, name_fragment: &str) -> Result<Vec<Position>, PositionRepositoryError>;

    /// Insert a position and return its identifier.
    async fn create(&self, draft: &PositionDraft) -> Result<PositionId, PositionRepositoryError>;

    /// Replace every field of an existing position.
    async fn update(
        &self,
        id: PositionId,
        draft: &PositionDraft,
    ) -> Result<bool, PositionRepositoryError>;

    /// Remove a position.
    ///
    /// Fails with [`PositionRepositoryError::InUse`] while employees
    /// reference it.
    async fn delete(&self, id: PositionId) -> Result<bool, PositionRepositoryError>;
}

/// Fixture repository: empty listings, every write succeeds with id `1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePositionRepository;

#[async_trait]
impl PositionRepository for FixturePositionRepository {
    async fn list(&self, _name_fragment: &str) -> Result<Vec<Position>, PositionRepositoryError> {
        Ok(Vec::new())
    }

    async fn create(&self, _draft: &PositionDraft) -> Result<PositionId, PositionRepositoryError> {
        Ok(PositionId::new(1))
    }

    async fn update(
        &self,
        _id: PositionId,
        _draft: &PositionDraft,
    ) -> Result<bool, PositionRepositoryError> {
        Ok(true)
    }

    async fn delete(&self, _id: PositionId) -> Result<bool, PositionRepositoryError> {
        Ok(true)
    }
}
