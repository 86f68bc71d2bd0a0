//! Port for the dashboard record totals.

use async_trait::async_trait;

use crate::domain::RecordCounts;

use super::define_port_error;

define_port_error! {
    /// Errors raised while counting records.
    pub enum RecordCountsQueryError {
        /// Repository connection could not be obtained.
        Connection { message: String } =>
            "record counts connection failed: {message}",
        /// A count query failed.
        Query { message: String } =>
            "record counts query failed: {message}",
    }
}

/// Read-only access to per-table row counts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordCountsQuery: Send + Sync {
    /// Count positions, employees and, when the table exists, reports.
    async fn counts(&self) -> Result<RecordCounts, RecordCountsQueryError>;
}

/// Fixture query returning fixed totals.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecordCountsQuery {
    /// Totals returned by every call.
    pub counts: RecordCounts,
}

#[async_trait]
impl RecordCountsQuery for FixtureRecordCountsQuery {
    async fn counts(&self) -> Result<RecordCounts, RecordCountsQueryError> {
        Ok(self.counts)
    }
}
