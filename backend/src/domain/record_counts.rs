//! Record totals shown on the dashboard.

/// Row counts per table.
///
/// `reports` is `None` when the optional `relatorios` table does not exist
/// in the current schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordCounts {
    /// Stored positions.
    pub positions: i64,
    /// Stored employees.
    pub employees: i64,
    /// Stored reports, when the reports table exists.
    pub reports: Option<i64>,
}
