//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{EmployeeRepository, PositionRepository, RecordCountsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub positions: Arc<dyn PositionRepository>,
    pub employees: Arc<dyn EmployeeRepository>,
    pub counts: Arc<dyn RecordCountsQuery>,
}

impl HttpState {
    /// Bundle the port implementations.
    pub fn new(
        positions: Arc<dyn PositionRepository>,
        employees: Arc<dyn EmployeeRepository>,
        counts: Arc<dyn RecordCountsQuery>,
    ) -> Self {
        Self {
            positions,
            employees,
            counts,
        }
    }
}
