//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod employee_repository;
mod position_repository;
mod record_counts_query;

#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
pub use employee_repository::{
    EmployeeRepository, EmployeeRepositoryError, FixtureEmployeeRepository,
};
#[cfg(test)]
pub use position_repository::MockPositionRepository;
pub use position_repository::{
    FixturePositionRepository, PositionRepository, PositionRepositoryError,
};
#[cfg(test)]
pub use record_counts_query::MockRecordCountsQuery;
pub use record_counts_query::{
    FixtureRecordCountsQuery, RecordCountsQuery, RecordCountsQueryError,
};
