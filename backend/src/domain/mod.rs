//! Domain primitives and aggregates.
//!
//! Purpose: define the personnel records (positions and employees), the CPF
//! rules they depend on, and the ports the adapters implement. Nothing here
//! knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - Position / PositionDraft, Employee / EmployeeDraft: records and their
//!   validated write models.
//! - RecordCounts: dashboard totals.
//! - TraceId: request correlation identifier.

pub mod cpf;
pub mod employee;
pub mod error;
pub mod ports;
pub mod position;
pub mod record_counts;
pub mod store_init;
pub mod trace_id;

pub use self::cpf::{Cpf, CpfDigits, CpfValidationError, is_valid_cpf, is_valid_optional_cpf};
pub use self::employee::{
    Employee, EmployeeDraft, EmployeeFilter, EmployeeId, EmployeeValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::position::{Position, PositionDraft, PositionId, PositionValidationError};
pub use self::record_counts::RecordCounts;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use assim_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Funcionário não encontrado"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
