//! Employee ("funcionário") API handlers.
//!
//! Creates and updates validate the CPF checksum before anything reaches
//! the repository; an invalid CPF is a 400 and nothing is written.

use actix_web::{HttpResponse, delete, get, post, put, web};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::EmployeeRepositoryError;
use crate::domain::{
    Employee, EmployeeDraft, EmployeeFilter, EmployeeId, EmployeeValidationError, Error,
    PositionId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{CreatedResponse, MessageResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_cpf_error, missing_field_error, non_blank, parse_optional_date,
    parse_optional_id,
};

const NOME: FieldName = FieldName::new("nome");
const CPF: FieldName = FieldName::new("cpf");
const CARGO_ID: FieldName = FieldName::new("cargo_id");
const DATA_NASCIMENTO: FieldName = FieldName::new("data_nascimento");

const NOT_FOUND: &str = "Funcionário não encontrado";

/// Filters for `GET /api/funcionarios`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EmployeeListQuery {
    /// Case-insensitive fragment of the employee name.
    pub nome: Option<String>,
    /// Fragment of the CPF as stored.
    pub cpf: Option<String>,
}

/// Employee as returned by the API, with its position's name and salary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeBody {
    pub id: i64,
    pub nome: String,
    pub data_nascimento: Option<NaiveDate>,
    pub endereco: Option<String>,
    #[schema(example = "529.982.247-25")]
    pub cpf: String,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub cargo_id: i64,
    pub cargo_nome: String,
    #[schema(value_type = String, example = "4200.50")]
    pub cargo_salario: BigDecimal,
}

impl From<Employee> for EmployeeBody {
    fn from(value: Employee) -> Self {
        Self {
            id: value.id.get(),
            nome: value.name,
            data_nascimento: value.birth_date,
            endereco: value.address,
            cpf: value.cpf,
            email: value.email,
            telefone: value.phone,
            cargo_id: value.position_id.get(),
            cargo_nome: value.position_name,
            cargo_salario: value.position_salary,
        }
    }
}

/// Create or replace body for an employee.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct EmployeeRequest {
    pub nome: Option<String>,
    /// Formatted (`529.982.247-25`) or bare digits.
    pub cpf: Option<String>,
    /// JSON integer or numeric string.
    #[schema(value_type = Option<i64>, example = 1)]
    pub cargo_id: Option<Value>,
    /// `YYYY-MM-DD`.
    #[schema(value_type = Option<String>, example = "1990-05-17")]
    pub data_nascimento: Option<String>,
    pub endereco: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,
}

impl TryFrom<EmployeeRequest> for EmployeeDraft {
    type Error = Error;

    fn try_from(value: EmployeeRequest) -> Result<Self, Self::Error> {
        let name = non_blank(value.nome.as_deref()).ok_or_else(|| missing_field_error(NOME))?;
        let cpf = non_blank(value.cpf.as_deref()).ok_or_else(|| missing_field_error(CPF))?;
        let position_id = parse_optional_id(value.cargo_id.as_ref(), CARGO_ID)?
            .ok_or_else(|| missing_field_error(CARGO_ID))?;
        let birth_date = parse_optional_date(value.data_nascimento.as_deref(), DATA_NASCIMENTO)?;

        let draft = Self::new(name, cpf, PositionId::new(position_id))
            .map_err(map_validation_error)?
            .with_birth_date(birth_date)
            .with_address(value.endereco.as_deref())
            .with_email(value.email.as_deref())
            .with_phone(value.telefone.as_deref());
        Ok(draft)
    }
}

fn map_validation_error(err: EmployeeValidationError) -> Error {
    match err {
        EmployeeValidationError::EmptyName => missing_field_error(NOME),
        EmployeeValidationError::EmptyCpf => missing_field_error(CPF),
        EmployeeValidationError::InvalidCpf => invalid_cpf_error(CPF),
    }
}

fn map_repository_error(err: EmployeeRepositoryError) -> Error {
    match err {
        EmployeeRepositoryError::Connection { message } => Error::service_unavailable(message),
        EmployeeRepositoryError::Query { message } => Error::internal(message),
        EmployeeRepositoryError::DuplicateCpf { .. } => Error::conflict("CPF já cadastrado")
            .with_details(json!({ "field": CPF.as_str(), "code": "duplicate_cpf" })),
        EmployeeRepositoryError::UnknownPosition { position_id } => {
            Error::invalid_request("Cargo não encontrado").with_details(json!({
                "field": CARGO_ID.as_str(),
                "value": position_id,
                "code": "unknown_position",
            }))
        }
    }
}

/// List employees with their position, newest first.
#[utoipa::path(
    get,
    path = "/api/funcionarios",
    params(EmployeeListQuery),
    responses(
        (status = 200, description = "Employees", body = [EmployeeBody]),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["funcionarios"],
    operation_id = "listEmployees"
)]
#[get("/funcionarios")]
pub async fn list_employees(
    state: web::Data<HttpState>,
    query: web::Query<EmployeeListQuery>,
) -> ApiResult<web::Json<Vec<EmployeeBody>>> {
    let EmployeeListQuery { nome, cpf } = query.into_inner();
    let filter = EmployeeFilter {
        name: nome.unwrap_or_default(),
        cpf: cpf.unwrap_or_default(),
    };
    let employees = state
        .employees
        .list(&filter)
        .await
        .map_err(map_repository_error)?;
    Ok(web::Json(
        employees.into_iter().map(EmployeeBody::from).collect(),
    ))
}

/// Register an employee.
#[utoipa::path(
    post,
    path = "/api/funcionarios",
    request_body = EmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = CreatedResponse),
        (status = 400, description = "Missing field, invalid CPF or unknown position", body = Error),
        (status = 409, description = "CPF already registered", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["funcionarios"],
    operation_id = "createEmployee"
)]
#[post("/funcionarios")]
pub async fn create_employee(
    state: web::Data<HttpState>,
    payload: web::Json<EmployeeRequest>,
) -> ApiResult<HttpResponse> {
    let draft = EmployeeDraft::try_from(payload.into_inner())?;
    let id = state
        .employees
        .create(&draft)
        .await
        .map_err(map_repository_error)?;
    info!(employee_id = %id, position_id = %draft.position_id(), "employee created");
    Ok(HttpResponse::Created().json(CreatedResponse::new("Funcionário cadastrado", id.get())))
}

/// Replace every field of an employee.
#[utoipa::path(
    put,
    path = "/api/funcionarios/{id}",
    params(("id" = i64, Path, description = "Employee identifier")),
    request_body = EmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = MessageResponse),
        (status = 400, description = "Missing field, invalid CPF or unknown position", body = Error),
        (status = 404, description = "Employee not found", body = Error),
        (status = 409, description = "CPF already registered", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["funcionarios"],
    operation_id = "updateEmployee"
)]
#[put("/funcionarios/{id}")]
pub async fn update_employee(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<EmployeeRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = EmployeeId::new(path.into_inner());
    let draft = EmployeeDraft::try_from(payload.into_inner())?;
    let updated = state
        .employees
        .update(id, &draft)
        .await
        .map_err(map_repository_error)?;
    if !updated {
        return Err(Error::not_found(NOT_FOUND));
    }
    Ok(web::Json(MessageResponse::new("Funcionário atualizado")))
}

/// Delete an employee.
#[utoipa::path(
    delete,
    path = "/api/funcionarios/{id}",
    params(("id" = i64, Path, description = "Employee identifier")),
    responses(
        (status = 200, description = "Employee deleted", body = MessageResponse),
        (status = 404, description = "Employee not found", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["funcionarios"],
    operation_id = "deleteEmployee"
)]
#[delete("/funcionarios/{id}")]
pub async fn delete_employee(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = EmployeeId::new(path.into_inner());
    let deleted = state
        .employees
        .delete(id)
        .await
        .map_err(map_repository_error)?;
    if !deleted {
        return Err(Error::not_found(NOT_FOUND));
    }
    info!(employee_id = %id, "employee deleted");
    Ok(web::Json(MessageResponse::new("Funcionário excluído")))
}

#[cfg(test)]
mod tests;
