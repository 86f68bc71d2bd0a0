//! Job position ("cargo") API handlers.
//!
//! ```text
//! GET /api/cargos?nome=enf
//! POST /api/cargos {"nome":"Enfermeiro","salario":4200.5,"descricao":"Plantão"}
//! PUT /api/cargos/3 {"nome":"Enfermeiro Chefe","salario":"5100.00"}
//! DELETE /api/cargos/3
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::PositionRepositoryError;
use crate::domain::{Error, Position, PositionDraft, PositionId, PositionValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{CreatedResponse, MessageResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    ErrorCode, FieldName, field_error, parse_optional_decimal,
};

const NOME: FieldName = FieldName::new("nome");
const SALARIO: FieldName = FieldName::new("salario");

const NOT_FOUND: &str = "Cargo não encontrado";

/// Filters for `GET /api/cargos`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PositionListQuery {
    /// Case-insensitive fragment of the position name.
    pub nome: Option<String>,
}

/// Position as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PositionBody {
    pub id: i64,
    pub nome: String,
    /// Decimal rendered as a string, e.g. `"4200.50"`.
    #[schema(value_type = String, example = "4200.50")]
    pub salario: BigDecimal,
    pub descricao: String,
}

impl From<Position> for PositionBody {
    fn from(value: Position) -> Self {
        Self {
            id: value.id.get(),
            nome: value.name,
            salario: value.salary,
            descricao: value.description,
        }
    }
}

/// Create or replace body for a position.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct PositionRequest {
    pub nome: Option<String>,
    /// JSON number or numeric string.
    #[schema(value_type = Option<String>, example = "4200.50")]
    pub salario: Option<Value>,
    pub descricao: Option<String>,
}

impl TryFrom<PositionRequest> for PositionDraft {
    type Error = Error;

    fn try_from(value: PositionRequest) -> Result<Self, Self::Error> {
        let salary = parse_optional_decimal(value.salario.as_ref(), SALARIO)?;
        Self::try_from_parts(value.nome.as_deref(), salary, value.descricao.as_deref())
            .map_err(map_validation_error)
    }
}

fn map_validation_error(err: PositionValidationError) -> Error {
    match err {
        PositionValidationError::EmptyName => field_error(
            NOME,
            ErrorCode::MissingField,
            "Nome e salário são obrigatórios.",
        ),
        PositionValidationError::MissingSalary => field_error(
            SALARIO,
            ErrorCode::MissingField,
            "Nome e salário são obrigatórios.",
        ),
        PositionValidationError::NegativeSalary => field_error(
            SALARIO,
            ErrorCode::NegativeSalary,
            "Salário não pode ser negativo.",
        ),
    }
}

fn map_repository_error(err: PositionRepositoryError) -> Error {
    match err {
        PositionRepositoryError::Connection { message } => Error::service_unavailable(message),
        PositionRepositoryError::Query { message } => Error::internal(message),
        PositionRepositoryError::InUse { .. } => Error::conflict(
            "Não é possível excluir este cargo: existem funcionários vinculados.",
        ),
    }
}

/// List positions, newest first.
#[utoipa::path(
    get,
    path = "/api/cargos",
    params(PositionListQuery),
    responses(
        (status = 200, description = "Positions", body = [PositionBody]),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cargos"],
    operation_id = "listPositions"
)]
#[get("/cargos")]
pub async fn list_positions(
    state: web::Data<HttpState>,
    query: web::Query<PositionListQuery>,
) -> ApiResult<web::Json<Vec<PositionBody>>> {
    let fragment = query.into_inner().nome.unwrap_or_default();
    let positions = state
        .positions
        .list(&fragment)
        .await
        .map_err(map_repository_error)?;
    Ok(web::Json(
        positions.into_iter().map(PositionBody::from).collect(),
    ))
}

/// Create a position.
#[utoipa::path(
    post,
    path = "/api/cargos",
    request_body = PositionRequest,
    responses(
        (status = 201, description = "Position created", body = CreatedResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cargos"],
    operation_id = "createPosition"
)]
#[post("/cargos")]
pub async fn create_position(
    state: web::Data<HttpState>,
    payload: web::Json<PositionRequest>,
) -> ApiResult<HttpResponse> {
    let draft = PositionDraft::try_from(payload.into_inner())?;
    let id = state
        .positions
        .create(&draft)
        .await
        .map_err(map_repository_error)?;
    info!(position_id = %id, "position created");
    Ok(HttpResponse::Created().json(CreatedResponse::new("Cargo criado", id.get())))
}

/// Replace every field of a position.
#[utoipa::path(
    put,
    path = "/api/cargos/{id}",
    params(("id" = i64, Path, description = "Position identifier")),
    request_body = PositionRequest,
    responses(
        (status = 200, description = "Position updated", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Position not found", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cargos"],
    operation_id = "updatePosition"
)]
#[put("/cargos/{id}")]
pub async fn update_position(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<PositionRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = PositionId::new(path.into_inner());
    let draft = PositionDraft::try_from(payload.into_inner())?;
    let updated = state
        .positions
        .update(id, &draft)
        .await
        .map_err(map_repository_error)?;
    if !updated {
        return Err(Error::not_found(NOT_FOUND));
    }
    Ok(web::Json(MessageResponse::new("Cargo atualizado")))
}

/// Delete a position that no employee references.
#[utoipa::path(
    delete,
    path = "/api/cargos/{id}",
    params(("id" = i64, Path, description = "Position identifier")),
    responses(
        (status = 200, description = "Position deleted", body = MessageResponse),
        (status = 404, description = "Position not found", body = Error),
        (status = 409, description = "Employees still reference the position", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cargos"],
    operation_id = "deletePosition"
)]
#[delete("/cargos/{id}")]
pub async fn delete_position(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = PositionId::new(path.into_inner());
    let deleted = state
        .positions
        .delete(id)
        .await
        .map_err(map_repository_error)?;
    if !deleted {
        return Err(Error::not_found(NOT_FOUND));
    }
    info!(position_id = %id, "position deleted");
    Ok(web::Json(MessageResponse::new("Cargo excluído")))
}

#[cfg(test)]
mod tests;
