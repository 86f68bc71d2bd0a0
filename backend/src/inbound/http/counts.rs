//! Dashboard record totals.
//!
//! ```text
//! GET /api/counts -> {"cargos": 4, "funcionarios": 12, "relatorios": null}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::RecordCountsQueryError;
use crate::domain::{Error, RecordCounts};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Row counts per table; `relatorios` is `null` when that table is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CountsBody {
    pub cargos: i64,
    pub funcionarios: i64,
    pub relatorios: Option<i64>,
}

impl From<RecordCounts> for CountsBody {
    fn from(value: RecordCounts) -> Self {
        Self {
            cargos: value.positions,
            funcionarios: value.employees,
            relatorios: value.reports,
        }
    }
}

fn map_query_error(err: RecordCountsQueryError) -> Error {
    match err {
        RecordCountsQueryError::Connection { message } => Error::service_unavailable(message),
        RecordCountsQueryError::Query { message } => Error::internal(message),
    }
}

/// Count positions, employees and reports.
#[utoipa::path(
    get,
    path = "/api/counts",
    responses(
        (status = 200, description = "Record totals", body = CountsBody),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["counts"],
    operation_id = "recordCounts"
)]
#[get("/counts")]
pub async fn record_counts(state: web::Data<HttpState>) -> ApiResult<web::Json<CountsBody>> {
    let counts = state.counts.counts().await.map_err(map_query_error)?;
    Ok(web::Json(counts.into()))
}
