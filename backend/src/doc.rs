//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint and the request/response bodies.
//! Swagger UI serves it in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::counts::CountsBody;
use crate::inbound::http::employees::{EmployeeBody, EmployeeRequest};
use crate::inbound::http::positions::{PositionBody, PositionRequest};
use crate::inbound::http::schemas::{CreatedResponse, MessageResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Assim Saúde personnel API",
        description = "Job positions, employees and record totals."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::positions::list_positions,
        crate::inbound::http::positions::create_position,
        crate::inbound::http::positions::update_position,
        crate::inbound::http::positions::delete_position,
        crate::inbound::http::employees::list_employees,
        crate::inbound::http::employees::create_employee,
        crate::inbound::http::employees::update_employee,
        crate::inbound::http::employees::delete_employee,
        crate::inbound::http::counts::record_counts,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        PositionBody,
        PositionRequest,
        EmployeeBody,
        EmployeeRequest,
        CountsBody,
        CreatedResponse,
        MessageResponse
    )),
    tags(
        (name = "cargos", description = "Job positions"),
        (name = "funcionarios", description = "Employees"),
        (name = "counts", description = "Record totals"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
