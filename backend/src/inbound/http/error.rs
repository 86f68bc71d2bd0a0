//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers
//! turn failures into consistent JSON responses and status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Body sent in place of an internal failure's message.
pub const INTERNAL_ERROR_MESSAGE: &str = "Erro interno do servidor";
/// Body sent in place of a store outage's message.
pub const STORE_UNAVAILABLE_MESSAGE: &str = "Banco de dados indisponível";

/// Client-facing copy of `error`.
///
/// Internal failures and store outages get a fixed Portuguese message and
/// lose their details; the trace id survives. Validation, not-found and
/// conflict errors pass through untouched.
fn client_view(error: &Error) -> Error {
    let redacted = match error.code() {
        ErrorCode::InternalError => Error::internal(INTERNAL_ERROR_MESSAGE),
        ErrorCode::ServiceUnavailable => Error::service_unavailable(STORE_UNAVAILABLE_MESSAGE),
        ErrorCode::InvalidRequest | ErrorCode::NotFound | ErrorCode::Conflict => {
            return error.clone();
        }
    };
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        match self.code() {
            ErrorCode::InternalError => {
                error!(message = self.message(), trace_id = ?self.trace_id(), "request failed");
            }
            ErrorCode::ServiceUnavailable => {
                warn!(message = self.message(), trace_id = ?self.trace_id(), "store unavailable");
            }
            ErrorCode::InvalidRequest | ErrorCode::NotFound | ErrorCode::Conflict => {}
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(client_view(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Self::internal(INTERNAL_ERROR_MESSAGE)
    }
}
