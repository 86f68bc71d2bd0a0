//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies are deserialised leniently (optional fields, raw JSON
//! values for numbers) so that every malformed field surfaces as the same
//! `invalid_request` payload with `details.field` and `details.code`.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde_json::{Value, json};

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidDate,
    InvalidNumber,
    InvalidCpf,
    NegativeSalary,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidDate => "invalid_date",
            Self::InvalidNumber => "invalid_number",
            Self::InvalidCpf => "invalid_cpf",
            Self::NegativeSalary => "negative_salary",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn field_error(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(field, ErrorCode::MissingField, format!("Campo {name} é obrigatório"))
}

pub(crate) fn invalid_cpf_error(field: FieldName) -> Error {
    field_error(field, ErrorCode::InvalidCpf, "CPF inválido")
}

fn invalid_value_error(field: FieldName, code: ErrorCode, value: &str) -> Error {
    let name = field.as_str();
    Error::invalid_request(format!("Campo {name} inválido")).with_details(json!({
        "field": name,
        "value": value,
        "code": code.as_str(),
    }))
}

/// Trimmed text, or `None` when absent or blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Parse an optional `YYYY-MM-DD` date; blank strings count as absent.
pub(crate) fn parse_optional_date(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    non_blank(value)
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| invalid_value_error(field, ErrorCode::InvalidDate, raw))
        })
        .transpose()
}

/// Parse a decimal given as a JSON number or numeric string.
///
/// `null`, a missing field and a blank string are `None`.
pub(crate) fn parse_optional_decimal(
    value: Option<&Value>,
    field: FieldName,
) -> Result<Option<BigDecimal>, Error> {
    let raw = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::String(text)) => match non_blank(Some(text)) {
            Some(trimmed) => trimmed.to_owned(),
            None => return Ok(None),
        },
        Some(other) => other.to_string(),
    };
    BigDecimal::from_str(&raw)
        .map(Some)
        .map_err(|_| invalid_value_error(field, ErrorCode::InvalidNumber, &raw))
}

/// Parse an identifier given as a JSON integer or numeric string.
///
/// `null`, a missing field, a blank string and `0` are `None`, mirroring the
/// "required field" check clients already rely on.
pub(crate) fn parse_optional_id(value: Option<&Value>, field: FieldName) -> Result<Option<i64>, Error> {
    let parsed = match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(number)) => Some(
            number
                .as_i64()
                .ok_or_else(|| invalid_value_error(field, ErrorCode::InvalidNumber, &number.to_string()))?,
        ),
        Some(Value::String(text)) => match non_blank(Some(text)) {
            Some(trimmed) => Some(
                trimmed
                    .parse::<i64>()
                    .map_err(|_| invalid_value_error(field, ErrorCode::InvalidNumber, trimmed))?,
            ),
            None => None,
        },
        Some(other) => {
            return Err(invalid_value_error(
                field,
                ErrorCode::InvalidNumber,
                &other.to_string(),
            ));
        }
    };
    Ok(parsed.filter(|id| *id != 0))
}
