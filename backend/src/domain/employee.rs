//! Employees ("funcionários").
//!
//! An [`EmployeeDraft`] can only be built with a CPF that passed
//! [`Cpf::new`], so every insert or update through the repository port has
//! already been validated.

use std::fmt;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cpf::{Cpf, CpfValidationError};
use super::position::PositionId;

/// Store-assigned employee identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(i64);

impl EmployeeId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stored employee together with the position it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Identifier.
    pub id: EmployeeId,
    /// Full name.
    pub name: String,
    /// Date of birth, when recorded.
    pub birth_date: Option<NaiveDate>,
    /// Postal address.
    pub address: Option<String>,
    /// CPF as stored.
    pub cpf: String,
    /// Contact e-mail.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Referenced position.
    pub position_id: PositionId,
    /// Name of the referenced position.
    pub position_name: String,
    /// Salary of the referenced position.
    pub position_salary: BigDecimal,
}

/// Substring filters for listing employees; empty strings match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    /// Fragment of the employee name.
    pub name: String,
    /// Fragment of the CPF as stored.
    pub cpf: String,
}

/// Reasons an employee payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmployeeValidationError {
    /// Name missing or blank.
    #[error("employee name must not be empty")]
    EmptyName,
    /// CPF missing or blank.
    #[error("employee CPF must not be empty")]
    EmptyCpf,
    /// CPF failed structural or checksum validation.
    #[error("employee CPF is invalid")]
    InvalidCpf,
}

impl From<CpfValidationError> for EmployeeValidationError {
    fn from(value: CpfValidationError) -> Self {
        match value {
            CpfValidationError::Empty => Self::EmptyCpf,
            CpfValidationError::Invalid => Self::InvalidCpf,
        }
    }
}

/// Validated employee fields, ready to insert or to replace a stored row.
///
/// # Examples
/// ```
/// use assim_backend::domain::{EmployeeDraft, EmployeeValidationError, PositionId};
///
/// let draft = EmployeeDraft::new("Ana Souza", "529.982.247-25", PositionId::new(1))
///     .expect("valid employee")
///     .with_email(Some("ana@example.com"));
/// assert_eq!(draft.cpf().as_str(), "529.982.247-25");
/// assert_eq!(draft.email(), Some("ana@example.com"));
///
/// let rejected = EmployeeDraft::new("Ana Souza", "529.982.247-26", PositionId::new(1));
/// assert_eq!(rejected, Err(EmployeeValidationError::InvalidCpf));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    name: String,
    birth_date: Option<NaiveDate>,
    address: Option<String>,
    cpf: Cpf,
    email: Option<String>,
    phone: Option<String>,
    position_id: PositionId,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

impl EmployeeDraft {
    /// Validate the required fields. The name is trimmed; the CPF must pass
    /// checksum validation.
    ///
    /// # Errors
    /// Returns [`EmployeeValidationError`] for a blank name or a blank or
    /// invalid CPF.
    pub fn new(
        name: &str,
        cpf: &str,
        position_id: PositionId,
    ) -> Result<Self, EmployeeValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EmployeeValidationError::EmptyName);
        }
        let cpf = Cpf::new(cpf)?;
        Ok(Self {
            name: name.to_owned(),
            birth_date: None,
            address: None,
            cpf,
            email: None,
            phone: None,
            position_id,
        })
    }

    /// Set the date of birth.
    pub fn with_birth_date(mut self, birth_date: Option<NaiveDate>) -> Self {
        self.birth_date = birth_date;
        self
    }

    /// Set the address; blank values are stored as absent.
    pub fn with_address(mut self, address: Option<&str>) -> Self {
        self.address = non_blank(address);
        self
    }

    /// Set the e-mail; blank values are stored as absent.
    pub fn with_email(mut self, email: Option<&str>) -> Self {
        self.email = non_blank(email);
        self
    }

    /// Set the phone number; blank values are stored as absent.
    pub fn with_phone(mut self, phone: Option<&str>) -> Self {
        self.phone = non_blank(phone);
        self
    }

    /// Full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Date of birth.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    /// Postal address.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Validated CPF.
    pub fn cpf(&self) -> &Cpf {
        &self.cpf
    }

    /// Contact e-mail.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Contact phone number.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Referenced position.
    pub fn position_id(&self) -> PositionId {
        self.position_id
    }
}
