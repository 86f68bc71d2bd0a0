//! Job positions ("cargos").

use std::fmt;

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store-assigned position identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionId(i64);

impl PositionId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stored job position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Identifier.
    pub id: PositionId,
    /// Position title.
    pub name: String,
    /// Monthly salary.
    pub salary: BigDecimal,
    /// Free-text description; empty when none was given.
    pub description: String,
}

/// Reasons a position payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionValidationError {
    /// Name missing or blank.
    #[error("position name must not be empty")]
    EmptyName,
    /// Salary missing.
    #[error("position salary is required")]
    MissingSalary,
    /// Salary below zero.
    #[error("position salary must not be negative")]
    NegativeSalary,
}

/// Validated position fields, ready to insert or to replace a stored row.
///
/// # Examples
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use assim_backend::domain::{PositionDraft, PositionValidationError};
///
/// let salary = BigDecimal::from_str("4200.50").expect("decimal");
/// let draft = PositionDraft::try_from_parts(Some(" Enfermeiro "), Some(salary), None)
///     .expect("valid position");
/// assert_eq!(draft.name(), "Enfermeiro");
/// assert_eq!(draft.description(), "");
///
/// let missing = PositionDraft::try_from_parts(Some("Médico"), None, None);
/// assert_eq!(missing, Err(PositionValidationError::MissingSalary));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionDraft {
    name: String,
    salary: BigDecimal,
    description: String,
}

impl PositionDraft {
    /// Validate raw request fields. The name is trimmed and the description
    /// defaults to an empty string.
    ///
    /// # Errors
    /// Returns [`PositionValidationError`] when the name is blank or the
    /// salary is missing or negative.
    pub fn try_from_parts(
        name: Option<&str>,
        salary: Option<BigDecimal>,
        description: Option<&str>,
    ) -> Result<Self, PositionValidationError> {
        let name = name
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(PositionValidationError::EmptyName)?;
        let salary = salary.ok_or(PositionValidationError::MissingSalary)?;
        if salary < BigDecimal::zero() {
            return Err(PositionValidationError::NegativeSalary);
        }
        Ok(Self {
            name: name.to_owned(),
            salary,
            description: description.unwrap_or_default().to_owned(),
        })
    }

    /// Position title.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Monthly salary.
    pub fn salary(&self) -> &BigDecimal {
        &self.salary
    }

    /// Description, possibly empty.
    pub fn description(&self) -> &str {
        &self.description
    }
}
