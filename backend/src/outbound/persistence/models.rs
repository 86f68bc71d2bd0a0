//! Diesel row models. Internal to the persistence adapters.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::{
    Employee, EmployeeDraft, EmployeeId, Position, PositionDraft, PositionId,
};

use super::schema::{cargos, funcionarios};

/// Row read from `cargos`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cargos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PositionRow {
    pub id: i64,
    pub nome: String,
    pub salario: BigDecimal,
    pub descricao: String,
}

impl From<PositionRow> for Position {
    fn from(row: PositionRow) -> Self {
        Self {
            id: PositionId::new(row.id),
            name: row.nome,
            salary: row.salario,
            description: row.descricao,
        }
    }
}

/// Values written to `cargos` on insert and full replacement.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = cargos)]
pub(crate) struct PositionWrite<'a> {
    pub nome: &'a str,
    pub salario: &'a BigDecimal,
    pub descricao: &'a str,
}

impl<'a> From<&'a PositionDraft> for PositionWrite<'a> {
    fn from(draft: &'a PositionDraft) -> Self {
        Self {
            nome: draft.name(),
            salario: draft.salary(),
            descricao: draft.description(),
        }
    }
}

/// Row read from `funcionarios`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = funcionarios)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EmployeeRow {
    pub id: i64,
    pub nome: String,
    pub data_nascimento: Option<NaiveDate>,
    pub endereco: Option<String>,
    pub cpf: String,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub cargo_id: i64,
}

impl EmployeeRow {
    /// Combine with the joined position columns.
    pub(crate) fn into_employee(self, position_name: String, position_salary: BigDecimal) -> Employee {
        Employee {
            id: EmployeeId::new(self.id),
            name: self.nome,
            birth_date: self.data_nascimento,
            address: self.endereco,
            cpf: self.cpf,
            email: self.email,
            phone: self.telefone,
            position_id: PositionId::new(self.cargo_id),
            position_name,
            position_salary,
        }
    }
}

/// Values written to `funcionarios` on insert and full replacement.
///
/// `None` writes `NULL` so an update clears omitted optional fields.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = funcionarios)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct EmployeeWrite<'a> {
    pub nome: &'a str,
    pub data_nascimento: Option<NaiveDate>,
    pub endereco: Option<&'a str>,
    pub cpf: &'a str,
    pub email: Option<&'a str>,
    pub telefone: Option<&'a str>,
    pub cargo_id: i64,
}

impl<'a> From<&'a EmployeeDraft> for EmployeeWrite<'a> {
    fn from(draft: &'a EmployeeDraft) -> Self {
        Self {
            nome: draft.name(),
            data_nascimento: draft.birth_date(),
            endereco: draft.address(),
            cpf: draft.cpf().as_str(),
            email: draft.email(),
            telefone: draft.phone(),
            cargo_id: draft.position_id().get(),
        }
    }
}
