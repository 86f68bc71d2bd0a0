//! Diesel table definitions.
//!
//! These must match `backend/migrations` exactly.

diesel::table! {
    /// Job positions.
    cargos (id) {
        /// Primary key.
        id -> Int8,
        /// Position title.
        nome -> Varchar,
        /// Monthly salary.
        salario -> Numeric,
        /// Free-text description, empty by default.
        descricao -> Text,
    }
}

diesel::table! {
    /// Employees. `cpf` is unique; `cargo_id` references `cargos` with
    /// `ON DELETE RESTRICT`.
    funcionarios (id) {
        /// Primary key.
        id -> Int8,
        /// Full name.
        nome -> Varchar,
        /// Date of birth.
        data_nascimento -> Nullable<Date>,
        /// Postal address.
        endereco -> Nullable<Varchar>,
        /// CPF as submitted.
        cpf -> Varchar,
        /// Contact e-mail.
        email -> Nullable<Varchar>,
        /// Contact phone.
        telefone -> Nullable<Varchar>,
        /// Referenced position.
        cargo_id -> Int8,
    }
}

diesel::joinable!(funcionarios -> cargos (cargo_id));
diesel::allow_tables_to_appear_in_same_query!(cargos, funcionarios);
