//! Response bodies shared by the record endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned after an update or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome.
    #[schema(example = "Cargo atualizado")]
    pub mensagem: String,
}

impl MessageResponse {
    /// Wrap a message.
    pub fn new(mensagem: impl Into<String>) -> Self {
        Self {
            mensagem: mensagem.into(),
        }
    }
}

/// Body returned after a record is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    /// Human-readable outcome.
    #[schema(example = "Cargo criado")]
    pub mensagem: String,
    /// Identifier of the new record.
    pub id: i64,
}

impl CreatedResponse {
    /// Message plus new identifier.
    pub fn new(mensagem: impl Into<String>, id: i64) -> Self {
        Self {
            mensagem: mensagem.into(),
            id,
        }
    }
}
