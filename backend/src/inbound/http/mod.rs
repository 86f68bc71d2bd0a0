//! HTTP inbound adapter exposing REST endpoints.

pub mod counts;
pub mod employees;
pub mod error;
pub mod health;
pub mod positions;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
