//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations translate between Diesel row models and domain
//! types and map database failures onto the typed port errors. Row models
//! and the schema stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use assim_backend::outbound::persistence::{DbPool, DieselPositionRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("host=localhost dbname=assim_saude")).await?;
//! let positions = DieselPositionRepository::new(pool);
//! ```

mod diesel_employee_repository;
mod diesel_error_mapping;
mod diesel_position_repository;
mod diesel_record_counts_query;
mod diesel_store_connector;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_employee_repository::DieselEmployeeRepository;
pub use diesel_position_repository::DieselPositionRepository;
pub use diesel_record_counts_query::DieselRecordCountsQuery;
pub use diesel_store_connector::DieselStoreConnector;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError, connection_string};
