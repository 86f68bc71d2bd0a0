//! Shared helpers for backend integration tests that need a real PostgreSQL.
//!
//! Integration tests compile as separate crates, so helpers live here and are
//! pulled in with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;
pub mod pg_embed;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{create_reports_table, provision_migrated_database};
pub use pg_embed::shared_cluster;
