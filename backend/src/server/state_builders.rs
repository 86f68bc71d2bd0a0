//! Builders for the HTTP state ports.

use std::sync::Arc;

use actix_web::web;

use assim_backend::domain::ports::{
    EmployeeRepository, FixtureEmployeeRepository, FixturePositionRepository,
    FixtureRecordCountsQuery, PositionRepository, RecordCountsQuery,
};
use assim_backend::inbound::http::state::HttpState;
use assim_backend::outbound::persistence::{
    DieselEmployeeRepository, DieselPositionRepository, DieselRecordCountsQuery,
};

use super::ServerConfig;

/// Port trio handed to [`HttpState::new`].
type Ports = (
    Arc<dyn PositionRepository>,
    Arc<dyn EmployeeRepository>,
    Arc<dyn RecordCountsQuery>,
);

fn fixture_ports() -> Ports {
    (
        Arc::new(FixturePositionRepository),
        Arc::new(FixtureEmployeeRepository),
        Arc::new(FixtureRecordCountsQuery::default()),
    )
}

/// Use `make_ports` when a pool is available, otherwise fall back to the
/// fixture implementations.
fn select_ports<Pool>(pool: &Option<Pool>, make_ports: impl FnOnce(&Pool) -> Ports) -> Ports {
    match pool {
        Some(pool) => make_ports(pool),
        None => fixture_ports(),
    }
}

/// Build the shared HTTP state from the configured pool, or fixtures when
/// no pool is attached.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (positions, employees, counts) = select_ports(&config.db_pool, |pool| {
        (
            Arc::new(DieselPositionRepository::new(pool.clone())),
            Arc::new(DieselEmployeeRepository::new(pool.clone())),
            Arc::new(DieselRecordCountsQuery::new(pool.clone())),
        )
    });
    web::Data::new(HttpState::new(positions, employees, counts))
}
