//! Tests for position API handlers.

use std::str::FromStr;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    FixtureEmployeeRepository, FixtureRecordCountsQuery, MockPositionRepository,
};

fn decimal(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).expect("decimal literal")
}

fn state_with(positions: MockPositionRepository) -> HttpState {
    HttpState::new(
        Arc::new(positions),
        Arc::new(FixtureEmployeeRepository),
        Arc::new(FixtureRecordCountsQuery::default()),
    )
}

fn test_app(
    positions: MockPositionRepository,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state_with(positions)))
        .service(
            web::scope("/api")
                .service(list_positions)
                .service(create_position)
                .service(update_position)
                .service(delete_position),
        )
}

async fn send(
    positions: MockPositionRepository,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(positions)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).expect("JSON body");
    (status, value)
}

#[rstest]
#[actix_web::test]
async fn list_passes_the_name_filter_and_renders_rows() {
    let mut positions = MockPositionRepository::new();
    positions
        .expect_list()
        .withf(|fragment: &str| fragment == "enf")
        .times(1)
        .returning(|_| {
            Ok(vec![Position {
                id: PositionId::new(2),
                name: "Enfermeiro".into(),
                salary: decimal("4200.50"),
                description: "Plantão".into(),
            }])
        });

    let (status, body) = send(
        positions,
        actix_test::TestRequest::get().uri("/api/cargos?nome=enf"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "id": 2, "nome": "Enfermeiro", "salario": "4200.50", "descricao": "Plantão" }])
    );
}

#[rstest]
#[actix_web::test]
async fn list_without_filter_matches_everything() {
    let mut positions = MockPositionRepository::new();
    positions
        .expect_list()
        .withf(|fragment: &str| fragment.is_empty())
        .times(1)
        .returning(|_| Ok(Vec::new()));

    let (status, body) = send(positions, actix_test::TestRequest::get().uri("/api/cargos")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[rstest]
#[actix_web::test]
async fn create_returns_201_with_the_new_id() {
    let mut positions = MockPositionRepository::new();
    positions
        .expect_create()
        .withf(|draft: &PositionDraft| {
            draft.name() == "Médico"
                && draft.salary() == &decimal("12000.00")
                && draft.description().is_empty()
        })
        .times(1)
        .returning(|_| Ok(PositionId::new(7)));

    let (status, body) = send(
        positions,
        actix_test::TestRequest::post()
            .uri("/api/cargos")
            .set_json(json!({ "nome": "Médico", "salario": 12000.00 })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "mensagem": "Cargo criado", "id": 7 }));
}

#[rstest]
#[case(json!({ "salario": 1000 }), "nome")]
#[case(json!({ "nome": "  ", "salario": 1000 }), "nome")]
#[case(json!({ "nome": "Auxiliar" }), "salario")]
#[case(json!({ "nome": "Auxiliar", "salario": null }), "salario")]
#[actix_web::test]
async fn create_requires_name_and_salary(#[case] payload: Value, #[case] field: &str) {
    let mut positions = MockPositionRepository::new();
    positions.expect_create().never();

    let (status, body) = send(
        positions,
        actix_test::TestRequest::post()
            .uri("/api/cargos")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Nome e salário são obrigatórios."));
    assert_eq!(body["details"]["field"], json!(field));
}

#[rstest]
#[actix_web::test]
async fn create_rejects_non_numeric_salary() {
    let mut positions = MockPositionRepository::new();
    positions.expect_create().never();

    let (status, body) = send(
        positions,
        actix_test::TestRequest::post()
            .uri("/api/cargos")
            .set_json(json!({ "nome": "Auxiliar", "salario": "mil" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], json!("invalid_number"));
}

#[rstest]
#[case(true, StatusCode::OK)]
#[case(false, StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn update_reports_missing_rows(#[case] matched: bool, #[case] expected: StatusCode) {
    let mut positions = MockPositionRepository::new();
    positions
        .expect_update()
        .withf(|id: &PositionId, draft: &PositionDraft| {
            *id == PositionId::new(3) && draft.description() == "Chefia"
        })
        .times(1)
        .returning(move |_, _| Ok(matched));

    let (status, body) = send(
        positions,
        actix_test::TestRequest::put().uri("/api/cargos/3").set_json(json!({
            "nome": "Enfermeiro Chefe",
            "salario": "5100.00",
            "descricao": "Chefia"
        })),
    )
    .await;

    assert_eq!(status, expected);
    if matched {
        assert_eq!(body, json!({ "mensagem": "Cargo atualizado" }));
    } else {
        assert_eq!(body["message"], json!("Cargo não encontrado"));
    }
}

#[rstest]
#[actix_web::test]
async fn delete_of_referenced_position_is_a_conflict() {
    let mut positions = MockPositionRepository::new();
    positions
        .expect_delete()
        .times(1)
        .returning(|id| Err(PositionRepositoryError::in_use(id.get())));

    let (status, body) = send(
        positions,
        actix_test::TestRequest::delete().uri("/api/cargos/4"),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], json!("conflict"));
    assert_eq!(
        body["message"],
        json!("Não é possível excluir este cargo: existem funcionários vinculados.")
    );
}

#[rstest]
#[case(true, StatusCode::OK)]
#[case(false, StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn delete_reports_missing_rows(#[case] matched: bool, #[case] expected: StatusCode) {
    let mut positions = MockPositionRepository::new();
    positions
        .expect_delete()
        .times(1)
        .returning(move |_| Ok(matched));

    let (status, _) = send(
        positions,
        actix_test::TestRequest::delete().uri("/api/cargos/9"),
    )
    .await;

    assert_eq!(status, expected);
}

#[rstest]
#[case(PositionRepositoryError::connection("refused"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(PositionRepositoryError::query("syntax"), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn store_failures_map_to_server_errors(
    #[case] failure: PositionRepositoryError,
    #[case] expected: StatusCode,
) {
    let mut positions = MockPositionRepository::new();
    positions
        .expect_list()
        .times(1)
        .returning(move |_| Err(failure.clone()));

    let (status, _) = send(positions, actix_test::TestRequest::get().uri("/api/cargos")).await;

    assert_eq!(status, expected);
}
