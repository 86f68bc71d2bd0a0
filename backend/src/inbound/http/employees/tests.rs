//! Tests for employee API handlers.

use std::str::FromStr;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    FixturePositionRepository, FixtureRecordCountsQuery, MockEmployeeRepository,
};

const VALID_CPF: &str = "529.982.247-25";

fn test_app(
    employees: MockEmployeeRepository,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(
        Arc::new(FixturePositionRepository),
        Arc::new(employees),
        Arc::new(FixtureRecordCountsQuery::default()),
    );
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api")
            .service(list_employees)
            .service(create_employee)
            .service(update_employee)
            .service(delete_employee),
    )
}

async fn send(
    employees: MockEmployeeRepository,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(employees)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).expect("JSON body");
    (status, value)
}

#[fixture]
fn valid_payload() -> Value {
    json!({
        "nome": "Ana Souza",
        "cpf": VALID_CPF,
        "cargo_id": 2,
        "data_nascimento": "1990-05-17",
        "endereco": "Rua das Flores, 10",
        "email": "ana@example.com",
        "telefone": ""
    })
}

fn untouched_repository() -> MockEmployeeRepository {
    let mut employees = MockEmployeeRepository::new();
    employees.expect_create().never();
    employees.expect_update().never();
    employees
}

#[rstest]
#[actix_web::test]
async fn list_forwards_filters_and_joins_position_columns() {
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_list()
        .withf(|filter: &EmployeeFilter| filter.name == "ana" && filter.cpf == "529")
        .times(1)
        .returning(|_| {
            Ok(vec![Employee {
                id: EmployeeId::new(11),
                name: "Ana Souza".into(),
                birth_date: NaiveDate::from_ymd_opt(1990, 5, 17),
                address: None,
                cpf: VALID_CPF.into(),
                email: Some("ana@example.com".into()),
                phone: None,
                position_id: PositionId::new(2),
                position_name: "Enfermeira".into(),
                position_salary: BigDecimal::from_str("4200.50").expect("decimal"),
            }])
        });

    let (status, body) = send(
        employees,
        actix_test::TestRequest::get().uri("/api/funcionarios?nome=ana&cpf=529"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "id": 11,
            "nome": "Ana Souza",
            "data_nascimento": "1990-05-17",
            "endereco": null,
            "cpf": VALID_CPF,
            "email": "ana@example.com",
            "telefone": null,
            "cargo_id": 2,
            "cargo_nome": "Enfermeira",
            "cargo_salario": "4200.50"
        }])
    );
}

#[rstest]
#[actix_web::test]
async fn create_validates_then_persists(valid_payload: Value) {
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_create()
        .withf(|draft: &EmployeeDraft| {
            draft.name() == "Ana Souza"
                && draft.cpf().as_str() == VALID_CPF
                && draft.position_id() == PositionId::new(2)
                && draft.birth_date() == NaiveDate::from_ymd_opt(1990, 5, 17)
                && draft.address() == Some("Rua das Flores, 10")
                && draft.phone().is_none()
        })
        .times(1)
        .returning(|_| Ok(EmployeeId::new(21)));

    let (status, body) = send(
        employees,
        actix_test::TestRequest::post()
            .uri("/api/funcionarios")
            .set_json(valid_payload),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "mensagem": "Funcionário cadastrado", "id": 21 }));
}

#[rstest]
#[case("nome", json!(""))]
#[case("nome", Value::Null)]
#[case("cpf", json!("   "))]
#[case("cargo_id", json!(0))]
#[case("cargo_id", Value::Null)]
#[actix_web::test]
async fn create_reports_the_first_missing_field(
    valid_payload: Value,
    #[case] field: &str,
    #[case] replacement: Value,
) {
    let mut payload = valid_payload;
    payload[field] = replacement;

    let (status, body) = send(
        untouched_repository(),
        actix_test::TestRequest::post()
            .uri("/api/funcionarios")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!(format!("Campo {field} é obrigatório")));
    assert_eq!(body["details"]["field"], json!(field));
    assert_eq!(body["details"]["code"], json!("missing_field"));
}

#[rstest]
#[case("529.982.247-26")]
#[case("111.111.111-11")]
#[case("5299822472")]
#[actix_web::test]
async fn create_rejects_invalid_cpf_before_writing(valid_payload: Value, #[case] cpf: &str) {
    let mut payload = valid_payload;
    payload["cpf"] = json!(cpf);

    let (status, body) = send(
        untouched_repository(),
        actix_test::TestRequest::post()
            .uri("/api/funcionarios")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("CPF inválido"));
    assert_eq!(body["details"]["code"], json!("invalid_cpf"));
}

#[rstest]
#[actix_web::test]
async fn create_rejects_malformed_birth_date(valid_payload: Value) {
    let mut payload = valid_payload;
    payload["data_nascimento"] = json!("17/05/1990");

    let (status, body) = send(
        untouched_repository(),
        actix_test::TestRequest::post()
            .uri("/api/funcionarios")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], json!("data_nascimento"));
}

#[rstest]
#[actix_web::test]
async fn duplicate_cpf_is_a_conflict(valid_payload: Value) {
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_create()
        .times(1)
        .returning(|draft| Err(EmployeeRepositoryError::duplicate_cpf(draft.cpf().as_str())));

    let (status, body) = send(
        employees,
        actix_test::TestRequest::post()
            .uri("/api/funcionarios")
            .set_json(valid_payload),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], json!("CPF já cadastrado"));
}

#[rstest]
#[actix_web::test]
async fn unknown_position_is_a_client_error(valid_payload: Value) {
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_create()
        .times(1)
        .returning(|draft| {
            Err(EmployeeRepositoryError::unknown_position(
                draft.position_id().get(),
            ))
        });

    let (status, body) = send(
        employees,
        actix_test::TestRequest::post()
            .uri("/api/funcionarios")
            .set_json(valid_payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Cargo não encontrado"));
    assert_eq!(body["details"]["value"], json!(2));
}

#[rstest]
#[actix_web::test]
async fn update_validates_cpf_like_create(valid_payload: Value) {
    let mut payload = valid_payload;
    payload["cpf"] = json!("000.000.000-00");

    let (status, _) = send(
        untouched_repository(),
        actix_test::TestRequest::put()
            .uri("/api/funcionarios/5")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[rstest]
#[case(true, StatusCode::OK)]
#[case(false, StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn update_reports_missing_rows(
    valid_payload: Value,
    #[case] matched: bool,
    #[case] expected: StatusCode,
) {
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_update()
        .withf(|id: &EmployeeId, _: &EmployeeDraft| *id == EmployeeId::new(5))
        .times(1)
        .returning(move |_, _| Ok(matched));

    let (status, body) = send(
        employees,
        actix_test::TestRequest::put()
            .uri("/api/funcionarios/5")
            .set_json(valid_payload),
    )
    .await;

    assert_eq!(status, expected);
    if matched {
        assert_eq!(body, json!({ "mensagem": "Funcionário atualizado" }));
    }
}

#[rstest]
#[case(true, StatusCode::OK)]
#[case(false, StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn delete_reports_missing_rows(#[case] matched: bool, #[case] expected: StatusCode) {
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_delete()
        .withf(|id: &EmployeeId| *id == EmployeeId::new(8))
        .times(1)
        .returning(move |_| Ok(matched));

    let (status, body) = send(
        employees,
        actix_test::TestRequest::delete().uri("/api/funcionarios/8"),
    )
    .await;

    assert_eq!(status, expected);
    if !matched {
        assert_eq!(body["message"], json!("Funcionário não encontrado"));
    }
}
