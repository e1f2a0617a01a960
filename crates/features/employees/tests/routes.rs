//! Employees routes driven through the router, with the registry mocked.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use mockito::{Matcher, Mock, Server, ServerGuard};
use roster_employees::server::employees_router;
use roster_kernel::domain::config::ApiConfig;
use roster_kernel::server::ApiState;
use serde_json::{Value, json};
use tower::ServiceExt;

const PATH: &str = "/api/v1/employee";

fn app(registry: &str) -> Router {
    let mut config = ApiConfig::default();
    config.registry.base_url = registry.to_owned();
    config.registry.connect_timeout_seconds = 1;

    let slice = roster_employees::init(&config).expect("employees slice");
    let state = ApiState::builder().config(config).register_slice(slice).build().expect("state");

    let (router, _api) = employees_router::<ApiState>().with_state(state).split_for_parts();
    router
}

fn app_for(server: &ServerGuard) -> Router {
    app(&format!("{}{PATH}", server.url()))
}

async fn call(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        },
        None => Body::empty(),
    };

    let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

fn json_of(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("json body")
}

fn record(id: &str, name: &str, salary: u32) -> Value {
    json!({
        "id": id,
        "employee_name": name,
        "employee_salary": salary,
        "employee_age": 30,
        "employee_title": "T",
        "employee_email": null,
    })
}

/// The mock must stay alive for as long as the registry is used.
async fn registry_with(rows: Value) -> (ServerGuard, Mock) {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", PATH)
        .with_status(200)
        .with_body(json!({ "data": rows, "status": "OK" }).to_string())
        .create_async()
        .await;
    (server, mock)
}

#[tokio::test]
async fn list_returns_public_shape() {
    let (server, _mock) = registry_with(json!([record("1", "Alice", 100), record("2", "Bob", 200)])).await;

    let (status, body) = call(app_for(&server), Method::GET, "/api/v1/employees", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_of(&body),
        json!([
            { "id": "1", "name": "Alice", "salary": 100, "age": 30, "title": "T", "email": null },
            { "id": "2", "name": "Bob", "salary": 200, "age": 30, "title": "T", "email": null },
        ])
    );
}

#[tokio::test]
async fn search_route_matches_case_insensitively() {
    let (server, _mock) = registry_with(json!([
        record("1", "Anna", 50),
        record("2", "annette", 60),
        record("3", "Beth", 70),
    ]))
    .await;

    let (status, body) =
        call(app_for(&server), Method::GET, "/api/v1/employees/search/Ann", None).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<String> = json_of(&body)
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(names, ["Anna", "annette"]);
}

#[tokio::test]
async fn lookup_by_id_and_unknown_id() {
    let (server, _mock) = registry_with(json!([record("42", "Carol", 70)])).await;

    let (status, body) = call(app_for(&server), Method::GET, "/api/v1/employees/42", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body)["name"], "Carol");

    let (status, body) = call(app_for(&server), Method::GET, "/api/v1/employees/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_of(&body)["status"], 404);
}

#[tokio::test]
async fn highest_salary_and_top_ten() {
    let rows: Vec<Value> = (0..12u32).map(|i| record(&i.to_string(), &format!("E{i}"), i)).collect();
    let (server, _mock) = registry_with(Value::Array(rows)).await;

    let (status, body) =
        call(app_for(&server), Method::GET, "/api/v1/employees/highestSalary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), json!(11));

    let (status, body) = call(
        app_for(&server),
        Method::GET,
        "/api/v1/employees/topTenHighestEarningEmployeeNames",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_of(&body),
        json!(["E11", "E10", "E9", "E8", "E7", "E6", "E5", "E4", "E3", "E2"])
    );
}

#[tokio::test]
async fn empty_registry_gives_zero_and_nothing() {
    let (server, _mock) = registry_with(json!([])).await;

    let (_, body) =
        call(app_for(&server), Method::GET, "/api/v1/employees/highestSalary", None).await;
    assert_eq!(json_of(&body), json!(0));

    let (_, body) = call(
        app_for(&server),
        Method::GET,
        "/api/v1/employees/topTenHighestEarningEmployeeNames",
        None,
    )
    .await;
    assert_eq!(json_of(&body), json!([]));
}

#[tokio::test]
async fn create_returns_created() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_body(Matcher::Json(json!({ "name": "Zed", "salary": 500, "age": 35, "title": "Lead" })))
        .with_status(200)
        .with_body(json!({ "data": record("99", "Zed", 500), "status": "OK", "error": null }).to_string())
        .create_async()
        .await;

    let (status, body) = call(
        app_for(&server),
        Method::POST,
        "/api/v1/employees",
        Some(json!({ "id": "ignored", "name": "Zed", "salary": 500, "age": 35, "title": "Lead", "email": "zed@co" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json_of(&body)["id"], "99");
    mock.assert_async().await;
}

#[tokio::test]
async fn malformed_create_body_is_a_bad_request() {
    let server = Server::new_async().await;

    let (status, body) = call(
        app_for(&server),
        Method::POST,
        "/api/v1/employees",
        Some(json!({ "name": "Zed", "salary": -5, "age": 35, "title": "Lead" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_of(&body)["status"], 400);

    let (status, _) = call(
        app_for(&server),
        Method::POST,
        "/api/v1/employees",
        Some(json!({ "name": "", "salary": 5, "age": 35, "title": "Lead" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_confirms_or_reports_not_found() {
    let mut server = Server::new_async().await;
    let deleted = server
        .mock("DELETE", PATH)
        .match_body(Matcher::Json(json!({ "name": "abc-123" })))
        .with_status(200)
        .with_body(r#"{"data": true, "status": "OK"}"#)
        .create_async()
        .await;

    let (status, body) =
        call(app_for(&server), Method::DELETE, "/api/v1/employees/abc-123", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "Deleted abc-123");
    deleted.assert_async().await;
    deleted.remove_async().await;

    let _missing = server
        .mock("DELETE", PATH)
        .with_status(200)
        .with_body(r#"{"data": false, "status": "OK"}"#)
        .create_async()
        .await;
    let (status, _) = call(app_for(&server), Method::DELETE, "/api/v1/employees/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn registry_failures_map_to_gateway_errors() {
    let mut server = Server::new_async().await;
    let _mock = server.mock("GET", PATH).with_status(500).create_async().await;

    let (status, body) = call(app_for(&server), Method::GET, "/api/v1/employees", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json_of(&body)["status"], 502);

    let (status, _) = call(
        app("http://127.0.0.1:9/api/v1/employee"),
        Method::GET,
        "/api/v1/employees/highestSalary",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn registry_rate_limit_passes_through() {
    let mut server = Server::new_async().await;
    let _mock = server.mock("GET", PATH).with_status(429).create_async().await;

    let (status, _) = call(app_for(&server), Method::GET, "/api/v1/employees/1", None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}
