//! Registry client against a mocked registry.

use mockito::{Matcher, Server, ServerGuard};
use roster_employees::EmployeeError;
use roster_employees::client::RegistryClient;
use roster_employees::model::CreateEmployee;
use roster_employees::query::{QueryEngine, TOP_EARNERS_LIMIT};
use roster_kernel::domain::config::RegistryConfig;
use serde_json::json;

const PATH: &str = "/api/v1/employee";

fn client_for(server: &ServerGuard) -> RegistryClient {
    client_with_retries(server, 0)
}

fn client_with_retries(server: &ServerGuard, retries: u8) -> RegistryClient {
    let config = RegistryConfig {
        base_url: format!("{}{PATH}", server.url()),
        timeout_seconds: 2,
        connect_timeout_seconds: 1,
        retries,
    };
    RegistryClient::new(&config).expect("valid registry config")
}

fn record(id: &str, name: &str, salary: u32) -> serde_json::Value {
    json!({
        "id": id,
        "employee_name": name,
        "employee_salary": salary,
        "employee_age": 30,
        "employee_title": "T",
        "employee_email": format!("{}@co.com", name.to_lowercase()),
    })
}

async fn serve_list(server: &mut ServerGuard, data: serde_json::Value) -> mockito::Mock {
    server
        .mock("GET", PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "data": data, "status": "OK" }).to_string())
        .create_async()
        .await
}

#[tokio::test]
async fn list_all_maps_registry_records() {
    let mut server = Server::new_async().await;
    let mock = serve_list(
        &mut server,
        json!([record("1", "Alice", 100), record("2", "Bob", 200)]),
    )
    .await;

    let employees = client_for(&server).list_all().await.unwrap();

    let names: Vec<&str> = employees.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Alice", "Bob"]);
    assert_eq!(employees[0].email.as_deref(), Some("alice@co.com"));
    mock.assert_async().await;
}

#[tokio::test]
async fn list_all_treats_empty_and_null_data_as_no_employees() {
    let mut server = Server::new_async().await;
    let client = client_for(&server);

    let empty = server.mock("GET", PATH).with_status(200).with_body("").create_async().await;
    assert!(client.list_all().await.unwrap().is_empty());
    empty.remove_async().await;

    let null = server
        .mock("GET", PATH)
        .with_status(200)
        .with_body(r#"{"data": null, "status": "OK"}"#)
        .create_async()
        .await;
    assert!(client.list_all().await.unwrap().is_empty());
    null.remove_async().await;

    let _absent = server
        .mock("GET", PATH)
        .with_status(200)
        .with_body(r#"{"status": "OK"}"#)
        .create_async()
        .await;
    assert!(client.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_all_surfaces_upstream_failures() {
    let mut server = Server::new_async().await;
    let _mock = server.mock("GET", PATH).with_status(503).create_async().await;

    let err = client_for(&server).list_all().await.unwrap_err();
    assert!(matches!(err, EmployeeError::Upstream { status: 503, .. }));
}

#[tokio::test]
async fn list_all_surfaces_rate_limiting() {
    let mut server = Server::new_async().await;
    let _mock = server.mock("GET", PATH).with_status(429).create_async().await;

    let err = client_for(&server).list_all().await.unwrap_err();
    assert!(matches!(err, EmployeeError::Upstream { status: 429, .. }));
}

#[tokio::test]
async fn list_all_rejects_malformed_json() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", PATH)
        .with_status(200)
        .with_body(r#"{"data": [{"id": "1"}]}"#)
        .create_async()
        .await;

    let err = client_for(&server).list_all().await.unwrap_err();
    assert!(matches!(err, EmployeeError::Decode { .. }));
}

#[tokio::test]
async fn list_all_rejects_duplicate_ids() {
    let mut server = Server::new_async().await;
    let _mock =
        serve_list(&mut server, json!([record("7", "Ann", 1), record("7", "Ben", 2)])).await;

    let err = client_for(&server).list_all().await.unwrap_err();
    assert!(matches!(err, EmployeeError::ContractViolation { .. }));
}

#[tokio::test]
async fn duplicate_ids_fail_every_read_of_the_listing() {
    let mut server = Server::new_async().await;
    let _mock =
        serve_list(&mut server, json!([record("1", "A", 10), record("1", "B", 20)])).await;

    let engine = QueryEngine::new(client_for(&server));

    let lookup = engine.find_by_id("1").await.unwrap_err();
    assert!(matches!(lookup, EmployeeError::ContractViolation { .. }));
    assert!(lookup.to_string().contains("duplicate employee id '1'"));

    let highest = engine.highest_salary().await.unwrap_err();
    assert!(matches!(highest, EmployeeError::ContractViolation { .. }));
    assert!(matches!(engine.search_by_name("a").await, Err(EmployeeError::ContractViolation { .. })));
}

#[tokio::test]
async fn http_errors_are_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server.mock("GET", PATH).with_status(500).expect(1).create_async().await;

    let err = client_with_retries(&server, 1).list_all().await.unwrap_err();

    assert!(matches!(err, EmployeeError::Upstream { status: 500, .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_registry_is_a_fetch_error_even_with_a_retry() {
    // Port 9 (discard) is closed on test hosts; the connection is refused.
    let config = RegistryConfig {
        base_url: "http://127.0.0.1:9/api/v1/employee".to_owned(),
        timeout_seconds: 2,
        connect_timeout_seconds: 1,
        retries: 1,
    };
    let client = RegistryClient::new(&config).unwrap();

    let err = client.list_all().await.unwrap_err();
    assert!(matches!(err, EmployeeError::Fetch { .. }));
}

#[tokio::test]
async fn engine_queries_over_the_registry() {
    let mut server = Server::new_async().await;
    let rows: Vec<serde_json::Value> =
        (0..12u32).map(|i| record(&i.to_string(), &format!("E{i}"), i)).collect();
    // One fetch per query, nothing cached.
    let mock = server
        .mock("GET", PATH)
        .with_status(200)
        .with_body(json!({ "data": rows, "status": "OK" }).to_string())
        .expect(4)
        .create_async()
        .await;

    let engine = QueryEngine::new(client_for(&server));

    let top = engine.top_earners(TOP_EARNERS_LIMIT).await.unwrap();
    assert_eq!(top, ["E11", "E10", "E9", "E8", "E7", "E6", "E5", "E4", "E3", "E2"]);
    assert_eq!(engine.highest_salary().await.unwrap(), 11);
    assert_eq!(engine.find_by_id("4").await.unwrap().map(|e| e.name), Some("E4".to_owned()));
    assert!(engine.find_by_id("404").await.unwrap().is_none());

    mock.assert_async().await;
}

#[tokio::test]
async fn search_and_lookup_scenarios() {
    let mut server = Server::new_async().await;
    let _mock = serve_list(
        &mut server,
        json!([
            record("1", "Anna", 50),
            record("2", "annette", 60),
            record("3", "Beth", 70),
            record("42", "Carol", 70),
        ]),
    )
    .await;

    let engine = QueryEngine::new(client_for(&server));

    let found: Vec<String> =
        engine.search_by_name("Ann").await.unwrap().into_iter().map(|e| e.name).collect();
    assert_eq!(found, ["Anna", "annette"]);
    assert_eq!(engine.find_by_id("42").await.unwrap().map(|e| e.name), Some("Carol".to_owned()));
}

#[tokio::test]
async fn create_posts_exactly_four_fields() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "name": "Zed", "salary": 500, "age": 35, "title": "Lead"
        })))
        .with_status(200)
        .with_body(
            json!({
                "data": record("99", "Zed", 500),
                "status": "Successfully processed request.",
                "error": null
            })
            .to_string(),
        )
        .create_async()
        .await;

    let input = CreateEmployee { name: "Zed".into(), salary: 500, age: 35, title: "Lead".into() };
    let created = client_for(&server).create(&input).await.unwrap();

    assert_eq!(created.id, "99");
    assert_eq!(created.name, "Zed");
    assert_eq!(created.salary, 500);
    mock.assert_async().await;
}

#[tokio::test]
async fn created_employee_is_found_by_its_new_id() {
    let mut server = Server::new_async().await;
    let input = CreateEmployee { name: "Zed".into(), salary: 500, age: 35, title: "Lead".into() };
    let stored = json!({
        "id": "99",
        "employee_name": "Zed",
        "employee_salary": 500,
        "employee_age": 35,
        "employee_title": "Lead",
        "employee_email": "zed@co.com",
    });

    let _created = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(json!({ "data": stored.clone(), "status": "Successfully processed request." }).to_string())
        .create_async()
        .await;
    let _listing = serve_list(&mut server, json!([record("1", "Ann", 10), stored])).await;

    let client = client_for(&server);
    let created = client.create(&input).await.unwrap();
    let found = QueryEngine::new(client.clone()).find_by_id(&created.id).await.unwrap();

    let found = found.expect("created employee is listed");
    assert_eq!(found.id, "99");
    assert_eq!(found.name, input.name);
    assert_eq!(found.salary, input.salary);
    assert_eq!(found.age, input.age);
    assert_eq!(found.title, input.title);
}

#[tokio::test]
async fn create_without_data_is_a_contract_violation() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(r#"{"data": null, "status": "Successfully processed request."}"#)
        .create_async()
        .await;

    let input = CreateEmployee { name: "Zed".into(), salary: 1, age: 35, title: String::new() };
    let err = client_for(&server).create(&input).await.unwrap_err();
    assert!(matches!(err, EmployeeError::ContractViolation { .. }));
}

#[tokio::test]
async fn create_reports_registry_rejections() {
    let mut server = Server::new_async().await;
    let client = client_for(&server);
    let input = CreateEmployee { name: "Zed".into(), salary: 1, age: 35, title: String::new() };

    let refused = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(r#"{"data": null, "status": "Failed", "error": "salary too low"}"#)
        .create_async()
        .await;
    let err = client.create(&input).await.unwrap_err();
    assert!(matches!(err, EmployeeError::Rejected { status: 200, ref message, .. } if message == "salary too low"));
    refused.remove_async().await;

    let _limited = server
        .mock("POST", PATH)
        .with_status(429)
        .with_body(r#"{"status": "Too Many Requests", "error": "slow down"}"#)
        .create_async()
        .await;
    let err = client.create(&input).await.unwrap_err();
    assert!(matches!(err, EmployeeError::Rejected { status: 429, ref message, .. } if message == "slow down"));
}

#[tokio::test]
async fn create_validates_before_calling_the_registry() {
    let mut server = Server::new_async().await;
    let mock = server.mock("POST", PATH).expect(0).create_async().await;

    let input = CreateEmployee { name: " ".into(), salary: 1, age: 35, title: String::new() };
    let err = client_for(&server).create(&input).await.unwrap_err();

    assert!(matches!(err, EmployeeError::Validation { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn delete_sends_the_id_as_name() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", PATH)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({ "name": "abc-123" })))
        .with_status(200)
        .create_async()
        .await;

    assert!(client_for(&server).delete("abc-123").await.unwrap());
    mock.assert_async().await;
}

#[tokio::test]
async fn delete_reports_the_registry_flag() {
    let mut server = Server::new_async().await;
    let client = client_for(&server);

    let refused = server
        .mock("DELETE", PATH)
        .with_status(200)
        .with_body(r#"{"data": false, "status": "OK"}"#)
        .create_async()
        .await;
    assert!(!client.delete("ghost").await.unwrap());
    refused.remove_async().await;

    let unknown = server.mock("DELETE", PATH).with_status(404).create_async().await;
    assert!(!client.delete("ghost").await.unwrap());
    unknown.remove_async().await;

    let _broken = server.mock("DELETE", PATH).with_status(500).create_async().await;
    let err = client.delete("ghost").await.unwrap_err();
    assert!(matches!(err, EmployeeError::Rejected { status: 500, .. }));
}

#[tokio::test]
async fn rejection_without_a_body_uses_the_status_reason() {
    let mut server = Server::new_async().await;
    let _mock = server.mock("POST", PATH).with_status(500).create_async().await;

    let input = CreateEmployee { name: "Zed".into(), salary: 1, age: 35, title: String::new() };
    let err = client_for(&server).create(&input).await.unwrap_err();

    assert!(matches!(
        err,
        EmployeeError::Rejected { status: 500, ref message, .. } if message == "Internal Server Error"
    ));
}
