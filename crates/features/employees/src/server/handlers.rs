use crate::Employees;
use crate::error::{EmployeeError, ErrorResponse};
use crate::model::{CreateEmployee, Employee};
use crate::query::TOP_EARNERS_LIMIT;
use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use roster_derive::api_handler;
use roster_kernel::domain::constants::EMPLOYEES_TAG;
use tracing::info;

#[api_handler(
    get,
    path = "/api/v1/employees",
    responses(
        (status = OK, description = "Every employee, in registry order", body = [Employee]),
        (status = BAD_GATEWAY, description = "Registry unavailable", body = ErrorResponse),
    ),
    tag = EMPLOYEES_TAG,
)]
pub(super) async fn list_employees(
    employees: Employees,
) -> Result<Json<Vec<Employee>>, EmployeeError> {
    Ok(Json(employees.engine.list_all().await?))
}

#[api_handler(
    get,
    path = "/api/v1/employees/search/{search}",
    params(("search" = String, Path, description = "Case-insensitive name fragment")),
    responses(
        (status = OK, description = "Employees whose name contains the fragment", body = [Employee]),
        (status = BAD_GATEWAY, description = "Registry unavailable", body = ErrorResponse),
    ),
    tag = EMPLOYEES_TAG,
)]
pub(super) async fn search_employees(
    employees: Employees,
    Path(search): Path<String>,
) -> Result<Json<Vec<Employee>>, EmployeeError> {
    Ok(Json(employees.engine.search_by_name(&search).await?))
}

#[api_handler(
    get,
    path = "/api/v1/employees/{id}",
    params(("id" = String, Path, description = "Registry identifier")),
    responses(
        (status = OK, description = "The employee", body = Employee),
        (status = NOT_FOUND, description = "No employee with this id", body = ErrorResponse),
        (status = BAD_GATEWAY, description = "Registry unavailable", body = ErrorResponse),
    ),
    tag = EMPLOYEES_TAG,
)]
pub(super) async fn get_employee(
    employees: Employees,
    Path(id): Path<String>,
) -> Result<Json<Employee>, EmployeeError> {
    employees
        .engine
        .find_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| EmployeeError::not_found(format!("no employee with id '{id}'")))
}

#[api_handler(
    get,
    path = "/api/v1/employees/highestSalary",
    responses(
        (status = OK, description = "Highest salary, 0 when there are no employees", body = u32),
        (status = BAD_GATEWAY, description = "Registry unavailable", body = ErrorResponse),
    ),
    tag = EMPLOYEES_TAG,
)]
pub(super) async fn highest_salary(employees: Employees) -> Result<Json<u32>, EmployeeError> {
    Ok(Json(employees.engine.highest_salary().await?))
}

#[api_handler(
    get,
    path = "/api/v1/employees/topTenHighestEarningEmployeeNames",
    responses(
        (status = OK, description = "Names of the ten best paid employees, highest first", body = [String]),
        (status = BAD_GATEWAY, description = "Registry unavailable", body = ErrorResponse),
    ),
    tag = EMPLOYEES_TAG,
)]
pub(super) async fn top_earners(employees: Employees) -> Result<Json<Vec<String>>, EmployeeError> {
    Ok(Json(employees.engine.top_earners(TOP_EARNERS_LIMIT).await?))
}

#[api_handler(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployee,
    responses(
        (status = CREATED, description = "Employee created by the registry", body = Employee),
        (status = BAD_REQUEST, description = "Malformed body", body = ErrorResponse),
        (status = BAD_GATEWAY, description = "Registry refused the write", body = ErrorResponse),
    ),
    tag = EMPLOYEES_TAG,
)]
pub(super) async fn create_employee(
    employees: Employees,
    payload: Result<Json<CreateEmployee>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), EmployeeError> {
    let Json(input) = payload.map_err(|rejection| EmployeeError::Validation {
        message: rejection.body_text().into(),
        context: Some("Reading create body".into()),
    })?;

    let created = employees.client.create(&input).await?;
    info!(id = %created.id, "Employee created");

    Ok((StatusCode::CREATED, Json(created)))
}

#[api_handler(
    delete,
    path = "/api/v1/employees/{id}",
    params(("id" = String, Path, description = "Registry identifier")),
    responses(
        (status = OK, description = "Confirmation text", body = String),
        (status = NOT_FOUND, description = "The registry deleted nothing", body = ErrorResponse),
        (status = BAD_GATEWAY, description = "Registry refused the delete", body = ErrorResponse),
    ),
    tag = EMPLOYEES_TAG,
)]
pub(super) async fn delete_employee(
    employees: Employees,
    Path(id): Path<String>,
) -> Result<String, EmployeeError> {
    if employees.client.delete(&id).await? {
        info!(id = %id, "Employee deleted");
        Ok(format!("Deleted {id}"))
    } else {
        Err(EmployeeError::not_found(format!("registry did not delete employee '{id}'")))
    }
}
