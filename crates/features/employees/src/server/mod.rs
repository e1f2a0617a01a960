//! HTTP surface of the employees slice.

mod handlers;

use crate::Employees;
use crate::error::EmployeeError;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use roster_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Routes of `/api/v1/employees`, ready to merge into the application router.
pub fn employees_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
    ApiState: FromRef<S>,
{
    OpenApiRouter::new()
        .routes(routes!(handlers::list_employees, handlers::create_employee))
        .routes(routes!(handlers::search_employees))
        .routes(routes!(handlers::highest_salary))
        .routes(routes!(handlers::top_earners))
        .routes(routes!(handlers::get_employee, handlers::delete_employee))
}

/// Pulls the registered slice out of the shared state.
impl<S> FromRequestParts<S> for Employees
where
    S: Send + Sync,
    ApiState: FromRef<S>,
{
    type Rejection = EmployeeError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = ApiState::from_ref(state);
        state.try_get_slice::<Self>().cloned().map_err(|err| EmployeeError::Internal {
            message: err.to_string().into(),
            context: Some("Resolving employees slice".into()),
        })
    }
}
