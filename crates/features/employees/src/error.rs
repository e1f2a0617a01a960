use std::borrow::Cow;

/// Failures of the employees slice, from registry transport up to request validation.
#[roster_derive::roster_error]
pub enum EmployeeError {
    /// The registry could not be reached, timed out or the body could not be read.
    #[error("Registry request failed{}: {source}", format_context(.context))]
    Fetch { source: reqwest::Error, context: Option<Cow<'static, str>> },
    /// The registry body is not the JSON it promised.
    #[error("Registry response is malformed{}: {source}", format_context(.context))]
    Decode { source: serde_json::Error, context: Option<Cow<'static, str>> },
    /// A read answered with a non-success status.
    #[error("Registry answered with status {status}{}", format_context(.context))]
    Upstream { status: u16, context: Option<Cow<'static, str>> },
    /// A write was refused, either by status or through the `error` field.
    #[error("Registry rejected the request with status {status}{}: {message}", format_context(.context))]
    Rejected { status: u16, message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// The registry broke a guarantee: a required field is missing or ids repeat.
    #[error("Registry contract violated{}: {message}", format_context(.context))]
    ContractViolation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Registry settings that cannot produce a working client.
    #[error("Invalid registry configuration{}: {message}", format_context(.context))]
    InvalidConfig { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Internal employees error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl EmployeeError {
    pub(crate) fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }

    pub(crate) fn invalid_config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidConfig { message: message.into(), context: None }
    }

    pub(crate) fn contract(message: impl Into<Cow<'static, str>>) -> Self {
        Self::ContractViolation { message: message.into(), context: None }
    }

    #[cfg(feature = "server")]
    pub(crate) fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound { message: message.into(), context: None }
    }
}

#[cfg(feature = "server")]
mod response {
    use super::EmployeeError;
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use roster_derive::api_model;
    use tracing::{error, warn};

    /// Error body shared by every employees route.
    #[api_model]
    pub struct ErrorResponse {
        /// Human readable description
        pub error: String,
        /// HTTP status code, repeated for clients that only read the body
        pub status: u16,
    }

    impl EmployeeError {
        /// HTTP status the facade answers with for this failure.
        #[must_use]
        pub const fn status_code(&self) -> StatusCode {
            match self {
                Self::Validation { .. } => StatusCode::BAD_REQUEST,
                Self::NotFound { .. } => StatusCode::NOT_FOUND,
                Self::Upstream { status: 429, .. } | Self::Rejected { status: 429, .. } => {
                    StatusCode::TOO_MANY_REQUESTS
                },
                Self::Fetch { .. }
                | Self::Decode { .. }
                | Self::Upstream { .. }
                | Self::Rejected { .. }
                | Self::ContractViolation { .. } => StatusCode::BAD_GATEWAY,
                Self::InvalidConfig { .. } | Self::Internal { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                },
            }
        }
    }

    impl IntoResponse for EmployeeError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            let message = self.to_string();

            if status.is_server_error() {
                error!(status = status.as_u16(), error = %message, "Employees request failed");
            } else {
                warn!(status = status.as_u16(), error = %message, "Employees request refused");
            }

            (status, Json(ErrorResponse { error: message, status: status.as_u16() })).into_response()
        }
    }
}

#[cfg(feature = "server")]
pub use response::ErrorResponse;
