//! HTTP client for the upstream employee registry.
//!
//! All three operations target the configured collection URL directly:
//! `GET` lists, `POST` creates and `DELETE` (with a JSON body) deletes.

use crate::error::{EmployeeError, EmployeeErrorExt};
use crate::model::{CreateEmployee, Employee};
use crate::wire::{CreateInput, DeleteInput, RegistryEmployee, RegistryEnvelope};
use fxhash::FxHashSet;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use roster_kernel::domain::config::{MAX_REGISTRY_RETRIES, RegistryConfig};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Thin, cloneable handle to the registry. Holds no state besides the connection pool.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: Client,
    base_url: Url,
    retries: u8,
}

impl RegistryClient {
    /// Builds a client from registry settings.
    ///
    /// # Errors
    /// * [`EmployeeError::InvalidConfig`] if the settings are invalid.
    /// * [`EmployeeError::Fetch`] if the HTTP client cannot be constructed.
    pub fn new(config: &RegistryConfig) -> Result<Self, EmployeeError> {
        let base_url = check_settings(config)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()
            .context("Failed to build registry HTTP client")?;

        Ok(Self { http, base_url, retries: config.retries })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Fetches every employee the registry holds, in registry order.
    ///
    /// An empty body, or a body whose `data` is absent or null, is an empty list.
    ///
    /// # Errors
    /// * [`EmployeeError::Fetch`] / [`EmployeeError::Decode`] for transport or JSON failures.
    /// * [`EmployeeError::Upstream`] for a non-success status.
    /// * [`EmployeeError::ContractViolation`] when two records share an id.
    pub async fn list_all(&self) -> Result<Vec<Employee>, EmployeeError> {
        const OPERATION: &str = "Listing employees";

        let response = self.send(OPERATION, || self.http.get(self.base_url.clone())).await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Registry refused to list employees");
            return Err(EmployeeError::Upstream {
                status: status.as_u16(),
                context: Some(OPERATION.into()),
            });
        }

        let records = read_envelope::<Vec<RegistryEmployee>>(response, OPERATION)
            .await?
            .and_then(|envelope| envelope.data)
            .unwrap_or_default();

        let employees: Vec<Employee> = records.into_iter().map(Employee::from).collect();
        ensure_unique_ids(&employees).context(OPERATION)?;

        debug!(count = employees.len(), "Fetched employees from registry");
        Ok(employees)
    }

    /// Creates an employee from exactly the four public input fields.
    ///
    /// # Errors
    /// * [`EmployeeError::Validation`] before any request if the input is malformed.
    /// * [`EmployeeError::Rejected`] for a non-success status or a non-null `error` field.
    /// * [`EmployeeError::ContractViolation`] when the answer carries no `data`.
    /// * [`EmployeeError::Fetch`] / [`EmployeeError::Decode`] for transport or JSON failures.
    pub async fn create(&self, employee: &CreateEmployee) -> Result<Employee, EmployeeError> {
        const OPERATION: &str = "Creating employee";

        employee.validate()?;
        let input = CreateInput::from(employee);

        let response = self.send(OPERATION, || self.http.post(self.base_url.clone()).json(&input)).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(rejection(response, OPERATION).await);
        }

        let envelope = read_envelope::<RegistryEmployee>(response, OPERATION).await?;
        let created = match envelope {
            Some(RegistryEnvelope { error: Some(message), .. }) => {
                warn!(status = status.as_u16(), error = %message, "Registry rejected employee");
                return Err(EmployeeError::Rejected {
                    status: status.as_u16(),
                    message: message.into(),
                    context: Some(OPERATION.into()),
                });
            },
            Some(RegistryEnvelope { data: Some(record), .. }) => Employee::from(record),
            _ => {
                return Err(EmployeeError::contract("create response has no `data`"))
                    .context(OPERATION);
            },
        };

        debug!(id = %created.id, "Registry created employee");
        Ok(created)
    }

    /// Deletes the employee with `id`; `false` means the registry did not delete anything.
    ///
    /// No existence check is made first. An empty body or a null `data` flag on a
    /// success status counts as deleted; a `404` answer counts as not deleted.
    ///
    /// # Errors
    /// * [`EmployeeError::Rejected`] for any other non-success status or a non-null `error` field.
    /// * [`EmployeeError::Fetch`] / [`EmployeeError::Decode`] for transport or JSON failures.
    pub async fn delete(&self, id: &str) -> Result<bool, EmployeeError> {
        const OPERATION: &str = "Deleting employee";

        let input = DeleteInput::for_id(id);

        let response =
            self.send(OPERATION, || self.http.delete(self.base_url.clone()).json(&input)).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(id, "Registry does not know the employee");
            return Ok(false);
        }
        if !status.is_success() {
            return Err(rejection(response, OPERATION).await);
        }

        let deleted = match read_envelope::<bool>(response, OPERATION).await? {
            Some(RegistryEnvelope { error: Some(message), .. }) => {
                return Err(EmployeeError::Rejected {
                    status: status.as_u16(),
                    message: message.into(),
                    context: Some(OPERATION.into()),
                });
            },
            Some(envelope) => envelope.data.unwrap_or(true),
            None => true,
        };

        debug!(id, deleted, "Registry processed delete");
        Ok(deleted)
    }

    /// Sends the request, repeating it after connect or timeout failures up to `retries` times.
    async fn send<F>(&self, operation: &'static str, build: F) -> Result<Response, EmployeeError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempt: u8 = 0;
        loop {
            trace!(operation, attempt, url = %self.base_url, "Calling registry");
            match build().send().await {
                Ok(response) => return Ok(response),
                Err(err) if attempt < self.retries && (err.is_connect() || err.is_timeout()) => {
                    attempt += 1;
                    warn!(operation, attempt, error = %err, "Registry unreachable, retrying");
                },
                Err(err) => {
                    warn!(operation, error = %err, "Registry request failed");
                    return Err(EmployeeError::Fetch { source: err, context: Some(operation.into()) });
                },
            }
        }
    }
}

/// Reads the body as a registry envelope; `None` when the body is empty.
async fn read_envelope<T>(
    response: Response,
    operation: &'static str,
) -> Result<Option<RegistryEnvelope<T>>, EmployeeError>
where
    T: DeserializeOwned,
{
    let bytes = response.bytes().await.context(operation)?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        trace!(operation, "Registry answered with an empty body");
        return Ok(None);
    }

    let envelope: RegistryEnvelope<T> = serde_json::from_slice(&bytes).context(operation)?;
    trace!(operation, status = envelope.status.as_deref().unwrap_or_default(), "Registry envelope");
    Ok(Some(envelope))
}

/// Turns a non-success write answer into [`EmployeeError::Rejected`], preferring the body's `error`.
async fn rejection(response: Response, operation: &'static str) -> EmployeeError {
    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            trace!(operation, error = %err, "Registry rejection body unreadable");
            String::new()
        },
    };

    let message: Cow<'static, str> =
        match serde_json::from_str::<RegistryEnvelope<serde_json::Value>>(&body) {
            Ok(RegistryEnvelope { error: Some(message), .. }) => message.into(),
            _ if !body.trim().is_empty() => body.trim().to_owned().into(),
            _ => status.canonical_reason().unwrap_or("unknown status").into(),
        };

    warn!(status = status.as_u16(), error = %message, operation, "Registry rejected request");
    EmployeeError::Rejected { status: status.as_u16(), message, context: Some(operation.into()) }
}

/// Parses the base URL and checks the limits the types cannot express.
fn check_settings(config: &RegistryConfig) -> Result<Url, EmployeeError> {
    let raw = config.base_url.trim();
    let url = Url::parse(raw).map_err(|err| {
        EmployeeError::invalid_config(format!("base_url '{raw}' is not a URL: {err}"))
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none_or(str::is_empty) {
        return Err(EmployeeError::invalid_config(format!(
            "base_url must be an http(s) URL with a host, got '{raw}'"
        )));
    }
    if config.timeout_seconds == 0 {
        return Err(EmployeeError::invalid_config("timeout_seconds must be greater than zero"));
    }
    if config.connect_timeout_seconds == 0 {
        return Err(EmployeeError::invalid_config(
            "connect_timeout_seconds must be greater than zero",
        ));
    }
    if config.retries > MAX_REGISTRY_RETRIES {
        return Err(EmployeeError::invalid_config(format!(
            "retries must be at most {MAX_REGISTRY_RETRIES}, got {}",
            config.retries
        )));
    }
    Ok(url)
}

fn ensure_unique_ids(employees: &[Employee]) -> Result<(), EmployeeError> {
    let mut seen = FxHashSet::default();
    for employee in employees {
        if !seen.insert(employee.id.as_str()) {
            return Err(EmployeeError::contract(format!(
                "duplicate employee id '{}' in registry listing",
                employee.id
            )));
        }
    }
    Ok(())
}
