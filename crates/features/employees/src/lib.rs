//! Employees feature slice.
//!
//! Exposes the upstream employee registry through a small query layer:
//! [`client::RegistryClient`] talks to the registry, [`query::QueryEngine`]
//! re-fetches and aggregates in memory, and the `server` feature adds the
//! axum handlers mounted under `/api/v1/employees`.

pub mod client;
mod error;
pub mod model;
pub mod query;
#[cfg(feature = "server")]
pub mod server;
pub mod wire;

#[cfg(feature = "server")]
pub use crate::error::ErrorResponse;
pub use crate::error::{EmployeeError, EmployeeErrorExt};

use crate::client::RegistryClient;
use crate::query::QueryEngine;
use roster_kernel::domain::config::ApiConfig;
use roster_kernel::domain::slices::InitializedSlice;

/// Employees feature state: the write client and the read engine share one connection pool.
#[roster_derive::roster_slice]
pub struct Employees {
    pub client: RegistryClient,
    pub engine: QueryEngine<RegistryClient>,
}

impl Employees {
    /// Builds the slice state without registering it.
    ///
    /// # Errors
    /// Returns an error if the registry settings are invalid.
    pub fn from_config(config: &ApiConfig) -> Result<Self, EmployeeError> {
        let client = RegistryClient::new(&config.registry)?;
        Ok(Self::new(EmployeesInner { engine: QueryEngine::new(client.clone()), client }))
    }
}

/// Initialize the employees feature.
///
/// # Errors
/// Returns an error if the registry settings are invalid.
pub fn init(config: &ApiConfig) -> Result<InitializedSlice, EmployeeError> {
    let slice = Employees::from_config(config)?;
    tracing::info!(registry = %slice.client.base_url(), "Employees slice initialized");

    Ok(InitializedSlice::new(slice))
}
