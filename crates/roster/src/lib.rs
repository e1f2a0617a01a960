//! Facade crate for Roster features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `roster` with the `server` feature.
//! - Call `roster::init` to build every feature slice, then register them in the API state.

pub use roster_domain as domain;
use roster_domain::config::ApiConfig;
use roster_domain::slices::InitializedSlice;
pub use roster_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use roster_employees::server::employees_router;
        pub use roster_kernel::server::router::system_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use roster_employees as employees;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "employees",
        #[cfg(feature = "server")]
        "server",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize every feature slice.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(config: &ApiConfig) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let slices = vec![
        // Employees (registry facade)
        features::employees::init(config)?,
    ];

    Ok(slices)
}
