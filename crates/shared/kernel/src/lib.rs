//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it owns config loading and, with the `server` feature,
//! the shared API state and system routes.
//!
//! ## Config loading
//! ```rust,ignore
//! use roster_kernel::config::load_config;
//! use roster_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server")).unwrap();
//! ```
pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use roster_domain as domain;
