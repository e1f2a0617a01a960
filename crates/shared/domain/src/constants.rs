//! Shared string constants: OpenAPI tags and configuration lookup.

/// OpenAPI tag for infrastructure endpoints (health).
pub const SYSTEM_TAG: &str = "System";
/// OpenAPI tag for the employee endpoints.
pub const EMPLOYEES_TAG: &str = "Employees";

/// Prefix of environment overrides, e.g. `ROSTER__REGISTRY__BASE_URL`.
pub const ENV_PREFIX: &str = "ROSTER";
/// Default configuration file stem, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "server";
