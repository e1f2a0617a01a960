use config::{Config, Environment, File, Map};
use roster_domain::constants::{DEFAULT_CONFIG_FILE, ENV_PREFIX};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::debug;

#[roster_derive::roster_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader.
///
/// 1. **Base File**: `path` (any format `config` understands, extension optional).
///    Defaults to `server` in the working directory. A missing file is not an error.
/// 2. **Environment Overrides**: variables prefixed with `ROSTER__`, nested with `__`
///    (e.g. `ROSTER__REGISTRY__BASE_URL` maps to `registry.base_url`).
///
/// Anything neither source sets falls back to the `Default` of `T`'s fields.
///
/// # Errors
/// Returns [`ConfigError::Config`] when the file is malformed or a value has the wrong type.
///
/// # Example
/// ```rust
/// use roster_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/does-not-exist")).unwrap();
/// assert_eq!(cfg.port, 0);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layered(path, None)
}

/// `env` replaces the process environment when set.
fn load_layered<T>(
    path: Option<impl AsRef<Path>>,
    env: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

    debug!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
