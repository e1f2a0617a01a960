pub use crate::config::{ConfigError, load_config};
pub use roster_domain::config::ApiConfig;
pub use roster_domain::slices::{FeatureSlice, InitializedSlice};

#[cfg(feature = "server")]
pub use crate::server::{ApiState, ApiStateBuilder, ApiStateError};
