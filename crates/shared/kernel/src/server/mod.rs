mod health;
pub mod router;
mod state;

pub use health::HealthResponse;
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateInner};
