//! Convenience re-exports for server crates.

pub use crate::config::load_config;
pub use crate::server::{ApiState, ApiStateBuilder, ApiStateError};
pub use cosmo_domain::config::ApiConfig;
