//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it re-exports ergonomic helpers for config
//! loading and the shared API state.
//!
//! ## Config loading
//! ```rust,ignore
//! use cosmo_kernel::config::load_config;
//! let cfg: cosmo_domain::config::ApiConfig = load_config(Some("server"))?;
//! ```

pub mod config;
pub mod prelude;
pub mod server;

pub use cosmo_domain as domain;
