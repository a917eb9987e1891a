//! Shared constants used across slices.

/// OpenAPI tag for system endpoints (health, banner).
pub const SYSTEM_TAG: &str = "System";

/// OpenAPI tag for the catalog endpoints.
pub const CATALOG_TAG: &str = "Catalog";

/// Default database file name, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "cosmodrome.db";
