use std::borrow::Cow;

/// A specialized [`DatabaseError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Validation errors (missing builder parameters).
    #[error("Validation error: {message}")]
    Validation { message: Cow<'static, str> },

    /// Occurs when the database file cannot be opened or configured.
    #[error("Failed to open database at {location}: {source}")]
    Open {
        location: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Schema application failures.
    #[error("Migration error: {source}")]
    Migration {
        #[source]
        source: rusqlite::Error,
    },

    /// A wrapper for underlying `SQLite` errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}
