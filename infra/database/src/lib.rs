//! # Database Infrastructure
//!
//! This crate provides a unified interface for initializing and managing
//! [SQLite](https://sqlite.org) connections across the workspace.
//!
//! ## Key Features
//! - **Relational Guarantees**: Foreign keys are enforced on every connection
//!   (`PRAGMA foreign_keys=ON`), so `NOT NULL` references and cascade deletes
//!   behave as declared in the schema.
//! - **Builder Pattern**: Fluent API for configuring the location and the
//!   schema batches applied at startup.
//! - **Thread Safety**: A single connection behind a mutex, cheaply cloneable
//!   via `Arc` into request handlers.
//!
//! ## Example
//!
//! ```rust
//! use cosmo_database::{Database, DatabaseError};
//!
//! fn main() -> Result<(), DatabaseError> {
//!     let db = Database::builder()
//!         .in_memory()
//!         .schema("CREATE TABLE IF NOT EXISTS notes (id INTEGER PRIMARY KEY, body TEXT);")
//!         .init()?;
//!
//!     db.with_conn(|conn| {
//!         conn.execute("INSERT INTO notes (body) VALUES (?1)", ["hello"])
//!     })?;
//!     Ok(())
//! }
//! ```

mod error;

pub use error::DatabaseError;
pub use rusqlite;

use parking_lot::Mutex;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// How long a statement waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// In-memory location understood by `SQLite`.
const MEMORY_LOCATION: &str = ":memory:";

/// Inner state of the [`Database`] wrapper.
#[derive(Debug)]
pub struct DatabaseInner {
    conn: Mutex<Connection>,
    location: String,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        debug!(location = %self.location, "SQLite connection handle dropped");
    }
}

/// `SQLite` connection wrapper that provides thread-safety and contextual
/// error handling.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    /// Creates a new [`DatabaseBuilder`].
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    /// Runs `f` with exclusive access to the underlying connection.
    ///
    /// Callers perform at most one logical transaction per call; `SQLite`
    /// commits each statement atomically.
    ///
    /// # Errors
    /// Propagates any `rusqlite` error returned by `f`.
    pub fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> rusqlite::Result<T> {
        let conn = self.inner.conn.lock();
        f(&conn)
    }

    /// Returns the configured location (file path or `:memory:`).
    #[must_use]
    pub fn location(&self) -> &str {
        &self.inner.location
    }
}

/// A fluent builder for configuring and establishing a `SQLite` connection.
#[must_use = "builders do nothing unless you call .init()"]
#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    path: Option<PathBuf>,
    schemas: Vec<String>,
}

impl DatabaseBuilder {
    /// Creates a new [`DatabaseBuilder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the database file location.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Uses a transient in-memory database (tests, fixtures).
    pub fn in_memory(mut self) -> Self {
        self.path = Some(PathBuf::from(MEMORY_LOCATION));
        self
    }

    /// Appends a schema batch to apply during [`init`](Self::init).
    ///
    /// Batches run in registration order and are expected to be idempotent
    /// (`CREATE TABLE IF NOT EXISTS ...`).
    pub fn schema(mut self, sql: impl Into<String>) -> Self {
        self.schemas.push(sql.into());
        self
    }

    /// Consumes the builder and attempts to open the database.
    ///
    /// # Process
    /// 1. **Validation**: Ensures a location was provided.
    /// 2. **Open**: Creates parent directories for file-backed stores and
    ///    opens the connection.
    /// 3. **Pragmas**: Applies `busy_timeout`, WAL journaling (file-backed
    ///    stores only) and `foreign_keys=ON`.
    /// 4. **Schema**: Executes each registered schema batch.
    ///
    /// # Errors
    /// * [`DatabaseError::Validation`] if no location was provided.
    /// * [`DatabaseError::Open`] if the file cannot be opened or a pragma
    ///   fails.
    /// * [`DatabaseError::Migration`] if a schema batch fails to apply.
    pub fn init(self) -> Result<Database, DatabaseError> {
        let path = self.path.ok_or(DatabaseError::Validation {
            message: "Database location is required".into(),
        })?;
        let location = path.display().to_string();

        if location != MEMORY_LOCATION {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| DatabaseError::Validation {
                    message: format!("Cannot create database directory: {e}").into(),
                })?;
            }
        }

        let conn = Connection::open(&path)
            .map_err(|source| DatabaseError::Open { location: location.clone(), source })?;

        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|source| DatabaseError::Open { location: location.clone(), source })?;
        if location != MEMORY_LOCATION {
            conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
                .map_err(|source| DatabaseError::Open { location: location.clone(), source })?;
        }
        conn.execute_batch("PRAGMA foreign_keys=ON;")
            .map_err(|source| DatabaseError::Open { location: location.clone(), source })?;

        for (index, schema) in self.schemas.iter().enumerate() {
            conn.execute_batch(schema).map_err(|source| DatabaseError::Migration { source })?;
            debug!(batch = index, "Applied schema batch");
        }

        info!(%location, "SQLite connection established");

        Ok(Database { inner: Arc::new(DatabaseInner { conn: Mutex::new(conn), location }) })
    }
}
