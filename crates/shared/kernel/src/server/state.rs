use axum::extract::FromRef;
use cosmo_database::Database;
use cosmo_domain::config::ApiConfig;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ApiStateError {
    #[error("State validation error: {message}")]
    Validation { message: Cow<'static, str> },
}

#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
    pub database: Database,
}

/// Shared application state handed to every request handler.
///
/// The database handle is an explicitly constructed dependency; handlers
/// extract it via `State<Database>` thanks to the [`FromRef`] impl below.
#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

impl FromRef<ApiState> for Database {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.database.clone()
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<ApiConfig>,
    database: Option<Database>,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn db(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    /// Finalizes the state.
    ///
    /// # Errors
    /// Returns [`ApiStateError::Validation`] if the database was not provided.
    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let config = self.config.unwrap_or_default();
        let database = self.database.ok_or(ApiStateError::Validation {
            message: "Database not provided".into(),
        })?;

        Ok(ApiState { inner: Arc::new(ApiStateInner { config, database }) })
    }
}
