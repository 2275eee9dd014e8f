//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use bistro_core::Email;

use crate::config::BistroConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BistroConfig,
    pool: SqlitePool,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: BistroConfig, pool: SqlitePool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, pool }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &BistroConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Email of the configured bootstrap account, if any.
    #[must_use]
    pub fn bootstrap_email(&self) -> Option<&Email> {
        self.inner.config.bootstrap.as_ref().map(|b| &b.email)
    }
}
