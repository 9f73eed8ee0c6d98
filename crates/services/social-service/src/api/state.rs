//! Application state shared across handlers.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use common::{with_deadline, AppResult};

use crate::config::Config;
use crate::infra::Database;
use crate::repository::Storage;

/// Application state containing the storage facade and database handle.
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub database: Arc<Database>,
    operation_timeout: Duration,
    request_timeout: Duration,
    feed_default_limit: u64,
}

impl AppState {
    /// Create new app state.
    pub fn new(storage: Storage, database: Arc<Database>, config: &Config) -> Self {
        Self {
            storage,
            database,
            operation_timeout: config.operation_timeout(),
            request_timeout: config.request_timeout(),
            feed_default_limit: config.feed_default_limit,
        }
    }

    /// Run a storage operation under the configured deadline.
    pub async fn run<F, T>(&self, operation: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        with_deadline(self.operation_timeout, operation).await
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn feed_default_limit(&self) -> u64 {
        self.feed_default_limit
    }
}
