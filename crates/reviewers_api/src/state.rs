//! Shared application state.
//!
//! # Responsibility
//! - Own the single SQLite connection behind a mutex.
//! - Run service calls on tokio's blocking pool.
//!
//! # Invariants
//! - The connection is only touched while the mutex is held.
//! - No other in-process mutable state exists.

use crate::config::DatabaseTarget;
use crate::error::ApiError;
use parking_lot::Mutex;
use reviewers_core::db::{open_db, open_db_in_memory, DbResult};
use reviewers_core::{
    count_reviewers, ReviewerService, ServiceError, ServiceResult, SqliteReviewerRepository,
};
use rusqlite::Connection;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Opens the configured store and applies migrations.
    pub fn open(target: &DatabaseTarget) -> DbResult<Self> {
        let conn = match target {
            DatabaseTarget::File(path) => open_db(path)?,
            DatabaseTarget::Memory => open_db_in_memory()?,
        };
        Ok(Self::new(conn))
    }

    /// Runs `op` against a request-scoped service on the blocking pool.
    pub async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&ReviewerService<SqliteReviewerRepository<'_>>) -> ServiceResult<T>
            + Send
            + 'static,
    {
        let db = Arc::clone(&self.db);
        let result = tokio::task::spawn_blocking(move || {
            let conn = db.lock();
            let service = ReviewerService::new(SqliteReviewerRepository::new(&conn));
            op(&service)
        })
        .await?;

        Ok(result?)
    }

    /// Number of stored reviewers, without loading any rows.
    pub async fn reviewer_count(&self) -> Result<i64, ApiError> {
        let db = Arc::clone(&self.db);
        let result = tokio::task::spawn_blocking(move || count_reviewers(&db.lock())).await?;
        Ok(result.map_err(ServiceError::from)?)
    }
}
