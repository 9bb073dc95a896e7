//! SQLite connection wrapper (lightweight for CLI usage).
//!
//! One connection per pool, handed out through scoped closures. Write paths
//! go through [`DbPool::with_tx`]: the transaction commits when the closure
//! succeeds and is rolled back on drop for every error path.

use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, Transaction};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

pub struct DbPool {
    pub conn: Connection,
    path: String,
}

impl DbPool {
    pub fn new(path: &str) -> AppResult<Self> {
        Self::with_busy_timeout(path, DEFAULT_BUSY_TIMEOUT_MS)
    }

    pub fn with_busy_timeout(path: &str, busy_timeout_ms: u64) -> AppResult<Self> {
        let unavailable = |source| AppError::StorageUnavailable {
            path: path.to_string(),
            source,
        };

        let conn = Connection::open(Path::new(path)).map_err(unavailable)?;
        conn.busy_timeout(Duration::from_millis(busy_timeout_ms))
            .map_err(unavailable)?;

        Ok(Self {
            conn,
            path: path.to_string(),
        })
    }

    /// Private in-memory database, mostly useful in tests.
    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory().map_err(|source| AppError::StorageUnavailable {
            path: ":memory:".to_string(),
            source,
        })?;
        Ok(Self {
            conn,
            path: ":memory:".to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Helper to execute a closure with a mutable connection reference.
    pub fn with_conn<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T>,
    {
        func(&mut self.conn)
    }

    /// Run `func` inside a transaction, committing only on success.
    pub fn with_tx<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> AppResult<T>,
    {
        let tx = self.conn.transaction()?;
        let out = func(&tx)?;
        tx.commit()?;
        Ok(out)
    }
}
