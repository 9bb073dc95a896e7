//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Storage unavailable at '{path}': {source}")]
    StorageUnavailable {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Reservation errors
    // ---------------------------
    #[error("A reservation with id '{0}' already exists")]
    DuplicateIdentifier(String),

    #[error("Reservation not found: {0}")]
    NotFound(String),

    #[error("Unsupported reservation field: {0}")]
    InvalidField(String),

    #[error("Invalid value '{value}' for field {field}")]
    InvalidValue { field: String, value: String },

    #[error("Invalid status: {0} (expected confirmed, cancelled or updated)")]
    InvalidStatus(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Map a failed INSERT into a domain error when SQLite rejected the
    /// primary key; every other failure stays a plain `Db` error.
    pub fn from_insert(err: rusqlite::Error, reservation_id: &str) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation
                    && (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                        || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE) =>
            {
                AppError::DuplicateIdentifier(reservation_id.to_string())
            }
            _ => AppError::Db(err),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
