//! Persistence access with explicit visibility: every read on a soft-deleted
//! entity applies the active-record predicate (`deleted_at IS NULL`) itself.
//! Image rows are hard-deleted and carry no such predicate.

pub mod images;
pub mod products;
pub mod users;

use crate::api::error::AppError;
use sea_orm::{DbErr, SqlErr};

/// Maps a store-level unique key violation to `Conflict`; everything else
/// stays a database error.
pub(crate) fn map_insert_err(e: DbErr, what: &str) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict(format!("A {} with a conflicting unique field already exists", what))
        }
        _ => AppError::Database(e),
    }
}
