use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Insufficient stock for racket {racket_id}: requested {requested}, available {available}")]
    InsufficientStock {
        racket_id: i32,
        requested: i32,
        available: i32,
    },

    #[error("Version conflict: {0}")]
    VersionConflict(String),

    #[error("Custom: {0}")]
    Custom(String),
}
