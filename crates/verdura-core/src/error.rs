//! Error types for the verdura system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerduraError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("{entity} already exists")]
    AlreadyExists { entity: String },

    #[error("authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("forbidden: {reason}")]
    Forbidden { reason: String },

    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("database error: {0}")]
    Database(String),

    #[error("cryptography error: {0}")]
    Crypto(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type VerduraResult<T> = Result<T, VerduraError>;
