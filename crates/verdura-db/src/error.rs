//! Database-specific error types and conversions.

use verdura_core::error::VerduraError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    /// A statement was accepted by the client but rejected by the
    /// database, e.g. a schema ASSERT or unique-index violation.
    #[error("Query failed: {0}")]
    Query(String),

    #[error("Row decode failed: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for VerduraError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => VerduraError::NotFound { entity, id },
            other => VerduraError::Database(other.to_string()),
        }
    }
}
