use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A lookup by something other than id matched nothing.
    #[error("No {entity} found matching '{query}'")]
    NoMatch { entity: &'static str, query: String },

    /// A car references an owner id that does not resolve.
    #[error("Owner with id {0} not found")]
    UnknownOwner(DbId),

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// Login failure. Deliberately carries no detail about which check failed.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
