use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Every operation reports a discriminated outcome from this enum; nothing
/// bubbles up as an unannotated generic failure. The API layer maps each
/// variant to an HTTP status and stable error code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Store timeout or connection failure. Safe to retry as-is.
    #[error("Transient store failure: {0}")]
    Transient(String),

    /// The operation's primary write persisted but a dependent write failed.
    /// The caller must reconcile before a naive retry (the primary effect
    /// already exists).
    #[error("Partial failure: {0}")]
    PartialFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether the caller may safely re-submit the failed operation.
    ///
    /// Partial failures are retryable only after the caller has checked for
    /// the already-persisted primary effect.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::Transient(_) | CoreError::PartialFailure(_))
    }
}
