//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope per project
//! conventions; paginated listings additionally carry the paging contract.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Paginated listing envelope.
///
/// `pages` is `ceil(total / limit)`; an empty result set is a valid outcome
/// with `total = 0` and `pages = 0`.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

/// Creation envelope for operations whose dependent index update may fail
/// after the primary write persisted (degraded success).
#[derive(Debug, Serialize)]
pub struct Created<T: Serialize> {
    pub data: T,
    /// Present only when the owner's script index could not be updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<&'static str>,
}
