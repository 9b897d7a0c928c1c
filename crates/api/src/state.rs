use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// The pool is the only cross-request shared mutable state; all consistency
/// guarantees live in the store's atomic statements.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: scripthub_db::DbPool,
    /// Server configuration (JWT secret, timeouts, CORS).
    pub config: Arc<ServerConfig>,
}
