pub mod health;
pub mod scripts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /scripts                  list (public catalog), create
/// /scripts/curated          curated picks (public)
/// /scripts/mine             requester's own scripts (auth required)
/// /scripts/user/{user_id}   scripts by author (public unless self/admin)
/// /scripts/{id}             get, update, delete
/// /scripts/{id}/star        toggle star (POST, auth required)
/// /scripts/{id}/fork        fork (POST, auth required)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/scripts", scripts::router())
}
