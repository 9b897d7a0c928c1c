//! Route definitions for the scripts resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::scripts;
use crate::state::AppState;

/// Routes mounted at `/scripts`.
///
/// Identity requirements are enforced by handler extractors, not here.
///
/// ```text
/// GET    /                -> list_scripts
/// POST   /                -> create_script
/// GET    /curated         -> curated_scripts
/// GET    /mine            -> my_scripts
/// GET    /user/{user_id}  -> scripts_by_author
/// GET    /{id}            -> get_script
/// PUT    /{id}            -> update_script
/// DELETE /{id}            -> delete_script
/// POST   /{id}/star       -> toggle_star
/// POST   /{id}/fork       -> fork_script
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(scripts::list_scripts).post(scripts::create_script),
        )
        .route("/curated", get(scripts::curated_scripts))
        .route("/mine", get(scripts::my_scripts))
        .route("/user/{user_id}", get(scripts::scripts_by_author))
        .route(
            "/{id}",
            get(scripts::get_script)
                .put(scripts::update_script)
                .delete(scripts::delete_script),
        )
        .route("/{id}/star", post(scripts::toggle_star))
        .route("/{id}/fork", post(scripts::fork_script))
}
