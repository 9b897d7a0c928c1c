//! Handlers for the `/scripts` resource: catalog browsing, lifecycle
//! (create/update/delete), and the social interactions (star, fork).
//!
//! Existence is checked before authorization and reported verbatim; a 404
//! never masquerades as a 403 or vice versa.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use scripthub_core::catalog::{page_count, CatalogFilter};
use scripthub_core::error::CoreError;
use scripthub_core::policy::{self, ScriptAccess};
use scripthub_core::script as script_rules;
use scripthub_core::types::DbId;
use scripthub_db::models::script::{CreateScript, Script, StarToggle, UpdateScript};
use scripthub_db::repositories::{ScriptRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::{Created, DataResponse, Paginated};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /scripts`.
#[derive(Debug, Deserialize)]
pub struct CreateScriptRequest {
    pub title: String,
    pub description: String,
    pub content: String,
    pub language: String,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
    /// Honored only for admins; silently discarded otherwise.
    pub is_curated: Option<bool>,
}

/// Request body for `PUT /scripts/{id}`. Omitted fields keep their prior
/// values.
#[derive(Debug, Deserialize)]
pub struct UpdateScriptRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub language: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
    /// Honored only for admins; silently discarded otherwise.
    pub is_curated: Option<bool>,
}

/// Query parameters for the public catalog listing.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub language: Option<String>,
    pub tag: Option<String>,
    #[serde(default)]
    pub curated: bool,
}

fn access(script: &Script) -> ScriptAccess {
    ScriptAccess {
        author_id: script.author_id,
        is_public: script.is_public,
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "script",
        id,
    })
}

// ---------------------------------------------------------------------------
// Catalog (read-only)
// ---------------------------------------------------------------------------

/// GET /scripts
///
/// Public catalog with search, filters, and pagination. Private scripts are
/// never listed here, regardless of filters.
pub async fn list_scripts(
    State(state): State<AppState>,
    Query(params): Query<CatalogQuery>,
) -> AppResult<Json<Paginated<Script>>> {
    let filter = CatalogFilter::from_params(
        params.page,
        params.limit,
        params.search.as_deref(),
        params.language,
        params.tag,
        params.curated,
    );

    let items = ScriptRepo::list_catalog(&state.pool, &filter).await?;
    let total = ScriptRepo::count_catalog(&state.pool, &filter).await?;

    Ok(Json(Paginated {
        page: filter.page,
        limit: filter.limit,
        total,
        pages: page_count(total, filter.limit),
        data: items,
    }))
}

/// GET /scripts/curated
///
/// Editorially curated, public scripts, most recent first.
pub async fn curated_scripts(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Script>>>> {
    let scripts = ScriptRepo::list_curated(&state.pool).await?;
    Ok(Json(DataResponse { data: scripts }))
}

/// GET /scripts/user/{user_id}
///
/// Scripts by a given author. Public only, unless the requester is that
/// author or an admin.
pub async fn scripts_by_author(
    State(state): State<AppState>,
    requester: MaybeAuthUser,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Script>>>> {
    let principal = requester.principal();
    let include_private = principal
        .as_ref()
        .is_some_and(|p| p.user_id == user_id || p.is_admin());

    let scripts = ScriptRepo::list_by_author(&state.pool, user_id, include_private).await?;
    Ok(Json(DataResponse { data: scripts }))
}

/// GET /scripts/mine
///
/// All scripts owned by the authenticated requester, private included.
pub async fn my_scripts(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Script>>>> {
    let scripts = ScriptRepo::list_by_author(&state.pool, user.user_id, true).await?;
    Ok(Json(DataResponse { data: scripts }))
}

/// GET /scripts/{id}
///
/// A single script. Private scripts are visible to their author and admins
/// only; everyone else gets 403 (the script's existence is not hidden).
pub async fn get_script(
    State(state): State<AppState>,
    requester: MaybeAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Script>>> {
    let script = ScriptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let principal = requester.principal();
    if !policy::can_read(principal.as_ref(), access(&script)) {
        return Err(AppError::Core(CoreError::Forbidden(
            "This script is private".into(),
        )));
    }

    Ok(Json(DataResponse { data: script }))
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// POST /scripts
///
/// Create a new script owned by the requester. The curated flag is honored
/// only for admins and silently dropped otherwise. If the script persists
/// but the owner's index append fails, this is degraded success: 201 with a
/// `warning` field, never a hard failure.
pub async fn create_script(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateScriptRequest>,
) -> AppResult<(StatusCode, Json<Created<Script>>)> {
    script_rules::validate_title(&input.title)?;
    script_rules::validate_description(&input.description)?;
    script_rules::validate_content(&input.content)?;
    script_rules::validate_language(&input.language)?;

    let principal = user.principal();
    let is_curated = if policy::can_set_curated(Some(&principal)) {
        input.is_curated.unwrap_or(false)
    } else {
        false
    };

    let dto = CreateScript {
        title: input.title.trim().to_string(),
        description: input.description.trim().to_string(),
        content: input.content,
        language: input.language,
        tags: script_rules::normalize_tags(input.tags.unwrap_or_default()),
        author_id: user.user_id,
        is_public: input.is_public.unwrap_or(true),
        is_curated,
    };

    let script = ScriptRepo::create(&state.pool, &dto).await?;

    let warning = match UserRepo::append_script(&state.pool, user.user_id, script.id).await {
        Ok(true) => None,
        Ok(false) => {
            tracing::warn!(script_id = script.id, user_id = user.user_id, "Owner row missing, script index not updated");
            Some("script created but not attached to the author's script index")
        }
        Err(err) => {
            tracing::warn!(script_id = script.id, user_id = user.user_id, error = %err, "Script index append failed");
            Some("script created but not attached to the author's script index")
        }
    };

    Ok((StatusCode::CREATED, Json(Created { data: script, warning })))
}

/// PUT /scripts/{id}
///
/// Partial merge: only supplied fields overwrite. Author-or-admin only; the
/// author is never reassigned and curated changes from non-admins are
/// silently dropped.
pub async fn update_script(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateScriptRequest>,
) -> AppResult<Json<DataResponse<Script>>> {
    let script = ScriptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let principal = user.principal();
    if !policy::can_modify(Some(&principal), access(&script)) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not authorized to update this script".into(),
        )));
    }

    if let Some(title) = &input.title {
        script_rules::validate_title(title)?;
    }
    if let Some(description) = &input.description {
        script_rules::validate_description(description)?;
    }
    if let Some(content) = &input.content {
        script_rules::validate_content(content)?;
    }
    if let Some(language) = &input.language {
        script_rules::validate_language(language)?;
    }

    let dto = UpdateScript {
        title: input.title.map(|t| t.trim().to_string()),
        description: input.description.map(|d| d.trim().to_string()),
        content: input.content,
        language: input.language,
        tags: input.tags.map(script_rules::normalize_tags),
        is_public: input.is_public,
        is_curated: if policy::can_set_curated(Some(&principal)) {
            input.is_curated
        } else {
            None
        },
    };

    let updated = ScriptRepo::update(&state.pool, id, &dto)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /scripts/{id}
///
/// Remove the script and detach it from the owner's script index; both
/// happen in one store transaction, so a partial delete is impossible.
pub async fn delete_script(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let script = ScriptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let principal = user.principal();
    if !policy::can_modify(Some(&principal), access(&script)) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not authorized to delete this script".into(),
        )));
    }

    let deleted = ScriptRepo::delete_with_index(&state.pool, id, script.author_id).await?;
    if !deleted {
        // Raced with another delete between the read and the transaction.
        return Err(not_found(id));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Social interactions
// ---------------------------------------------------------------------------

/// POST /scripts/{id}/star
///
/// Toggle the requester's star. Membership and counter move together in one
/// atomic store statement; the response reports the resulting state.
pub async fn toggle_star(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<StarToggle>>> {
    let toggle = ScriptRepo::toggle_star(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: toggle }))
}

/// POST /scripts/{id}/fork
///
/// Copy the source under the requester's ownership. Forks are always public
/// and never curated, whatever the source was. The fork insert and the
/// source counter bump are separate store writes; a failure in between
/// surfaces as a retryable partial failure because the fork already exists
/// and a naive retry would duplicate it.
pub async fn fork_script(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<Created<Script>>)> {
    let source = ScriptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let principal = user.principal();
    if !policy::can_fork(Some(&principal), access(&source)) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot fork a private script".into(),
        )));
    }

    let dto = CreateScript {
        title: script_rules::fork_title(&source.title),
        description: source.description.clone(),
        content: source.content.clone(),
        language: source.language.clone(),
        tags: source.tags.clone(),
        author_id: user.user_id,
        is_public: true,
        is_curated: false,
    };

    let fork = ScriptRepo::create(&state.pool, &dto).await?;

    match ScriptRepo::record_fork(&state.pool, source.id, user.user_id).await {
        Ok(true) => {}
        Ok(false) | Err(_) => {
            // The fork row exists but the source counters do not reflect it.
            // Callers should locate the existing fork (deterministic title +
            // requester + recency) before retrying the creation step.
            return Err(AppError::Core(CoreError::PartialFailure(format!(
                "fork {} was created but the source script's fork counters were not updated",
                fork.id
            ))));
        }
    }

    let warning = match UserRepo::append_script(&state.pool, user.user_id, fork.id).await {
        Ok(true) => None,
        Ok(false) => Some("fork created but not attached to the author's script index"),
        Err(err) => {
            tracing::warn!(script_id = fork.id, user_id = user.user_id, error = %err, "Script index append failed");
            Some("fork created but not attached to the author's script index")
        }
    };

    Ok((StatusCode::CREATED, Json(Created { data: fork, warning })))
}
