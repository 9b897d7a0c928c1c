//! Script entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use scripthub_core::types::{DbId, Timestamp};

/// Full script row from the `scripts` table (minus the search vector, which
/// is never selected).
///
/// Invariants held by the store: `stars == starred_by.len()` and
/// `forks == forked_by.len()` after every mutation. `starred_by` has unique
/// membership; `forked_by` is append-only and may contain duplicates (a user
/// may fork the same script more than once).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Script {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub content: String,
    pub language: String,
    pub tags: Vec<String>,
    pub author_id: DbId,
    pub stars: i32,
    pub starred_by: Vec<DbId>,
    pub forks: i32,
    pub forked_by: Vec<DbId>,
    pub is_public: bool,
    pub is_curated: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new script.
///
/// `author_id` and `is_curated` are set by the lifecycle layer, never taken
/// from the client verbatim.
#[derive(Debug, Clone)]
pub struct CreateScript {
    pub title: String,
    pub description: String,
    pub content: String,
    pub language: String,
    pub tags: Vec<String>,
    pub author_id: DbId,
    pub is_public: bool,
    pub is_curated: bool,
}

/// DTO for updating an existing script. All fields are optional; only
/// supplied fields overwrite, omitted fields retain their prior values.
/// The author is immutable and deliberately absent here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateScript {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub language: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
    pub is_curated: Option<bool>,
}

/// Outcome of an atomic star toggle: the requester's resulting membership
/// state and the new counter value.
#[derive(Debug, Clone, Copy, FromRow, Serialize)]
pub struct StarToggle {
    pub starred: bool,
    pub stars: i32,
}
