//! User entity model and DTOs.
//!
//! Identity issuance lives outside this service; this is the projection the
//! script repository needs, plus the ordered owned-script index.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use scripthub_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    /// Role name: `"member"` or `"admin"`.
    pub role: String,
    /// Ordered index of owned script ids, kept consistent with script
    /// creation, forking, and deletion.
    pub script_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub role: String,
}
