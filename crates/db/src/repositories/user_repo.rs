//! Repository for the `users` table.

use sqlx::PgPool;

use scripthub_core::types::DbId;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, role, script_ids, created_at, updated_at";

/// Provides storage operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, role) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Append a script id to a user's owned-script index. Returns `false`
    /// if the user does not exist.
    pub async fn append_script(
        pool: &PgPool,
        user_id: DbId,
        script_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let rows = sqlx::query(
            "UPDATE users SET script_ids = array_append(script_ids, $2), updated_at = now() \
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(script_id)
        .execute(pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }
}
