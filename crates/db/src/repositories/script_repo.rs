//! Repository for the `scripts` table.
//!
//! Star and fork mutations are single atomic UPDATE statements; consistency
//! between the counters and their backing arrays is never reconstructed in
//! Rust from a prior read.

use sqlx::PgPool;

use scripthub_core::catalog::CatalogFilter;
use scripthub_core::types::{DbId, Timestamp};

use crate::models::script::{CreateScript, Script, StarToggle, UpdateScript};

/// Column list shared across queries. The search vector is intentionally
/// never selected.
const COLUMNS: &str = "\
    id, title, description, content, language, tags, author_id, \
    stars, starred_by, forks, forked_by, is_public, is_curated, \
    created_at, updated_at";

/// Public-catalog filter clause. Binds: $1 language, $2 tag, $3 curated-only
/// flag, $4 tsquery. Absent filters are passed as NULL (or false for $3) and
/// short-circuit.
const CATALOG_WHERE: &str = "\
    is_public = TRUE \
    AND ($1::TEXT IS NULL OR language = $1) \
    AND ($2::TEXT IS NULL OR $2 = ANY(tags)) \
    AND (NOT $3::BOOLEAN OR is_curated = TRUE) \
    AND ($4::TEXT IS NULL OR search_vector @@ to_tsquery('english', $4))";

/// Provides storage operations for scripts.
pub struct ScriptRepo;

impl ScriptRepo {
    /// Insert a new script, returning the created row.
    pub async fn create(pool: &PgPool, dto: &CreateScript) -> Result<Script, sqlx::Error> {
        let query = format!(
            "INSERT INTO scripts \
                 (title, description, content, language, tags, author_id, is_public, is_curated) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Script>(&query)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(&dto.content)
            .bind(&dto.language)
            .bind(&dto.tags)
            .bind(dto.author_id)
            .bind(dto.is_public)
            .bind(dto.is_curated)
            .fetch_one(pool)
            .await
    }

    /// Find a script by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Script>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scripts WHERE id = $1");
        sqlx::query_as::<_, Script>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of the public catalog.
    ///
    /// With a search term, ordering is relevance first, most-recent-first on
    /// ties; otherwise most-recent-first.
    pub async fn list_catalog(
        pool: &PgPool,
        filter: &CatalogFilter,
    ) -> Result<Vec<Script>, sqlx::Error> {
        let order = if filter.tsquery.is_some() {
            "ts_rank(search_vector, to_tsquery('english', $4)) DESC, created_at DESC"
        } else {
            "created_at DESC"
        };
        let query = format!(
            "SELECT {COLUMNS} FROM scripts WHERE {CATALOG_WHERE} \
             ORDER BY {order} LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Script>(&query)
            .bind(&filter.language)
            .bind(&filter.tag)
            .bind(filter.curated_only)
            .bind(&filter.tsquery)
            .bind(filter.limit)
            .bind(filter.offset())
            .fetch_all(pool)
            .await
    }

    /// Total number of catalog rows matching the filter (ignores paging).
    pub async fn count_catalog(
        pool: &PgPool,
        filter: &CatalogFilter,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM scripts WHERE {CATALOG_WHERE}");
        sqlx::query_scalar(&query)
            .bind(&filter.language)
            .bind(&filter.tag)
            .bind(filter.curated_only)
            .bind(&filter.tsquery)
            .fetch_one(pool)
            .await
    }

    /// List curated, public scripts, most recent first.
    pub async fn list_curated(pool: &PgPool) -> Result<Vec<Script>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scripts \
             WHERE is_curated = TRUE AND is_public = TRUE \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Script>(&query).fetch_all(pool).await
    }

    /// List scripts by author, most recent first.
    ///
    /// `include_private` is true only when the requester is the author or an
    /// admin; everyone else sees public scripts only.
    pub async fn list_by_author(
        pool: &PgPool,
        author_id: DbId,
        include_private: bool,
    ) -> Result<Vec<Script>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scripts \
             WHERE author_id = $1 AND ($2::BOOLEAN OR is_public = TRUE) \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Script>(&query)
            .bind(author_id)
            .bind(include_private)
            .fetch_all(pool)
            .await
    }

    /// Update a script, returning the mutated row from the same statement.
    /// Only non-`None` fields in the DTO are applied; the author is never
    /// reassigned. Returns `None` if the script no longer exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateScript,
    ) -> Result<Option<Script>, sqlx::Error> {
        let query = format!(
            "UPDATE scripts SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                content = COALESCE($4, content), \
                language = COALESCE($5, language), \
                tags = COALESCE($6, tags), \
                is_public = COALESCE($7, is_public), \
                is_curated = COALESCE($8, is_curated), \
                updated_at = now() \
            WHERE id = $1 \
            RETURNING {COLUMNS}"
        );

        sqlx::query_as::<_, Script>(&query)
            .bind(id)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(&dto.content)
            .bind(&dto.language)
            .bind(&dto.tags)
            .bind(dto.is_public)
            .bind(dto.is_curated)
            .fetch_optional(pool)
            .await
    }

    /// Delete a script and detach it from the owner's script index in one
    /// transaction. Returns `false` if the script no longer exists; partial
    /// application is impossible.
    pub async fn delete_with_index(
        pool: &PgPool,
        id: DbId,
        author_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let rows = sqlx::query("DELETE FROM scripts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if rows == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            "UPDATE users SET script_ids = array_remove(script_ids, $2), updated_at = now() \
             WHERE id = $1",
        )
        .bind(author_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Atomically toggle `user_id`'s star on a script.
    ///
    /// Membership check, set mutation, and counter adjustment happen in a
    /// single statement, so two concurrent toggles by the same user cannot
    /// produce a counter/set mismatch. The RETURNING clause reports the
    /// post-toggle state. Returns `None` if the script does not exist.
    pub async fn toggle_star(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<StarToggle>, sqlx::Error> {
        let query = "\
            UPDATE scripts SET \
                starred_by = CASE WHEN $2 = ANY(starred_by) \
                                  THEN array_remove(starred_by, $2) \
                                  ELSE array_append(starred_by, $2) END, \
                stars = CASE WHEN $2 = ANY(starred_by) \
                             THEN stars - 1 \
                             ELSE stars + 1 END, \
                updated_at = now() \
            WHERE id = $1 \
            RETURNING $2 = ANY(starred_by) AS starred, stars";

        sqlx::query_as::<_, StarToggle>(query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically append `forker_id` to a source script's fork list and bump
    /// its counter. Duplicates are permitted; every fork is a new script.
    /// Returns `false` if the source no longer exists.
    pub async fn record_fork(
        pool: &PgPool,
        source_id: DbId,
        forker_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let rows = sqlx::query(
            "UPDATE scripts SET \
                 forked_by = array_append(forked_by, $2), \
                 forks = forks + 1, \
                 updated_at = now() \
             WHERE id = $1",
        )
        .bind(source_id)
        .bind(forker_id)
        .execute(pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }

    /// Find a fork `author_id` created since `since` with the given title.
    ///
    /// Fork titles are deterministic, so callers recovering from a partial
    /// fork failure can use this to detect the already-created fork before
    /// retrying the creation step.
    pub async fn find_recent_fork(
        pool: &PgPool,
        author_id: DbId,
        title: &str,
        since: Timestamp,
    ) -> Result<Option<Script>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scripts \
             WHERE author_id = $1 AND title = $2 AND created_at >= $3 \
             ORDER BY created_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, Script>(&query)
            .bind(author_id)
            .bind(title)
            .bind(since)
            .fetch_optional(pool)
            .await
    }
}
