use sqlx::PgPool;

/// Connect, migrate, and verify the schema the repositories expect.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    scripthub_db::health_check(&pool).await.unwrap();

    for table in ["users", "scripts"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should exist and start empty");
    }
}

/// The counter/set invariants are enforced by the schema itself: a row whose
/// `stars` disagrees with `starred_by` must be rejected.
#[sqlx::test(migrations = "./migrations")]
async fn schema_rejects_counter_set_mismatch(pool: PgPool) {
    let user_id: (i64,) =
        sqlx::query_as("INSERT INTO users (username) VALUES ('checker') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();

    let result = sqlx::query(
        "INSERT INTO scripts (title, description, content, language, author_id, stars) \
         VALUES ('Bad row', 'a description long enough', 'echo', 'bash', $1, 5)",
    )
    .bind(user_id.0)
    .execute(&pool)
    .await;

    assert!(result.is_err(), "mismatched stars counter must violate the CHECK constraint");
}
