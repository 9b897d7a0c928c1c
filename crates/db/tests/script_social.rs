//! Integration tests for the script repository and social mutations.
//!
//! Exercises the repository layer against a real database:
//! - Star toggle atomicity and counter/set invariants
//! - Fork recording (duplicates permitted, append-only)
//! - Catalog visibility, filtering, and pagination contracts
//! - Delete detaching the owner's script index

use chrono::Utc;
use sqlx::PgPool;

use scripthub_core::catalog::CatalogFilter;
use scripthub_db::models::script::{CreateScript, UpdateScript};
use scripthub_db::models::user::CreateUser;
use scripthub_db::repositories::{ScriptRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, username: &str, role: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            role: role.to_string(),
        },
    )
    .await
    .expect("user insert should succeed")
    .id
}

fn new_script(author_id: i64, title: &str) -> CreateScript {
    CreateScript {
        title: title.to_string(),
        description: "A script used by the integration tests".to_string(),
        content: "echo hello".to_string(),
        language: "bash".to_string(),
        tags: vec!["testing".to_string()],
        author_id,
        is_public: true,
        is_curated: false,
    }
}

fn default_filter() -> CatalogFilter {
    CatalogFilter::from_params(None, None, None, None, None, false)
}

// ---------------------------------------------------------------------------
// Star toggle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn star_toggle_keeps_counter_and_set_in_sync(pool: PgPool) {
    let author = seed_user(&pool, "author", "member").await;
    let alice = seed_user(&pool, "alice", "member").await;
    let bob = seed_user(&pool, "bob", "member").await;
    let script = ScriptRepo::create(&pool, &new_script(author, "Star target"))
        .await
        .unwrap();

    let first = ScriptRepo::toggle_star(&pool, script.id, alice)
        .await
        .unwrap()
        .expect("script exists");
    assert!(first.starred);
    assert_eq!(first.stars, 1);

    let second = ScriptRepo::toggle_star(&pool, script.id, bob)
        .await
        .unwrap()
        .unwrap();
    assert!(second.starred);
    assert_eq!(second.stars, 2);

    let row = ScriptRepo::find_by_id(&pool, script.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.stars as usize, row.starred_by.len());
    assert!(row.starred_by.contains(&alice));
    assert!(row.starred_by.contains(&bob));
}

#[sqlx::test(migrations = "./migrations")]
async fn double_toggle_restores_original_state(pool: PgPool) {
    let author = seed_user(&pool, "author", "member").await;
    let alice = seed_user(&pool, "alice", "member").await;
    let script = ScriptRepo::create(&pool, &new_script(author, "Toggle twice"))
        .await
        .unwrap();

    let on = ScriptRepo::toggle_star(&pool, script.id, alice)
        .await
        .unwrap()
        .unwrap();
    assert!(on.starred);
    assert_eq!(on.stars, 1);

    let off = ScriptRepo::toggle_star(&pool, script.id, alice)
        .await
        .unwrap()
        .unwrap();
    assert!(!off.starred);
    assert_eq!(off.stars, 0);

    let row = ScriptRepo::find_by_id(&pool, script.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.stars, 0);
    assert!(row.starred_by.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn toggle_on_missing_script_returns_none(pool: PgPool) {
    let alice = seed_user(&pool, "alice", "member").await;
    let result = ScriptRepo::toggle_star(&pool, 999_999, alice).await.unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Fork recording
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn fork_recording_is_append_only_and_allows_duplicates(pool: PgPool) {
    let author = seed_user(&pool, "author", "member").await;
    let alice = seed_user(&pool, "alice", "member").await;
    let source = ScriptRepo::create(&pool, &new_script(author, "Fork source"))
        .await
        .unwrap();

    assert!(ScriptRepo::record_fork(&pool, source.id, alice).await.unwrap());
    assert!(ScriptRepo::record_fork(&pool, source.id, alice).await.unwrap());

    let row = ScriptRepo::find_by_id(&pool, source.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.forks, 2);
    assert_eq!(row.forked_by, vec![alice, alice]);
}

#[sqlx::test(migrations = "./migrations")]
async fn find_recent_fork_detects_existing_fork(pool: PgPool) {
    let alice = seed_user(&pool, "alice", "member").await;
    let since = Utc::now() - chrono::Duration::minutes(5);

    let mut dto = new_script(alice, "Fork source (Forked)");
    dto.is_public = true;
    let fork = ScriptRepo::create(&pool, &dto).await.unwrap();

    let found = ScriptRepo::find_recent_fork(&pool, alice, "Fork source (Forked)", since)
        .await
        .unwrap()
        .expect("fork should be found within the window");
    assert_eq!(found.id, fork.id);

    let future = Utc::now() + chrono::Duration::minutes(5);
    let missed = ScriptRepo::find_recent_fork(&pool, alice, "Fork source (Forked)", future)
        .await
        .unwrap();
    assert!(missed.is_none());
}

// ---------------------------------------------------------------------------
// Catalog visibility and filtering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn private_scripts_never_appear_in_catalog(pool: PgPool) {
    let author = seed_user(&pool, "author", "member").await;

    ScriptRepo::create(&pool, &new_script(author, "Public script"))
        .await
        .unwrap();
    let mut hidden = new_script(author, "Private script");
    hidden.is_public = false;
    ScriptRepo::create(&pool, &hidden).await.unwrap();

    let page = ScriptRepo::list_catalog(&pool, &default_filter()).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].title, "Public script");

    // Still invisible when filters would otherwise match it.
    let filter = CatalogFilter::from_params(
        None,
        None,
        Some("private"),
        Some("bash".to_string()),
        Some("testing".to_string()),
        false,
    );
    let filtered = ScriptRepo::list_catalog(&pool, &filter).await.unwrap();
    assert!(filtered.iter().all(|s| s.is_public));
    assert_eq!(ScriptRepo::count_catalog(&pool, &filter).await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn catalog_filters_by_language_tag_and_curated(pool: PgPool) {
    let author = seed_user(&pool, "author", "member").await;

    let mut rust_script = new_script(author, "Rust helper");
    rust_script.language = "rust".to_string();
    rust_script.tags = vec!["cli".to_string()];
    ScriptRepo::create(&pool, &rust_script).await.unwrap();

    let mut curated = new_script(author, "Curated pick");
    curated.is_curated = true;
    ScriptRepo::create(&pool, &curated).await.unwrap();

    let by_language = CatalogFilter::from_params(None, None, None, Some("rust".to_string()), None, false);
    let rows = ScriptRepo::list_catalog(&pool, &by_language).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Rust helper");

    let by_tag = CatalogFilter::from_params(None, None, None, None, Some("cli".to_string()), false);
    let rows = ScriptRepo::list_catalog(&pool, &by_tag).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Rust helper");

    let curated_only = CatalogFilter::from_params(None, None, None, None, None, true);
    let rows = ScriptRepo::list_catalog(&pool, &curated_only).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Curated pick");
}

#[sqlx::test(migrations = "./migrations")]
async fn catalog_full_text_search_matches_title_description_and_tags(pool: PgPool) {
    let author = seed_user(&pool, "author", "member").await;

    let mut backup = new_script(author, "Nightly backup");
    backup.description = "Rotates archives and uploads them offsite".to_string();
    backup.tags = vec!["archiving".to_string()];
    ScriptRepo::create(&pool, &backup).await.unwrap();

    ScriptRepo::create(&pool, &new_script(author, "Unrelated utility"))
        .await
        .unwrap();

    for term in ["backup", "archives", "archiving"] {
        let filter = CatalogFilter::from_params(None, None, Some(term), None, None, false);
        let rows = ScriptRepo::list_catalog(&pool, &filter).await.unwrap();
        assert_eq!(rows.len(), 1, "term {term:?} should match one script");
        assert_eq!(rows[0].title, "Nightly backup");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn catalog_search_tolerates_operator_laden_input(pool: PgPool) {
    let author = seed_user(&pool, "author", "member").await;
    let mut script = new_script(author, "Std sort helpers");
    script.description = "Sorts vectors using the std library".to_string();
    ScriptRepo::create(&pool, &script).await.unwrap();

    // tsquery syntax in user input must never reach the store as operators.
    for term in ["std::sort vector", "a&&b", "don't", "!bang", "(paren"] {
        let filter = CatalogFilter::from_params(None, None, Some(term), None, None, false);
        let result = ScriptRepo::list_catalog(&pool, &filter).await;
        assert!(result.is_ok(), "search {term:?} must not error");
    }

    let filter =
        CatalogFilter::from_params(None, None, Some("std::sort vector"), None, None, false);
    let rows = ScriptRepo::list_catalog(&pool, &filter).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Std sort helpers");
}

#[sqlx::test(migrations = "./migrations")]
async fn catalog_pagination_contract(pool: PgPool) {
    let author = seed_user(&pool, "author", "member").await;
    for i in 0..25 {
        ScriptRepo::create(&pool, &new_script(author, &format!("Script {i:02}")))
            .await
            .unwrap();
    }

    let page3 = CatalogFilter::from_params(Some(3), Some(10), None, None, None, false);
    let rows = ScriptRepo::list_catalog(&pool, &page3).await.unwrap();
    assert_eq!(rows.len(), 5);

    let total = ScriptRepo::count_catalog(&pool, &page3).await.unwrap();
    assert_eq!(total, 25);
    assert_eq!(scripthub_core::catalog::page_count(total, page3.limit), 3);

    // Past the last page: a valid empty result, not an error.
    let page4 = CatalogFilter::from_params(Some(4), Some(10), None, None, None, false);
    assert!(ScriptRepo::list_catalog(&pool, &page4).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn update_merges_only_supplied_fields(pool: PgPool) {
    let author = seed_user(&pool, "author", "member").await;
    let script = ScriptRepo::create(&pool, &new_script(author, "Before rename"))
        .await
        .unwrap();

    let patch = UpdateScript {
        title: Some("After rename".to_string()),
        ..Default::default()
    };
    let updated = ScriptRepo::update(&pool, script.id, &patch)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "After rename");
    assert_eq!(updated.description, script.description);
    assert_eq!(updated.content, script.content);
    assert_eq!(updated.language, script.language);
    assert_eq!(updated.author_id, author);
}

#[sqlx::test(migrations = "./migrations")]
async fn update_missing_script_returns_none(pool: PgPool) {
    let patch = UpdateScript {
        title: Some("Ghost".to_string()),
        ..Default::default()
    };
    let result = ScriptRepo::update(&pool, 999_999, &patch).await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_removes_script_and_detaches_owner_index(pool: PgPool) {
    let author = seed_user(&pool, "author", "member").await;
    let script = ScriptRepo::create(&pool, &new_script(author, "Doomed script"))
        .await
        .unwrap();
    assert!(UserRepo::append_script(&pool, author, script.id).await.unwrap());

    let owner = UserRepo::find_by_id(&pool, author).await.unwrap().unwrap();
    assert_eq!(owner.script_ids, vec![script.id]);

    assert!(ScriptRepo::delete_with_index(&pool, script.id, author)
        .await
        .unwrap());

    assert!(ScriptRepo::find_by_id(&pool, script.id).await.unwrap().is_none());
    let owner = UserRepo::find_by_id(&pool, author).await.unwrap().unwrap();
    assert!(owner.script_ids.is_empty());

    // Deleting again reports absence rather than failing.
    assert!(!ScriptRepo::delete_with_index(&pool, script.id, author)
        .await
        .unwrap());
}
