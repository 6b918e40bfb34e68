//! PostgreSQL repository tests.
//!
//! Each test gets a fresh database with migrations applied. They need a
//! running server: `DATABASE_URL=postgres://... cargo test -- --ignored`.

use link_shortener::domain::entities::NewLink;
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::error::AppError;
use link_shortener::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(code: &str, url: &str) -> NewLink {
    NewLink {
        code: code.to_string(),
        url: url.to_string(),
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_create_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .create(new_link("test123", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(link.code, "test123");
    assert_eq!(link.url, "https://example.com");
    assert_eq!(link.total_clicks, 0);
    assert!(link.last_clicked_at.is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_create_duplicate_code_is_conflict(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("dup123", "https://a.example"))
        .await
        .unwrap();
    let err = repo
        .create(new_link("dup123", "https://b.example"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_find_by_code(pool: PgPool) {
    sqlx::query("INSERT INTO links (code, url) VALUES ($1, $2)")
        .bind("abc123")
        .bind("https://example.com")
        .execute(&pool)
        .await
        .unwrap();

    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo.find_by_code("abc123").await.unwrap();
    assert_eq!(link.unwrap().code, "abc123");

    assert!(repo.find_by_code("notfound").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_list_newest_first(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    for code in ["first1", "second", "third3"] {
        repo.create(new_link(code, "https://example.com"))
            .await
            .unwrap();
    }

    let codes: Vec<String> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.code)
        .collect();
    assert_eq!(codes, vec!["third3", "second", "first1"]);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_concurrent_clicks_are_not_lost(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    repo.create(new_link("busy12", "https://example.com"))
        .await
        .unwrap();

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.record_click("busy12").await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let link = repo.find_by_code("busy12").await.unwrap().unwrap();
    assert_eq!(link.total_clicks, 20);
    assert!(link.last_clicked_at.is_some());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_record_click_missing(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.record_click("nope12").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_delete(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("del123", "https://example.com"))
        .await
        .unwrap();

    assert!(repo.delete("del123").await.unwrap());
    assert!(!repo.delete("del123").await.unwrap());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_ping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}
