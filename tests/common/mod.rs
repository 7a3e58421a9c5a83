#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool};
use tower::ServiceExt;

use todo_backend::api::{create_router, AppState};
use todo_backend::config::Config;

pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    sqlx::query(
        r#"
        CREATE TABLE tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            completed INTEGER NOT NULL
        );
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create test schema");

    pool
}

pub fn test_config() -> Config {
    Config {
        port: 3000,
        database_url: "sqlite::memory:".to_string(),
        cors_origin: "http://localhost:5173".to_string(),
    }
}

pub async fn setup_app() -> Router {
    let pool = setup_test_db().await;
    let state = AppState::new(Some(pool));
    create_router(state, &test_config())
}

/// Creates a store file at `path` by running `statements` and closing the
/// pool, so nothing holds the file afterwards.
pub async fn create_store(path: &Path, statements: &str) {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .journal_mode(SqliteJournalMode::Delete)
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options)
        .await
        .expect("Failed to create store");

    if !statements.is_empty() {
        sqlx::query(statements)
            .execute(&pool)
            .await
            .expect("Failed to seed store");
    }

    pool.close().await;
}

/// Takes and releases an exclusive lock, which fails while another
/// connection still holds the file.
pub async fn assert_store_unlocked(path: &Path) {
    let options = SqliteConnectOptions::new().filename(path);
    let pool = SqlitePool::connect_with(options)
        .await
        .expect("Failed to reopen store");

    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    sqlx::query("BEGIN EXCLUSIVE")
        .execute(&mut *conn)
        .await
        .expect("Store is still locked");
    sqlx::query("ROLLBACK")
        .execute(&mut *conn)
        .await
        .expect("Failed to release lock");
    drop(conn);

    pool.close().await;
}

pub async fn make_request(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, String) {
    let mut request = Request::builder().uri(uri).method(method);

    if body.is_some() {
        request = request.header("content-type", "application/json");
    }

    let request = request
        .body(Body::from(body.unwrap_or_default()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_str = String::from_utf8(body.to_vec()).unwrap();

    (status, body_str)
}
