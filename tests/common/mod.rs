#![allow(dead_code)]

use std::sync::{Mutex, MutexGuard};

use diesel::prelude::*;
use disk_mirror::database::{DbPool, create_pool, run_migrations};

static TEST_MUTEX: Mutex<()> = Mutex::new(());

pub const LINK: &str = "https://disk.yandex.ru/d/TKbB_n0bQm99GQ";

/// Database fixture shared by the tests of one binary.
///
/// Tests using it are `#[ignore]`d by default; run them with
/// `cargo test -- --ignored` against a scratch PostgreSQL database.
pub fn setup_test_db() -> (DbPool, MutexGuard<'static, ()>) {
    let database_url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost/disk_mirror_test".to_string());

    let guard = TEST_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let pool = create_pool(&database_url).expect("Failed to create test pool");
    let mut conn = pool.get().expect("Failed to get connection");
    run_migrations(&mut conn).expect("Failed to run migrations");
    cleanup_test_db(&mut conn);

    (pool, guard)
}

pub fn cleanup_test_db(conn: &mut PgConnection) {
    diesel::sql_query("TRUNCATE TABLE previews, files RESTART IDENTITY CASCADE")
        .execute(conn)
        .expect("Failed to truncate tables");
}

pub fn count_files(pool: &DbPool) -> i64 {
    use disk_mirror::schema::files::dsl::*;

    let mut conn = pool.get().unwrap();
    files.count().get_result(&mut conn).unwrap()
}

pub fn count_previews(pool: &DbPool) -> i64 {
    use disk_mirror::schema::previews::dsl::*;

    let mut conn = pool.get().unwrap();
    previews.count().get_result(&mut conn).unwrap()
}

/// A file descriptor as the public resources API returns it.
pub fn file_json(name: &str, path: &str, size: i64, sizes: &[(&str, &str)]) -> serde_json::Value {
    let previews: Vec<serde_json::Value> = sizes
        .iter()
        .map(|(size_name, url)| serde_json::json!({"name": size_name, "url": url}))
        .collect();

    serde_json::json!({
        "type": "file",
        "name": name,
        "path": path,
        "mime_type": "text/plain",
        "file": format!("https://downloader.disk.yandex.ru/disk{}", path),
        "size": size,
        "created": "2024-03-01T10:00:00+00:00",
        "modified": "2024-03-01T10:00:00+00:00",
        "sizes": previews,
    })
}

pub fn dir_json(name: &str, path: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "dir",
        "name": name,
        "path": path,
        "created": "2024-03-01T10:00:00+00:00",
        "modified": "2024-03-01T10:00:00+00:00",
    })
}

pub fn listing_json(path: &str, items: Vec<serde_json::Value>) -> String {
    serde_json::json!({
        "type": "dir",
        "name": "shared",
        "path": path,
        "created": "2024-03-01T10:00:00+00:00",
        "modified": "2024-03-01T10:00:00+00:00",
        "_embedded": {"items": items, "total": 0, "limit": 100, "offset": 0},
    })
    .to_string()
}
