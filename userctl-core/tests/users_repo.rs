//! Repository tests against a live PostgreSQL
//!
//! Run with:
//!   DB_HOST=localhost DB_PORT=5432 DB_USER=postgres DB_PASSWORD=postgres DB_NAME=postgres \
//!     cargo test -p userctl-core --test users_repo -- --ignored

use sqlx::PgPool;
use tokio::sync::OnceCell;
use uuid::Uuid;

use userctl_core::{connect, DbConfig, UserError, UserRepo, UserStore};

static SCHEMA: OnceCell<()> = OnceCell::const_new();

async fn pool() -> PgPool {
    let config = DbConfig::from_env().expect("DB_* variables required");
    let pool = connect(&config).await.expect("database not reachable");

    SCHEMA
        .get_or_init(|| async {
            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS users (
                    id SERIAL PRIMARY KEY,
                    name TEXT NOT NULL,
                    email TEXT NOT NULL UNIQUE,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
                )
                "#,
            )
            .execute(&pool)
            .await
            .expect("create users table");
        })
        .await;

    pool
}

fn unique_email(tag: &str) -> String {
    format!("{tag}-{}@example.com", Uuid::new_v4())
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_assigns_id_and_created_at() {
    let pool = pool().await;
    let repo = UserRepo::new(&pool);

    let user = repo.create("Alice", &unique_email("alice")).await.unwrap();
    assert!(user.id > 0);
    assert!(user.created_at.timestamp() > 0);

    let fetched = repo.get_by_id(user.id).await.unwrap();
    assert_eq!(fetched, user);

    repo.delete(user.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_email_is_not_a_storage_error() {
    let pool = pool().await;
    let repo = UserRepo::new(&pool);
    let email = unique_email("dup");

    let first = repo.create("First", &email).await.unwrap();
    let err = repo.create("Second", &email).await.unwrap_err();

    assert!(
        matches!(err, UserError::DuplicateEmail { email: ref taken } if *taken == email),
        "got {err:?}"
    );

    repo.delete(first.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_missing_id_is_not_found() {
    let pool = pool().await;
    let repo = UserRepo::new(&pool);

    let mut ghost = repo.create("Ghost", &unique_email("ghost")).await.unwrap();
    repo.delete(ghost.id).await.unwrap();

    let err = repo.update(&mut ghost).await.unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_to_taken_email_is_duplicate() {
    let pool = pool().await;
    let repo = UserRepo::new(&pool);

    let a = repo.create("A", &unique_email("a")).await.unwrap();
    let mut b = repo.create("B", &unique_email("b")).await.unwrap();

    b.email = a.email.clone();
    let err = repo.update(&mut b).await.unwrap_err();
    assert!(err.is_duplicate_email(), "got {err:?}");

    repo.delete(a.id).await.unwrap();
    repo.delete(b.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_missing_id_is_not_found() {
    let pool = pool().await;
    let repo = UserRepo::new(&pool);

    let err = repo.delete(i64::from(i32::MAX)).await.unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}

#[tokio::test]
#[ignore = "requires database"]
async fn list_all_is_strictly_ascending() {
    let pool = pool().await;
    let repo = UserRepo::new(&pool);

    let mut created = Vec::new();
    for i in 0..3 {
        created.push(repo.create(&format!("L{i}"), &unique_email("list")).await.unwrap());
    }

    let users = repo.list_all().await.unwrap();
    assert!(users.windows(2).all(|pair| pair[0].id < pair[1].id));
    for user in &created {
        assert!(users.iter().any(|u| u.id == user.id));
    }

    for user in created {
        repo.delete(user.id).await.unwrap();
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_update_delete_scenario() {
    let pool = pool().await;
    let repo = UserRepo::new(&pool);

    let mut user = repo.create("UserExample", &unique_email("example")).await.unwrap();
    let id = user.id;
    let created_at = user.created_at;

    let changed = unique_email("changed");
    user.email = changed.clone();
    repo.update(&mut user).await.unwrap();
    assert_eq!(user.created_at, created_at);
    assert_eq!(repo.get_by_id(id).await.unwrap().email, changed);

    repo.delete(id).await.unwrap();
    assert!(repo.get_by_id(id).await.unwrap_err().is_not_found());
}
