//! User repository
//!
//! One statement per operation; generated columns come back through
//! RETURNING. Uniqueness is left to the database and its rejections are
//! translated through the injected classifier.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::db::classify::{ErrorClass, ErrorClassifier, SqlStateTable};
use crate::error::{Result, UserError};
use crate::models::User;
use crate::store::UserStore;

/// Shared column list. Casts keep decoding stable whether the table was
/// declared with `serial`/`bigserial` and `timestamp`/`timestamptz`.
macro_rules! user_columns {
    () => {
        "id::int8 AS id, name, email, created_at::timestamptz AS created_at"
    };
}

/// Postgres-backed user repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
    classifier: &'a dyn ErrorClassifier,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self::with_classifier(pool, &SqlStateTable::POSTGRES)
    }

    /// Use a different error-code table (or any classifier).
    pub fn with_classifier(pool: &'a PgPool, classifier: &'a dyn ErrorClassifier) -> Self {
        Self { pool, classifier }
    }

    /// Map a failed INSERT/UPDATE to the domain taxonomy.
    fn write_error(&self, err: sqlx::Error, email: &str) -> UserError {
        match self.classifier.classify(&err) {
            ErrorClass::UniqueViolation => UserError::duplicate_email(email),
            _ => UserError::Storage(err),
        }
    }
}

#[async_trait]
impl<'a> UserStore for UserRepo<'a> {
    #[instrument(skip_all)]
    async fn list_all(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(concat!(
            "SELECT ",
            user_columns!(),
            " FROM users ORDER BY id ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<User> {
        sqlx::query_as::<_, User>(concat!(
            "SELECT ",
            user_columns!(),
            " FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| UserError::not_found(id))
    }

    #[instrument(skip(self))]
    async fn create(&self, name: &str, email: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(concat!(
            "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING ",
            user_columns!()
        ))
        .bind(name)
        .bind(email)
        .fetch_one(self.pool)
        .await
        .map_err(|err| self.write_error(err, email))?;

        debug!(id = user.id, "created user");
        Ok(user)
    }

    #[instrument(skip_all, fields(id = user.id))]
    async fn update(&self, user: &mut User) -> Result<()> {
        let row = sqlx::query_as::<_, User>(concat!(
            "UPDATE users SET name = $1, email = $2 WHERE id = $3 RETURNING ",
            user_columns!()
        ))
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.id)
        .fetch_optional(self.pool)
        .await
        .map_err(|err| self.write_error(err, &user.email))?
        .ok_or_else(|| UserError::not_found(user.id))?;

        // created_at is immutable; refreshed from the row all the same
        *user = row;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(UserError::not_found(id));
        }

        debug!(id, "deleted user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::classify::tests::db_error;
    use crate::db::classify::PG_UNIQUE_VIOLATION;
    use sqlx::postgres::PgPoolOptions;

    fn lazy_pool() -> PgPool {
        PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy("postgres://nobody@127.0.0.1:1/missing")
            .expect("lazy pool")
    }

    #[tokio::test]
    async fn unique_violation_becomes_duplicate_email() {
        let pool = lazy_pool();
        let repo = UserRepo::new(&pool);

        let err = repo.write_error(db_error(PG_UNIQUE_VIOLATION), "taken@example.com");
        assert!(err.is_duplicate_email());
        assert_eq!(err.to_string(), "email taken@example.com already exists");
    }

    #[tokio::test]
    async fn other_write_failures_are_storage_errors() {
        let pool = lazy_pool();
        let repo = UserRepo::new(&pool);

        let err = repo.write_error(db_error("23502"), "x@example.com");
        assert!(matches!(err, UserError::Storage(_)));
    }

    #[tokio::test]
    async fn classifier_is_swappable() {
        static NOTHING_UNIQUE: SqlStateTable = SqlStateTable::new(&[]);

        let pool = lazy_pool();
        let repo = UserRepo::with_classifier(&pool, &NOTHING_UNIQUE);

        let err = repo.write_error(db_error(PG_UNIQUE_VIOLATION), "x@example.com");
        assert!(matches!(err, UserError::Storage(_)));
    }
}
