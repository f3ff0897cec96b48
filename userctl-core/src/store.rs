//! User store port
//!
//! Implemented by the Postgres repository and by the in-memory store used
//! in tests. Callers that only need CRUD take `&dyn UserStore`.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::User;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users, ascending by id. Empty is not an error.
    async fn list_all(&self) -> Result<Vec<User>>;

    /// `NotFound` when no user has this id.
    async fn get_by_id(&self, id: i64) -> Result<User>;

    /// Insert a user; id and created_at are assigned by the store.
    /// `DuplicateEmail` when the email is taken.
    async fn create(&self, name: &str, email: &str) -> Result<User>;

    /// Write `name` and `email` for `user.id`, then refresh `user` from
    /// the stored row. `NotFound` or `DuplicateEmail` on failure.
    async fn update(&self, user: &mut User) -> Result<()>;

    /// `NotFound` when nothing was deleted.
    async fn delete(&self, id: i64) -> Result<()>;
}
