//! In-memory user store
//!
//! Same contract as the Postgres repository: sequential ids, unique
//! emails, not-found on missing ids. Useful for exercising callers
//! without a database.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::{Result, UserError};
use crate::models::User;
use crate::store::UserStore;

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    users: BTreeMap<i64, User>,
}

impl Inner {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    inner: Mutex<Inner>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list_all(&self) -> Result<Vec<User>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<User> {
        let inner = self.inner.lock().await;
        inner
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| UserError::not_found(id))
    }

    async fn create(&self, name: &str, email: &str) -> Result<User> {
        let mut inner = self.inner.lock().await;
        if inner.email_taken(email, None) {
            return Err(UserError::duplicate_email(email));
        }

        inner.next_id += 1;
        let user = User {
            id: inner.next_id,
            name: name.to_owned(),
            email: email.to_owned(),
            created_at: Utc::now(),
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &mut User) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let taken = inner.email_taken(&user.email, Some(user.id));

        // a missing row wins over a clash, as with UPDATE ... WHERE id
        let stored = inner
            .users
            .get_mut(&user.id)
            .ok_or_else(|| UserError::not_found(user.id))?;
        if taken {
            return Err(UserError::duplicate_email(user.email.clone()));
        }
        stored.name.clone_from(&user.name);
        stored.email.clone_from(&user.email);
        *user = stored.clone();
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| UserError::not_found(id))
    }
}
