//! User record

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A row of the `users` table.
///
/// `id` and `created_at` are always assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for User {
    /// `{id}: {name}, {email} - {YYYY-MM-DD}`
    ///
    /// The date is the UTC calendar date, not the machine's local one, so
    /// the same row prints the same everywhere.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}, {} - {}",
            self.id,
            self.name,
            self.email,
            self.created_at.format("%Y-%m-%d")
        )
    }
}
