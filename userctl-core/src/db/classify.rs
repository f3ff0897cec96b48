//! Storage error classification
//!
//! Maps engine-specific error codes onto the small set of conditions the
//! repository cares about. Swapping engines means supplying another table.

use sqlx::Error as SqlxError;

/// SQLSTATE for `unique_violation` on PostgreSQL
pub const PG_UNIQUE_VIOLATION: &str = "23505";

const POSTGRES_CODES: &[(&str, ErrorClass)] = &[(PG_UNIQUE_VIOLATION, ErrorClass::UniqueViolation)];

/// Storage condition recognised by the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorClass {
    UniqueViolation,
    Other,
}

/// Turns a driver error into an [`ErrorClass`].
pub trait ErrorClassifier: Send + Sync {
    fn classify(&self, err: &SqlxError) -> ErrorClass;
}

/// Table-driven classifier keyed by the database's structured error code.
#[derive(Debug, Clone, Copy)]
pub struct SqlStateTable {
    entries: &'static [(&'static str, ErrorClass)],
}

impl SqlStateTable {
    pub const POSTGRES: SqlStateTable = SqlStateTable::new(POSTGRES_CODES);

    pub const fn new(entries: &'static [(&'static str, ErrorClass)]) -> Self {
        Self { entries }
    }

    /// Class for a raw code; unlisted codes are [`ErrorClass::Other`].
    pub fn lookup(&self, code: &str) -> ErrorClass {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, class)| *class)
            .unwrap_or(ErrorClass::Other)
    }
}

impl Default for SqlStateTable {
    fn default() -> Self {
        Self::POSTGRES
    }
}

impl ErrorClassifier for SqlStateTable {
    fn classify(&self, err: &SqlxError) -> ErrorClass {
        err.as_database_error()
            .and_then(|db_err| db_err.code())
            .map(|code| self.lookup(&code))
            .unwrap_or(ErrorClass::Other)
    }
}
