/// Structured error types for userctl-core.
///
/// Uses `thiserror` so library consumers get a matchable taxonomy.
/// The binary crate (userctl-cli) wraps these in `anyhow` for reporting.
use thiserror::Error;

/// Main error type for userctl-core operations
#[derive(Error, Debug)]
pub enum UserError {
    /// Connection parameters are missing or cannot be turned into connect options
    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// The database never answered a ping within the retry budget
    #[error("database not available after {attempts} attempts")]
    Connection {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    /// The caller's deadline fired before the operation finished
    #[error("operation cancelled: {reason}")]
    Cancelled { reason: String },

    /// No user row matches the given id
    #[error("user with id {id} not found")]
    NotFound { id: i64 },

    /// The unique constraint on email rejected the write
    #[error("email {email} already exists")]
    DuplicateEmail { email: String },

    /// Any other storage-layer failure
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Result type alias for userctl-core operations
pub type Result<T> = std::result::Result<T, UserError>;

impl UserError {
    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    /// Create a duplicate email error
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }

    /// Create a cancellation error
    pub fn cancelled(reason: impl Into<String>) -> Self {
        Self::Cancelled {
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_duplicate_email(&self) -> bool {
        matches!(self, Self::DuplicateEmail { .. })
    }
}
