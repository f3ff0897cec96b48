//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. Before the pool is
//! built, a bounded retry loop opens single connections and pings them, so
//! the program can be started before the database finishes booting.

use std::io;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Connection, PgConnection, PgPool};
use tokio::time::{sleep, timeout, timeout_at, Instant};
use tracing::{debug, info, instrument, warn};

use crate::config::DbConfig;
use crate::error::{Result, UserError};

/// Default maximum connections for the pool.
/// Kept low for single-user tooling.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long and how often to wait for the database to answer a ping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
    attempt_timeout: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_ATTEMPTS: u32 = 30;
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);
    pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

    /// `max_attempts` is clamped to at least one.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            attempt_timeout: Self::DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    /// Upper bound for a single attempt: connect, ping, close.
    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout
    }
}

impl Default for RetryPolicy {
    /// 30 attempts, one second apart.
    fn default() -> Self {
        Self::new(Self::DEFAULT_ATTEMPTS, Self::DEFAULT_DELAY)
    }
}

/// Connect with the default retry policy and pool size.
///
/// # Errors
///
/// `Config` if the connection string does not parse, `Connection` if the
/// database never answers.
///
/// # Example
///
/// ```ignore
/// let pool = connect(&DbConfig::from_env()?).await?;
/// ```
pub async fn connect(config: &DbConfig) -> Result<PgPool> {
    connect_with_options(config, RetryPolicy::default(), DEFAULT_MAX_CONNECTIONS).await
}

/// Connect with a custom retry policy and pool size.
#[instrument(skip_all, fields(url = %config.redacted_url(), max_attempts = policy.max_attempts()))]
pub async fn connect_with_options(
    config: &DbConfig,
    policy: RetryPolicy,
    max_connections: u32,
) -> Result<PgPool> {
    let options = config.connect_options()?;

    wait_until_ready(&options, policy).await?;

    Ok(PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_lazy_with(options))
}

/// Like [`connect_with_options`], but gives up with `Cancelled` once
/// `deadline` passes, whatever the remaining retry budget.
pub async fn connect_until(
    config: &DbConfig,
    policy: RetryPolicy,
    max_connections: u32,
    deadline: Instant,
) -> Result<PgPool> {
    timeout_at(deadline, connect_with_options(config, policy, max_connections))
        .await
        .unwrap_or_else(|_| {
            Err(UserError::cancelled(
                "deadline elapsed while waiting for the database",
            ))
        })
}

/// Ping until the database answers or the policy is exhausted.
///
/// There is no sleep after the final attempt. The error kept on exhaustion
/// is the one from the last attempt.
pub async fn wait_until_ready(options: &PgConnectOptions, policy: RetryPolicy) -> Result<()> {
    let mut attempt = 0;

    loop {
        attempt += 1;

        match ping(options, policy.attempt_timeout()).await {
            Ok(()) => {
                info!(attempt, "database is ready");
                return Ok(());
            }
            Err(err) if attempt >= policy.max_attempts() => {
                warn!(attempts = attempt, error = %err, "database not available");
                return Err(UserError::Connection {
                    attempts: attempt,
                    source: err,
                });
            }
            Err(err) => {
                debug!(attempt, error = %err, "database not ready, retrying");
                sleep(policy.delay()).await;
            }
        }
    }
}

/// One liveness check on a fresh connection, outside any pool.
///
/// A refused connection fails straight away with the driver's I/O error.
pub async fn ping(
    options: &PgConnectOptions,
    limit: Duration,
) -> std::result::Result<(), sqlx::Error> {
    let check = async {
        let mut conn = PgConnection::connect_with(options).await?;
        conn.ping().await?;
        conn.close().await
    };

    timeout(limit, check).await.unwrap_or_else(|_| {
        Err(sqlx::Error::Io(io::Error::new(
            io::ErrorKind::TimedOut,
            format!("no answer within {limit:?}"),
        )))
    })
}
