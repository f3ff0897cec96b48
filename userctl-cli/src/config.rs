//! Connection settings for the CLI
//!
//! Values come from flags, then `DB_*` environment variables, then `.env`
//! files. Everything is folded into a single [`DbConfig`] before connecting.

use std::time::Duration;

use clap::Args;
use userctl_core::config::{ENV_HOST, ENV_NAME, ENV_PASSWORD, ENV_PORT, ENV_USER};
use userctl_core::db::DEFAULT_MAX_CONNECTIONS;
use userctl_core::{DbConfig, RetryPolicy};

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.userctl/.env
///
/// Runs before tracing is initialised, so the loaded locations are
/// returned for the caller to log.
pub fn load_dotenv() -> Vec<String> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(path.display().to_string());
    }

    if let Some(home_dir) = dirs::home_dir() {
        let env_file = home_dir.join(".userctl").join(".env");

        // dotenvy doesn't overwrite existing vars, so this is safe
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded_from.push(env_file.display().to_string());
        }
    }

    loaded_from
}

#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Database host
    #[arg(long, env = ENV_HOST, global = true)]
    pub host: Option<String>,

    /// Database port
    #[arg(long, env = ENV_PORT, global = true)]
    pub port: Option<String>,

    /// Database user
    #[arg(long, env = ENV_USER, global = true)]
    pub user: Option<String>,

    /// Database password
    #[arg(long, env = ENV_PASSWORD, hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Database name
    #[arg(long, env = ENV_NAME, global = true)]
    pub database: Option<String>,

    /// Ping attempts before giving up on the database
    #[arg(long, default_value_t = RetryPolicy::DEFAULT_ATTEMPTS, global = true)]
    pub retries: u32,

    /// Delay between ping attempts in milliseconds
    #[arg(long = "retry-delay-ms", default_value_t = 1000, global = true)]
    pub retry_delay_ms: u64,

    /// Give up waiting for the database after this many seconds
    #[arg(long = "timeout-secs", global = true)]
    pub timeout_secs: Option<u64>,

    /// Maximum pooled connections
    #[arg(long = "max-connections", default_value_t = DEFAULT_MAX_CONNECTIONS, global = true)]
    pub max_connections: u32,
}

impl ConnectionArgs {
    pub fn db_config(&self) -> userctl_core::Result<DbConfig> {
        DbConfig::from_lookup(|key| match key {
            ENV_HOST => self.host.clone(),
            ENV_PORT => self.port.clone(),
            ENV_USER => self.user.clone(),
            ENV_PASSWORD => self.password.clone(),
            ENV_NAME => self.database.clone(),
            _ => None,
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retries, Duration::from_millis(self.retry_delay_ms))
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
