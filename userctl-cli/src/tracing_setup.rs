//! Log output for the userctl CLI
//!
//! Everything goes to stderr so listings on stdout stay pipeable. Without
//! `RUST_LOG`, only userctl's own crates log at info (debug with
//! `--debug`); sqlx statement logging stays at warn unless asked for.
//!
//! Usage:
//!   userctl --debug list                  # our debug events, sqlx at info
//!   RUST_LOG=sqlx=debug userctl list      # every statement sqlx runs

use std::io::{self, IsTerminal};

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Crates whose events are shown by default.
const OWN_TARGETS: [&str; 2] = ["userctl", "userctl_core"];

#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// `--debug`: our crates at debug, sqlx at info, targets shown
    pub debug: bool,
}

impl TracingConfig {
    /// Filter used when `RUST_LOG` is unset or unparseable.
    fn default_directives(&self) -> String {
        let (own, sqlx) = if self.debug {
            ("debug", "info")
        } else {
            ("info", "warn")
        };

        let mut directives = vec!["warn".to_string(), format!("sqlx={sqlx}")];
        directives.extend(OWN_TARGETS.iter().map(|target| format!("{target}={own}")));
        directives.join(",")
    }
}

pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directives()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(config.debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_by_default_outside_our_crates() {
        let directives = TracingConfig::default().default_directives();
        assert_eq!(directives, "warn,sqlx=warn,userctl=info,userctl_core=info");
    }

    #[test]
    fn debug_raises_our_crates_and_sqlx() {
        let directives = TracingConfig { debug: true }.default_directives();
        assert_eq!(directives, "warn,sqlx=info,userctl=debug,userctl_core=debug");
        // must stay a valid filter
        EnvFilter::try_new(&directives).unwrap();
    }
}
