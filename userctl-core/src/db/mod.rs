//! Database layer - connection pool, error classification and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections) - no Arc<Mutex<Connection>>
//! - Rely on DB constraints, classify rejections - no check-then-insert
//! - One statement per operation, generated columns via RETURNING

pub mod classify;
pub mod pool;
pub mod repos;

pub use classify::{ErrorClass, ErrorClassifier, SqlStateTable};
pub use pool::{connect, connect_until, connect_with_options, RetryPolicy, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
