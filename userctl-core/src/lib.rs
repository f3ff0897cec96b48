//! userctl-core: connector and CRUD for the `users` table
//!
//! - [`config`]: connection settings read once at startup
//! - [`db`]: retrying connector, error classifier, Postgres repository
//! - [`store`]: the `UserStore` port shared by every backend

pub mod config;
pub mod db;
pub mod error;
pub mod memory;
pub mod models;
pub mod store;

pub use config::DbConfig;
pub use db::{connect, RetryPolicy, UserRepo};
pub use error::{Result, UserError};
pub use memory::MemoryUserStore;
pub use models::User;
pub use store::UserStore;
