//! Command implementations for userctl CLI

pub mod demo;
pub mod users;

// Re-export dispatcher functions for flat access from main.rs
pub use demo::run_demo;
pub use users::{run_create, run_delete, run_get, run_list, run_update};
