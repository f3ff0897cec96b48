//! CRUD commands against the user store
//!
//! Commands: list, get, create, update, delete

use std::io::Write;

use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::{ArgGroup, Parser};
use tracing::info;
use userctl_core::UserStore;

use crate::output::{self, OutputFormat};

// === Arg Structs ===

#[derive(Parser, Debug)]
pub struct GetArgs {
    /// User id
    pub id: i64,
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Display name
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub name: String,

    /// Email address (must be unused)
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub email: String,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("changes").required(true).multiple(true).args(["name", "email"])))]
pub struct UpdateArgs {
    /// User id
    pub id: i64,

    /// New display name
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub name: Option<String>,

    /// New email address
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub email: Option<String>,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// User id
    pub id: i64,
}

// === Command Implementation ===

pub async fn run_list(store: &dyn UserStore, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let users = store.list_all().await.context("failed to list users")?;
    output::user_list(out, format, &users)
}

pub async fn run_get(
    store: &dyn UserStore,
    args: &GetArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let user = store
        .get_by_id(args.id)
        .await
        .context("failed to find user")?;
    output::user(out, format, None, &user)
}

pub async fn run_create(
    store: &dyn UserStore,
    args: &CreateArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let user = store
        .create(&args.name, &args.email)
        .await
        .context("failed to create user")?;

    info!(id = user.id, "user created");
    output::user(out, format, Some("created"), &user)
}

/// Read-modify-write: only the given fields change.
pub async fn run_update(
    store: &dyn UserStore,
    args: &UpdateArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let mut user = store
        .get_by_id(args.id)
        .await
        .context("failed to find user")?;

    if let Some(name) = &args.name {
        user.name.clone_from(name);
    }
    if let Some(email) = &args.email {
        user.email.clone_from(email);
    }

    store
        .update(&mut user)
        .await
        .context("failed to update user")?;

    info!(id = user.id, "user updated");
    output::user(out, format, Some("updated"), &user)
}

pub async fn run_delete(
    store: &dyn UserStore,
    args: &DeleteArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    store
        .delete(args.id)
        .await
        .context("failed to delete user")?;

    info!(id = args.id, "user deleted");
    output::deleted(out, format, args.id)
}
