//! Example walkthrough: show current data, then create, update and delete
//! a throwaway user.
//!
//! Command: demo (also the default when no subcommand is given)

use std::io::Write;

use anyhow::{bail, ensure, Context, Result};
use tracing::info;
use userctl_core::{UserError, UserStore};

use crate::output::{self, OutputFormat};

pub const EXAMPLE_NAME: &str = "UserExample";
pub const EXAMPLE_EMAIL: &str = "example@example.com";
pub const CHANGED_EMAIL: &str = "changed@example.com";

pub async fn run_demo(store: &dyn UserStore, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Successfully connected to DB")?;

    writeln!(out, "===Current Data in DB===")?;
    let users = store.list_all().await.context("failed to list users")?;
    output::user_list(out, OutputFormat::Text, &users)?;
    writeln!(out)?;

    writeln!(out, "===Example CRUD===")?;
    let mut user = store
        .create(EXAMPLE_NAME, EXAMPLE_EMAIL)
        .await
        .context("failed to create example user")?;
    output::user(out, OutputFormat::Text, Some("created"), &user)?;

    let id = user.id;
    user.email = CHANGED_EMAIL.to_string();
    store
        .update(&mut user)
        .await
        .context("failed to update example user")?;

    let fetched = store
        .get_by_id(id)
        .await
        .context("failed to find example user")?;
    ensure!(
        fetched.email == CHANGED_EMAIL,
        "user {id} still has email {} after update",
        fetched.email
    );
    output::user(out, OutputFormat::Text, Some("updated"), &fetched)?;

    store
        .delete(id)
        .await
        .context("failed to delete example user")?;
    output::deleted(out, OutputFormat::Text, id)?;

    match store.get_by_id(id).await {
        Err(UserError::NotFound { .. }) => writeln!(out, "user {id} is gone")?,
        Ok(_) => bail!("user {id} still present after delete"),
        Err(err) => return Err(err).context("failed to confirm deletion"),
    }

    info!(id, "example flow finished");
    Ok(())
}
