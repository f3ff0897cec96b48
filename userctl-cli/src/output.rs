//! Console rendering for users

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde_json::json;
use userctl_core::User;

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per user
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// "Users:" followed by one line per user, or a JSON array.
pub fn user_list(out: &mut dyn Write, format: OutputFormat, users: &[User]) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "Users:")?;
            for user in users {
                writeln!(out, "{user}")?;
            }
        }
        OutputFormat::Json => json_line(out, &json!(users))?,
    }
    Ok(())
}

/// A single user, prefixed with `label` in text mode (e.g. "created").
pub fn user(out: &mut dyn Write, format: OutputFormat, label: Option<&str>, user: &User) -> Result<()> {
    match (format, label) {
        (OutputFormat::Text, Some(label)) => writeln!(out, "{label} {user}")?,
        (OutputFormat::Text, None) => writeln!(out, "{user}")?,
        (OutputFormat::Json, _) => json_line(out, &json!(user))?,
    }
    Ok(())
}

pub fn deleted(out: &mut dyn Write, format: OutputFormat, id: i64) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "deleted user {id}")?,
        OutputFormat::Json => json_line(out, &json!({ "deleted": id }))?,
    }
    Ok(())
}

fn json_line(out: &mut dyn Write, value: &serde_json::Value) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
