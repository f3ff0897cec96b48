//! userctl CLI - CRUD over the `users` table
//!
//! Connects to PostgreSQL using `DB_*` settings (flags, environment or
//! `.env`), waits for the database to come up, then runs one command:
//! - `list`, `get`, `create`, `update`, `delete` for single operations
//! - `demo` (the default) for the example walkthrough

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, error, info};
use userctl_core::db::{connect_until, connect_with_options};
use userctl_core::{UserRepo, UserStore};

mod commands;
mod config;
mod output;
mod tracing_setup;

use config::ConnectionArgs;
use output::OutputFormat;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "userctl",
    author,
    version,
    about = "Create, read, update and delete rows of a PostgreSQL users table",
    long_about = "Connects using DB_HOST, DB_PORT, DB_USER, DB_PASSWORD and DB_NAME \
                  (flags override the environment), retrying until the database answers. \
                  Runs the example walkthrough when no subcommand is given."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all users ordered by id
    List,
    /// Show one user
    Get(commands::users::GetArgs),
    /// Create a user
    Create(commands::users::CreateArgs),
    /// Change a user's name and/or email
    Update(commands::users::UpdateArgs),
    /// Delete a user
    Delete(commands::users::DeleteArgs),
    /// Show current data, then create, update and delete an example user
    Demo,
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_files = config::load_dotenv();
    let cli = Cli::parse();

    if let Err(err) = tracing_setup::init(&TracingConfig { debug: cli.debug }) {
        eprintln!("failed to initialise logging: {err:#}");
    }
    for path in &env_files {
        debug!("Loaded .env from {path}");
    }

    let outcome = tokio::select! {
        result = run(cli) => result,
        _ = tokio::signal::ctrl_c() => Err(anyhow!("interrupted")),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let db_config = cli
        .connection
        .db_config()
        .context("invalid database configuration")?;
    let policy = cli.connection.retry_policy();
    let max_connections = cli.connection.max_connections;

    info!(url = %db_config.redacted_url(), "connecting to database");
    let pool = match cli.connection.deadline() {
        Some(limit) => {
            let deadline = tokio::time::Instant::now() + limit;
            connect_until(&db_config, policy, max_connections, deadline).await
        }
        None => connect_with_options(&db_config, policy, max_connections).await,
    }
    .context("database connection failed")?;

    let repo = UserRepo::new(&pool);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = dispatch(
        cli.command.unwrap_or(Commands::Demo),
        &repo,
        cli.format,
        &mut out,
    )
    .await;

    out.flush()?;
    pool.close().await;
    result
}

async fn dispatch(
    command: Commands,
    store: &dyn UserStore,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Commands::List => commands::run_list(store, format, out).await,
        Commands::Get(args) => commands::run_get(store, &args, format, out).await,
        Commands::Create(args) => commands::run_create(store, &args, format, out).await,
        Commands::Update(args) => commands::run_update(store, &args, format, out).await,
        Commands::Delete(args) => commands::run_delete(store, &args, format, out).await,
        Commands::Demo => commands::run_demo(store, out).await,
    }
}
