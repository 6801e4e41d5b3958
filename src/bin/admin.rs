//! CLI administration tool for user-center.
//!
//! Applies schema migrations and performs operator tasks without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! cargo run --bin admin -- --config config.yml migrate --migrations ./migrations
//!
//! # Show the current schema version only
//! cargo run --bin admin -- migrate status
//!
//! # Promote an account to administrator
//! cargo run --bin admin -- user grant-admin alice123
//! ```
//!
//! # Configuration
//!
//! Reads the same YAML file as the server (`--config` or `APP_CONFIG`).
//! `DATABASE_URL` overrides the database section.

use user_center::config::Config;
use user_center::domain::entities::{UserPatch, UserRole};
use user_center::domain::repositories::UserRepository;
use user_center::infrastructure::persistence::PgUserRepository;
use user_center::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// CLI tool for managing user-center.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, global = true, env = "APP_CONFIG", default_value = "config.yml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Apply schema migrations
    Migrate {
        /// Directory holding the migration files
        #[arg(short, long, default_value = "migrations")]
        migrations: PathBuf,

        #[command(subcommand)]
        action: Option<MigrateAction>,
    },

    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

/// Migration subcommands. Without one, pending migrations are applied.
#[derive(Subcommand)]
enum MigrateAction {
    /// Report the current version without applying anything
    Status,
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Give an account the admin role
    GrantAdmin {
        /// Account name
        account: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Latest applied migration as recorded by sqlx.
struct SchemaVersion {
    version: i64,
    dirty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_file(&cli.config)?;
    let pool = connect_pool(&config.database).await?;

    match cli.command {
        Commands::Migrate { migrations, action } => {
            let apply = !matches!(action, Some(MigrateAction::Status));
            handle_migrate(&pool, &migrations, apply).await?;
        }
        Commands::User { action } => handle_user_action(action, &pool).await?,
    }

    pool.close().await;
    Ok(())
}

/// Reports the schema version and, when `apply` is set, runs pending migrations.
///
/// # Flow
///
/// 1. Read the current version and dirty flag
/// 2. Refuse to continue if the last migration failed halfway
/// 3. Apply pending migrations from `dir`
/// 4. Report the final version
async fn handle_migrate(pool: &PgPool, dir: &Path, apply: bool) -> Result<()> {
    println!("{}", "🗄️  Database Migrations".bright_blue().bold());
    println!();

    let before = schema_version(pool).await?;
    print_version("Current version", before.as_ref());

    if before.as_ref().is_some_and(|v| v.dirty) {
        anyhow::bail!(
            "database is dirty at version {}; fix the failed migration manually before retrying",
            before.as_ref().map_or(0, |v| v.version)
        );
    }

    if !apply {
        return Ok(());
    }

    let migrator = Migrator::new(dir)
        .await
        .with_context(|| format!("Failed to read migrations from {}", dir.display()))?;
    println!(
        "  Source: {} ({} files)",
        dir.display().to_string().cyan(),
        migrator.iter().count()
    );

    migrator
        .run(pool)
        .await
        .context("Failed to apply migrations")?;

    let after = schema_version(pool).await?;
    println!();
    if after.as_ref().map(|v| v.version) == before.as_ref().map(|v| v.version) {
        println!("{}", "✅ Already up to date".green().bold());
    } else {
        println!("{}", "✅ Migrations applied".green().bold());
    }
    print_version("Final version", after.as_ref());
    println!();

    Ok(())
}

fn print_version(label: &str, version: Option<&SchemaVersion>) {
    match version {
        None => println!("  {label}: {}", "none (no migrations applied)".yellow()),
        Some(v) => println!(
            "  {label}: {}, dirty: {}",
            v.version.to_string().bright_white().bold(),
            if v.dirty { "true".red() } else { "false".green() }
        ),
    }
}

async fn schema_version(pool: &PgPool) -> Result<Option<SchemaVersion>> {
    let table: Option<String> =
        sqlx::query_scalar("SELECT to_regclass('_sqlx_migrations')::text")
            .fetch_one(pool)
            .await?;
    if table.is_none() {
        return Ok(None);
    }

    let row: Option<(i64, bool)> = sqlx::query_as(
        "SELECT version, NOT success FROM _sqlx_migrations ORDER BY version DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(version, dirty)| SchemaVersion { version, dirty }))
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::GrantAdmin { account, yes } => grant_admin(&repo, &account, yes).await,
    }
}

/// Promotes `account` to the admin role after confirmation.
async fn grant_admin(repo: &PgUserRepository, account: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🛡️  Grant Admin Role".bright_blue().bold());
    println!();

    let user = repo
        .find_by_account(account)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Account not found")?;

    if user.is_admin() {
        println!("{}", "⚠️  This account is already an admin".yellow());
        return Ok(());
    }

    println!("  Account: {}", user.user_account.cyan());
    println!("  ID:      {}", user.id.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Grant admin role to this account?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let patch = UserPatch {
        user_role: Some(UserRole::Admin),
        ..UserPatch::default()
    };
    let updated = repo
        .update_by_id(user.id, patch)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update role: {}", e))?;

    if !updated {
        anyhow::bail!("Account disappeared before the update");
    }

    println!();
    println!("{}", "✅ Admin role granted".green().bold());
    println!();

    Ok(())
}

