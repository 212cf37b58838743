//! Operator tooling: password hashing and admin account seeding.

use anyhow::Context;
use clap::{Parser, Subcommand};
use cms_backend::{
    auth::{password::hash_password, repo_types::User},
    config::AppConfig,
    state, MIGRATOR,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cms-admin", about = "Administrative tasks for the CMS backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a bcrypt hash for a password.
    Hash { password: String },
    /// Create an admin account that can log in to the admin API.
    CreateUser { username: String, password: String },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Hash { password } => {
            let hash = hash_password(&password)?;
            println!("{hash}");
        }
        Command::CreateUser { username, password } => {
            anyhow::ensure!(!username.trim().is_empty(), "username must not be empty");
            anyhow::ensure!(!password.is_empty(), "password must not be empty");

            dotenvy::dotenv().ok();
            let config = AppConfig::from_env()?;
            let db = state::connect(&config).await?;
            MIGRATOR.run(&db).await.context("run database migrations")?;

            let hash = hash_password(&password)?;
            let id = User::create(&db, username.trim(), &hash)
                .await
                .with_context(|| format!("create user {username:?}"))?;
            println!("created user {} with id {}", username.trim(), id);
            db.close().await;
        }
    }
    Ok(())
}
