//! attune - command-line front end for meditation personalization
//!
//! Analyzes questionnaire answers into an attachment profile, recommends a
//! meditation session, and keeps per-user history in a local SQLite file.

use anyhow::{Context, Result};
use attune_cli::cli::{Args, Command};
use attune_cli::{commands, logging, AppContext};
use attune_common::config::{load_or_default, RootFolderInitializer, RootFolderResolver};
use attune_common::db::{init_database, ProfileStore};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing exists, so its load error is held
    // until the subscriber is installed
    let (config, config_error) = load_or_default();

    logging::init(&config.logging)?;

    // Log build identification immediately after tracing init
    info!(
        "Starting attune v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    if let Some(e) = config_error {
        warn!("{}; using compiled defaults", e);
    }

    let resolver =
        RootFolderResolver::with_config("attune", config.clone()).with_cli_arg(args.root_folder.clone());

    // Pure analysis needs no database
    if let Command::Analyze { answers, user: None } = &args.command {
        let answers = answers.to_answers().context("Failed to read answers")?;
        return print_json(&commands::analyze_answers(&answers));
    }

    let root_folder = resolver.resolve();
    let initializer =
        RootFolderInitializer::new(root_folder).with_database_file(config.database_file.clone());
    initializer.ensure_directory_exists()?;

    let db_path = initializer.database_path();
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;
    let ctx = AppContext::new(ProfileStore::new(pool));

    let result = run(&ctx, args.command).await;
    ctx.store.pool().close().await;
    result
}

async fn run(ctx: &AppContext, command: Command) -> Result<()> {
    match command {
        Command::Analyze { answers, user } => {
            let answers = answers.to_answers().context("Failed to read answers")?;
            print_json(&commands::run_analyze(ctx, &answers, user.as_deref()).await?)
        }
        Command::Show { user } => print_json(&commands::run_show(ctx, &user).await?),
        Command::History { user, limit } => {
            print_json(&commands::run_history(ctx, &user, limit).await?)
        }
        Command::Forget { user } => print_json(&commands::run_forget(ctx, &user).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
