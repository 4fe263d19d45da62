//! Database initialization
//!
//! Opens (creating if needed) the SQLite database and ensures the profile
//! tables exist. Table creation is idempotent and safe to run on every
//! startup.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// SQLite busy timeout applied to every connection
pub const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Foreign keys are a per-connection setting, so they go on the
    // connect options rather than a one-off PRAGMA
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_tables(&pool).await?;

    Ok(pool)
}

/// Create all tables and indexes (idempotent)
pub async fn create_tables(pool: &SqlitePool) -> Result<()> {
    create_profiles_table(pool).await?;
    create_recommendations_table(pool).await?;
    Ok(())
}

async fn create_profiles_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            guid TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            style TEXT NOT NULL,
            primary_emotion TEXT NOT NULL,
            secondary_emotion TEXT,
            meditation_preference TEXT NOT NULL DEFAULT '',
            stress_response TEXT NOT NULL DEFAULT '',
            personal_goal TEXT NOT NULL DEFAULT '',
            analysis_date TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_profiles_user_date ON profiles(user_id, analysis_date)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_recommendations_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recommendations (
            guid TEXT PRIMARY KEY,
            profile_guid TEXT NOT NULL REFERENCES profiles(guid) ON DELETE CASCADE,
            session_type TEXT NOT NULL,
            focus TEXT NOT NULL,
            duration_minutes INTEGER NOT NULL,
            has_music INTEGER NOT NULL,
            description TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_recommendations_profile ON recommendations(profile_guid)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
