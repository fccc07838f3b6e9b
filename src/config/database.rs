//! Database configuration module for split history.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust structs.

use crate::entities::Split;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::debug;

/// Database used when `DATABASE_URL` is not set
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/fairshare.sqlite?mode=rwc";

/// Gets the database URL from the environment or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Directory that must exist before a file-backed `SQLite` URL can be opened.
fn sqlite_parent_dir(database_url: &str) -> Option<&Path> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next().unwrap_or(path);
    Path::new(path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
}

/// Connects to the database named by `DATABASE_URL`, falling back to the default file.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    if let Some(dir) = sqlite_parent_dir(&database_url) {
        std::fs::create_dir_all(dir)?;
    }
    debug!("Connecting to {database_url}");
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the history tables if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut split_table = schema.create_table_from_entity(Split);
    split_table.if_not_exists();

    db.execute(builder.build(&split_table)).await?;

    Ok(())
}
