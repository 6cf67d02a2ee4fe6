use anyhow::Context;
use serde_json::json;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config;
use crate::database::{schema, DatabaseManager};

pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let database = &config::config().database;
    let pool = DatabaseManager::connect(database)
        .await
        .context("failed to connect to DATABASE_URL")?;

    schema::ensure_schema(&pool).await.context("schema bootstrap failed")?;
    pool.close().await;

    output_success(
        &output_format,
        "Schema is up to date",
        Some(json!({ "tables": ["users", "todos"] })),
    )
}
